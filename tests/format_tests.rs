use callseq::format::encode_plantuml;
use callseq::parser::{EventKind, InteractionEvent, ParticipantMeta, TraceDocument, TransactionMeta};
use callseq::reconstruct::{build_diagram, RenderOptions};
use callseq::utils::config::{NotePlacement, StyleConfig};
use pretty_assertions::assert_eq;

fn swap_document() -> TraceDocument {
    let mut document = TraceDocument {
        transaction: Some(TransactionMeta {
            hash: "0xfeed".to_string(),
            network: Some("mainnet".to_string()),
        }),
        events: vec![
            InteractionEvent::new(1, EventKind::Call, "0xeoa", "0xrouter").with_gas(90_000, 120_000),
            InteractionEvent::new(2, EventKind::DelegateCall, "0xrouter", "0xlib"),
            InteractionEvent::new(3, EventKind::Call, "0xrouter", "0xpool")
                .in_delegate(2, true)
                .failed(Some("K")),
            InteractionEvent::new(4, EventKind::ValueTransfer, "0xrouter", "0xeoa")
                .with_amount(1_500_000_000_000_000_000),
        ],
        ..Default::default()
    };
    document.participants.insert(
        "0xrouter".to_string(),
        ParticipantMeta {
            name: Some("Router".to_string()),
            symbol: None,
        },
    );
    document
}

#[test]
fn test_encode_plantuml_full_sequence() {
    let diagram = build_diagram(
        &swap_document(),
        &RenderOptions {
            show_gas: true,
            show_params: false,
        },
    )
    .unwrap();

    let puml = encode_plantuml(&diagram, &StyleConfig::default());

    let expected = "\
@startuml
title 0xfeed (mainnet)
participant \"0xeoa\" as p_0xeoa
participant \"Router\\n0xrouter\" as p_0xrouter
participant \"0xlib\" as p_0xlib
participant \"0xpool\" as p_0xpool
p_0xeoa -> p_0xrouter: \\n90,000 / 120,000 gas
activate p_0xrouter
p_0xrouter -> p_0xlib
activate p_0xlib #809ECB
p_0xrouter -[#3471CD]> p_0xpool
activate p_0xpool
destroy p_0xpool
note right of p_0xpool: K
return
p_0xrouter ->> p_0xeoa: 1.50 ETH
return
@enduml
";
    assert_eq!(puml, expected);
}

#[test]
fn test_encode_respects_style() {
    let style = StyleConfig {
        delegate_lifeline_color: "#000".to_string(),
        delegate_message_color: "#FFF".to_string(),
        native_symbol: "xDAI".to_string(),
        note_placement: NotePlacement::Over,
    };
    let diagram = build_diagram(&swap_document(), &RenderOptions::default()).unwrap();

    let puml = encode_plantuml(&diagram, &style);

    assert!(puml.contains("activate p_0xlib #000\n"));
    assert!(puml.contains("p_0xrouter -[#FFF]> p_0xpool\n"));
    assert!(puml.contains("note over p_0xpool: K\n"));
    assert!(puml.contains("1.50 xDAI\n"));
}

#[test]
fn test_encode_without_title() {
    let document = TraceDocument {
        events: vec![InteractionEvent::new(1, EventKind::Create, "0xa", "0xb")],
        ..Default::default()
    };
    let diagram = build_diagram(&document, &RenderOptions::default()).unwrap();

    let puml = encode_plantuml(&diagram, &StyleConfig::default());

    assert!(!puml.contains("title"));
    assert!(puml.contains("p_0xa ->o p_0xb: constructor\n"));
}
