use callseq::output::validate_path;
use callseq::output::{read_diagram, write_diagram, write_text};
use callseq::parser::{EventKind, InteractionEvent, TraceDocument, TransactionMeta};
use callseq::reconstruct::{build_diagram, Diagram, Instruction, RenderOptions};
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_diagram() -> Diagram {
    let document = TraceDocument {
        transaction: Some(TransactionMeta {
            hash: "0xtest123".to_string(),
            network: None,
        }),
        events: vec![
            InteractionEvent::new(1, EventKind::Call, "0xa", "0xb"),
            InteractionEvent::new(2, EventKind::ValueTransfer, "0xb", "0xc")
                .with_amount(u128::MAX),
            InteractionEvent::new(3, EventKind::Call, "0xb", "0xd").failed(Some("revert")),
        ],
        ..Default::default()
    };
    build_diagram(&document, &RenderOptions::default()).unwrap()
}

#[test]
fn test_write_and_read_diagram() {
    let diagram = create_test_diagram();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_diagram(&diagram, path).unwrap();
    let loaded = read_diagram(path).unwrap();

    assert_eq!(loaded, diagram);
    assert_eq!(loaded.title().as_deref(), Some("0xtest123"));
}

#[test]
fn test_diagram_json_is_tagged() {
    let diagram = create_test_diagram();
    let value = serde_json::to_value(&diagram).unwrap();

    let first_step = &value["instructions"][4];
    assert_eq!(first_step["type"], "call");
    assert_eq!(first_step["shape"], "simple");
    assert_eq!(value["instructions"][0]["type"], "participant");
}

#[test]
fn test_sequence_skips_participants() {
    let diagram = create_test_diagram();
    assert!(matches!(diagram.sequence()[0], Instruction::Call { .. }));
    assert_eq!(diagram.instructions.len() - diagram.sequence().len(), 4);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/sequence.json");

    write_diagram(&create_test_diagram(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_text() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/sequence.puml");
    let source = "@startuml\nA -> B\n@enduml\n";

    write_text(source, &nested_path).unwrap();

    assert_eq!(std::fs::read_to_string(&nested_path).unwrap(), source);
}

#[test]
fn test_read_diagram_missing_file() {
    assert!(read_diagram("/nonexistent/sequence.json").is_err());
}
