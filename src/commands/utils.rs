use crate::parser::{read_trace_file, EventKind};
use crate::reconstruct::{build_diagram, RenderOptions, SequenceStats};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a trace file by parsing and reconstructing it
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let document = read_trace_file(&file_path).context("Trace document is not readable")?;
    let diagram = build_diagram(&document, &RenderOptions::default())
        .context("Event sequence is inconsistent")?;
    let stats = SequenceStats::from_sequence(&document.events, diagram.sequence());

    println!("✓ Valid trace document");
    if let Some(title) = diagram.title() {
        println!("  Transaction: {}", title);
    }
    println!("  Events: {}", stats.event_count);
    println!("  Participants: {}", diagram.instructions.len() - diagram.sequence().len());
    println!("  Instructions: {}", diagram.sequence().len());
    println!("  Failed events: {}", stats.failed_events);
    println!("  Max depth: {}", stats.max_activation_depth);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Callseq Trace Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        let kinds: Vec<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
        println!("Schema Structure:");
        println!("  transaction: object?       - {{ hash, network? }} used for the title");
        println!("  participants: object?      - address -> {{ name?, symbol? }}");
        println!("  events: array              - Interactions in execution order");
        println!("    id: number               - Strictly increasing sequence number");
        println!("    kind: string             - One of: {}", kinds.join(", "));
        println!("    from, to: string         - Participant addresses");
        println!("    parentId: number?        - Enclosing event (informational)");
        println!("    delegateContext: object? - {{ id, isLast }} of the enclosing delegate call");
        println!("    amount: number|string    - Value in wei (decimal or 0x hex)");
        println!("    gasUsed, gasLimit: number? - Gas figures");
        println!("    label: object?           - {{ functionName?, selector, args[] }}");
        println!("    succeeded: bool          - Outcome (default true)");
        println!("    errorMessage: string?    - Failure detail");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Callseq v{}", env!("CARGO_PKG_VERSION"));
    println!("Diagram Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Reconstructs nested call sequences from flat transaction traces.");
}
