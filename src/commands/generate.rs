//! Generate command implementation.
//!
//! The generate command:
//! 1. Reads the trace document
//! 2. Reconstructs the call sequence
//! 3. Encodes it as PlantUML
//! 4. Writes output files

use crate::commands::models::GenerateArgs;
use crate::format::{encode_plantuml, format_amount, format_gas};
use crate::output::{write_diagram, write_text};
use crate::parser::read_trace_file;
use crate::reconstruct::{build_diagram, Diagram, SequenceStats};
use crate::utils::config::{load_style, StyleConfig};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info};
use std::time::Instant;

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file missing or malformed
/// * Structurally inconsistent event sequence
/// * File write errors
pub fn execute_generate(args: GenerateArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Loading trace from: {}", args.input.display());
    let document = read_trace_file(&args.input).context("Failed to read trace document")?;

    let style = match &args.style {
        Some(path) => load_style(path)
            .with_context(|| format!("Failed to load style file {}", path.display()))?,
        None => StyleConfig::default(),
    };
    debug!("Using style: {:?}", style);

    info!("Reconstructing call sequence...");
    let diagram = build_diagram(&document, &args.render_options())
        .context("Failed to reconstruct call sequence")?;

    let stats = SequenceStats::from_sequence(&document.events, diagram.sequence());
    info!("{}", stats.summary());

    write_outputs(&args, &diagram, &style)?;

    if args.print_summary {
        print_sequence_summary(&diagram, &stats);
    }

    info!(
        "Generation completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Write output files (PlantUML source and optional JSON diagram).
///
/// **Private** - internal helper for execute_generate
fn write_outputs(args: &GenerateArgs, diagram: &Diagram, style: &StyleConfig) -> Result<()> {
    info!("Writing output files...");

    let puml = encode_plantuml(diagram, style);
    write_text(&puml, &args.output_puml).context("Failed to write PlantUML source")?;
    info!("✓ PlantUML written to: {}", args.output_puml.display());

    if let Some(json_path) = &args.output_json {
        write_diagram(diagram, json_path).context("Failed to write diagram JSON")?;
        info!("✓ Diagram JSON written to: {}", json_path.display());
    }

    Ok(())
}

/// Print a human-readable sequence summary to stdout.
///
/// **Private** - internal helper for execute_generate
fn print_sequence_summary(diagram: &Diagram, stats: &SequenceStats) {
    let rule = "━".repeat(64);

    println!("\n{}", rule);
    println!("  {}", "CALL SEQUENCE SUMMARY".bold());
    println!("{}", rule);
    if let Some(title) = diagram.title() {
        println!("  Transaction:  {}", title.cyan());
    }
    println!("  Participants: {}", count_participants(diagram));
    println!("  Events:       {}", stats.event_count);
    for (kind, count) in &stats.by_kind {
        println!("  ├─ {:<14}{:>6}", kind, count);
    }
    println!("  Max depth:    {}", stats.max_activation_depth);
    println!("  Gas used:     {}", format_gas(stats.total_gas_used));
    println!("  Value moved:  {}", format_amount(stats.total_value));

    if stats.failed_events > 0 {
        println!(
            "  {}",
            format!("Failed events: {}", stats.failed_events).red().bold()
        );
    } else {
        println!("  {}", "All events succeeded".green());
    }
    println!("{}\n", rule);
}

fn count_participants(diagram: &Diagram) -> usize {
    diagram.instructions.len() - diagram.sequence().len()
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input trace path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input trace not found: {}", args.input.display());
    }

    if args.output_puml.as_os_str().is_empty() {
        anyhow::bail!("PlantUML output path cannot be empty");
    }

    if args.output_json.as_ref() == Some(&args.output_puml) {
        anyhow::bail!("JSON and PlantUML outputs must be different files");
    }

    if args.output_puml == args.input {
        anyhow::bail!("Output would overwrite the input trace");
    }

    if let Some(style) = &args.style {
        if !style.is_file() {
            anyhow::bail!("Style file not found: {}", style.display());
        }
    }

    Ok(())
}
