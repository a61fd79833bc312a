//! Complete diagram: participant preamble plus reconstructed instructions.

use super::frame_stack::{reconstruct, RenderOptions};
use super::instruction::Instruction;
use crate::parser::{TraceDocument, TransactionMeta};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::ReconstructError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Top-level diagram structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// Schema version for compatibility checking
    pub version: String,

    /// Transaction the diagram was built from, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionMeta>,

    /// Options the instructions were generated with
    pub options: RenderOptions,

    /// Participant declarations followed by the call sequence
    pub instructions: Vec<Instruction>,

    /// Timestamp when the diagram was generated
    pub generated_at: String,
}

impl Diagram {
    /// Title line, e.g. `0xabc.. (mainnet)`
    pub fn title(&self) -> Option<String> {
        self.transaction.as_ref().map(|tx| match &tx.network {
            Some(network) => format!("{} ({})", tx.hash, network),
            None => tx.hash.clone(),
        })
    }

    /// Instructions after the participant preamble
    pub fn sequence(&self) -> &[Instruction] {
        let start = self
            .instructions
            .iter()
            .position(|i| !matches!(i, Instruction::Participant { .. }))
            .unwrap_or(self.instructions.len());
        &self.instructions[start..]
    }
}

/// Declare every participant in order of first appearance
///
/// **Public** - the preamble of every diagram
pub fn declare_participants(document: &TraceDocument) -> Vec<Instruction> {
    let mut seen = HashSet::new();
    let mut declarations = Vec::new();

    for event in &document.events {
        for address in [&event.from, &event.to] {
            if !seen.insert(address.as_str()) {
                continue;
            }
            let meta = document.participant(address);
            declarations.push(Instruction::Participant {
                id: address.clone(),
                name: meta.and_then(|m| m.name.clone()),
                symbol: meta.and_then(|m| m.symbol.clone()),
            });
        }
    }

    declarations
}

/// Build a complete diagram from a trace document
///
/// **Public** - used by commands to produce the final output
pub fn build_diagram(
    document: &TraceDocument,
    options: &RenderOptions,
) -> Result<Diagram, ReconstructError> {
    use chrono::Utc;

    let mut instructions = declare_participants(document);
    instructions.extend(reconstruct(&document.events, options)?);

    Ok(Diagram {
        version: SCHEMA_VERSION.to_string(),
        transaction: document.transaction.clone(),
        options: *options,
        instructions,
        generated_at: Utc::now().to_rfc3339(),
    })
}
