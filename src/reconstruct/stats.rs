//! Summary statistics for a reconstructed sequence.
//!
//! Used for the `--summary` output and for logging. These are derived
//! purely from the input events and the emitted instructions.

use super::instruction::Instruction;
use crate::parser::{EventKind, InteractionEvent};
use log::debug;
use std::collections::BTreeMap;

/// Sequence statistics
///
/// **Public** - returned from SequenceStats::from_sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceStats {
    /// Total number of input events
    pub event_count: usize,

    /// Events per kind, keyed by kind name
    pub by_kind: BTreeMap<&'static str, usize>,

    /// Events whose own execution failed
    pub failed_events: usize,

    /// Deepest nesting of activations (real and delegated)
    pub max_activation_depth: usize,

    /// Sum of reported gas used
    pub total_gas_used: u64,

    /// Sum of value transferred, in wei
    pub total_value: u128,
}

impl SequenceStats {
    /// Calculate statistics for a reconstructed sequence
    ///
    /// **Public** - main entry point for statistics
    pub fn from_sequence(events: &[InteractionEvent], instructions: &[Instruction]) -> Self {
        let mut stats = SequenceStats {
            event_count: events.len(),
            ..Default::default()
        };

        for event in events {
            *stats.by_kind.entry(event.kind.as_str()).or_insert(0) += 1;
            if !event.succeeded {
                stats.failed_events += 1;
            }
            stats.total_gas_used = stats
                .total_gas_used
                .saturating_add(event.gas_used.unwrap_or(0));
            if event.kind == EventKind::ValueTransfer {
                stats.total_value = stats.total_value.saturating_add(event.amount);
            }
        }

        stats.max_activation_depth = activation_depth(instructions);

        debug!("Sequence stats: {}", stats.summary());

        stats
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Events: {} | Calls: {} | Delegate: {} | Creates: {} | Transfers: {} | Failed: {} | Max depth: {}",
            self.event_count,
            self.count(EventKind::Call),
            self.count(EventKind::DelegateCall),
            self.count(EventKind::Create),
            self.count(EventKind::ValueTransfer),
            self.failed_events,
            self.max_activation_depth
        )
    }
}

/// Deepest point of the running activation count
fn activation_depth(instructions: &[Instruction]) -> usize {
    let mut depth: usize = 0;
    let mut max_depth = 0;

    for instruction in instructions {
        if instruction.is_activation() {
            depth += 1;
            max_depth = max_depth.max(depth);
        } else if instruction.is_close() {
            depth = depth.saturating_sub(1);
        }
    }

    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::{reconstruct, RenderOptions};

    #[test]
    fn test_stats_from_nested_sequence() {
        let events = vec![
            InteractionEvent::new(1, EventKind::Call, "0xa", "0xb").with_gas(50_000, 100_000),
            InteractionEvent::new(2, EventKind::Call, "0xb", "0xc").with_gas(20_000, 60_000),
            InteractionEvent::new(3, EventKind::ValueTransfer, "0xc", "0xa").with_amount(7),
            InteractionEvent::new(4, EventKind::Call, "0xb", "0xd").failed(Some("revert")),
        ];
        let instructions = reconstruct(&events, &RenderOptions::default()).unwrap();

        let stats = SequenceStats::from_sequence(&events, &instructions);

        assert_eq!(stats.event_count, 4);
        assert_eq!(stats.count(EventKind::Call), 3);
        assert_eq!(stats.count(EventKind::ValueTransfer), 1);
        assert_eq!(stats.count(EventKind::Create), 0);
        assert_eq!(stats.failed_events, 1);
        assert_eq!(stats.max_activation_depth, 2);
        assert_eq!(stats.total_gas_used, 70_000);
        assert_eq!(stats.total_value, 7);
    }

    #[test]
    fn test_stats_empty() {
        let stats = SequenceStats::from_sequence(&[], &[]);
        assert_eq!(stats, SequenceStats::default());
    }
}
