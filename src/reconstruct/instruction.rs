//! Diagram instructions emitted by the reconstructor.
//!
//! The instruction stream is the only output of the core. Encoders (PlantUML,
//! JSON, anything else) consume it without re-deriving call structure.

use crate::parser::EventKind;
use serde::{Deserialize, Serialize};

/// Shape of a message arrow, determined by the event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowShape {
    Simple,
    DoubleHeaded,
    Circle,
    Slashed,
}

impl ArrowShape {
    pub fn for_kind(kind: EventKind) -> Self {
        match kind {
            EventKind::Call | EventKind::DelegateCall => ArrowShape::Simple,
            EventKind::ValueTransfer => ArrowShape::DoubleHeaded,
            EventKind::Create => ArrowShape::Circle,
            EventKind::SelfDestruct => ArrowShape::Slashed,
        }
    }
}

/// Arrow colour; the concrete colour value belongs to the encoder's style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowColor {
    #[default]
    Default,
    /// Sent from inside a delegated context
    Delegate,
}

/// Optional gas figures attached to an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasAnnotation {
    pub used: Option<u64>,
    pub limit: Option<u64>,
}

/// Why an activation ended with a return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnReason {
    /// The call completed normally
    Completed,
    /// The contract destroyed itself
    SelfDestruct,
    /// A delegated context reached its last event
    DelegateExit,
}

/// A single diagram instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    Participant {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        symbol: Option<String>,
    },
    Call {
        event_id: u64,
        from: String,
        to: String,
        shape: ArrowShape,
        color: ArrowColor,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas: Option<GasAnnotation>,
    },
    Value {
        event_id: u64,
        from: String,
        to: String,
        color: ArrowColor,
        /// Amount already scaled to the display unit, e.g. `1.00`
        amount: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas: Option<GasAnnotation>,
    },
    Activate {
        participant: String,
        delegated: bool,
    },
    Return {
        participant: String,
        reason: ReturnReason,
    },
    Destroy {
        participant: String,
    },
    Note {
        participant: String,
        text: String,
    },
}

impl Instruction {
    pub fn is_activation(&self) -> bool {
        matches!(self, Instruction::Activate { .. })
    }

    /// Returns and destroys both end an activation
    pub fn is_close(&self) -> bool {
        matches!(self, Instruction::Return { .. } | Instruction::Destroy { .. })
    }

    /// Participant whose lifeline the instruction is attached to
    pub fn participant(&self) -> Option<&str> {
        match self {
            Instruction::Participant { id, .. } => Some(id),
            Instruction::Activate { participant, .. }
            | Instruction::Return { participant, .. }
            | Instruction::Destroy { participant }
            | Instruction::Note { participant, .. } => Some(participant),
            Instruction::Call { .. } | Instruction::Value { .. } => None,
        }
    }
}
