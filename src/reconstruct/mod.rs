//! Reconstruction of nested call frames from flat interaction traces.
//!
//! This module transforms parsed events into:
//! - An ordered diagram instruction stream (arrows, activations, returns)
//! - Participant declarations for the diagram preamble
//! - Summary statistics

pub mod diagram;
pub mod frame_stack;
pub mod instruction;
pub mod stats;

// Re-export main types and functions
pub use diagram::{build_diagram, declare_participants, Diagram};
pub use frame_stack::{reconstruct, FrameReconstructor, RenderOptions};
pub use instruction::{ArrowColor, ArrowShape, GasAnnotation, Instruction, ReturnReason};
pub use stats::SequenceStats;
