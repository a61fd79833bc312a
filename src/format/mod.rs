//! Text formatting for labels and diagram encodings.
//!
//! Label helpers are consumed by the reconstructor while it builds
//! instructions; the PlantUML encoder consumes the finished diagram.

pub mod label;
pub mod plantuml;

// Re-export main functions
pub use label::{format_amount, format_gas, format_label, format_params, shorten_address};
pub use plantuml::{encode_instruction, encode_plantuml, participant_alias};
