//! Callseq
//!
//! Reconstructs the nested call hierarchy of a smart-contract transaction
//! from a flat, time-ordered interaction trace, and emits it as a stream of
//! sequence-diagram instructions.
//!
//! ## Getting Started
//!
//! ```ignore
//! use callseq::parser::read_trace_file;
//! use callseq::reconstruct::{build_diagram, RenderOptions};
//! use callseq::format::encode_plantuml;
//!
//! let document = read_trace_file("trace.json")?;
//! let diagram = build_diagram(&document, &RenderOptions::default())?;
//! println!("{}", encode_plantuml(&diagram, &Default::default()));
//! ```
//!
//! Most users should use the CLI:
//!
//! ```bash
//! callseq generate --input trace.json --gas --params
//! ```

pub mod commands;
pub mod format;
pub mod output;
pub mod parser;
pub mod reconstruct;
pub mod utils;
