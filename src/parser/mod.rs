//! Trace parsing and input schema definitions.
//!
//! This module handles:
//! - Parsing trace documents produced by the collector
//! - Normalizing numeric quantities (decimal or hex)
//! - Defining the event schema consumed by the reconstructor

pub mod schema;
pub mod trace_document;

// Re-export main types
pub use schema::{
    DelegateContext, EventKind, FunctionLabel, InteractionEvent, Param, ParticipantMeta,
    TraceDocument, TransactionMeta,
};
pub use trace_document::{parse_trace_document, read_trace_file};
