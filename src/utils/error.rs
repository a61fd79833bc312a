//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a trace document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read trace file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Structural problems in the event sequence that make reconstruction impossible.
///
/// Any of these aborts the whole reconstruction: skipping an event would
/// desynchronize the frame stack.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("Event {current} arrived after event {previous}; ids must be strictly increasing")]
    OutOfOrder { previous: u64, current: u64 },

    #[error("Event {event} refers to delegated context {context} which is not open")]
    UnknownDelegateContext { event: u64, context: u64 },

    #[error("Event {event} opens delegated context {context} but is not a delegate call")]
    InvalidDelegateOpening { event: u64, context: u64 },

    #[error("Self-destruct event {0} has no open call frame to terminate")]
    SelfDestructWithoutFrame(u64),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a style file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read style file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Style TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid colour '{0}': expected #RGB or #RRGGBB")]
    InvalidColor(String),
}
