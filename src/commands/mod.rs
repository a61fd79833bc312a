//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod generate;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use generate::{execute_generate, validate_args};
pub use models::GenerateArgs;
pub use utils::{display_schema, display_version, validate_trace_file};
