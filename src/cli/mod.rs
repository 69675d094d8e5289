//! CLI support for sift-lang
//!
//! Provides programmatic access to the sift CLI functionality for
//! embedding in other tools. The CLI is a thin wrapper: everything here
//! only calls the public evaluate / field_names /
//! populate_prepared_conditions operations.

mod eval;

pub use eval::{EvalOptions, execute_eval};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Evaluation error
    Eval(crate::EvalError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// A --condition argument that is not name=expression
    BadCondition(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Eval(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::BadCondition(spec) => {
                write!(
                    f,
                    "Invalid condition '{}': expected name=expression",
                    spec
                )
            }
        }
    }
}

impl std::error::Error for CliError {}
