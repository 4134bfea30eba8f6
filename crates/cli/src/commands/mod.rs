//! CLI command implementations.
//!
//! Commands return their output as a string; `main` writes it to stdout.

pub mod modules;
pub mod themes;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// No built-in theme has this id.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// The selector cannot be used to scope CSS.
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is neither a storefront payload nor a module list.
    #[error("Invalid storefront configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
