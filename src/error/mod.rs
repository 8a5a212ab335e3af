//! Error handling module for chapcat

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for chapcat operations
#[derive(Error, Debug)]
pub enum ChapcatError {
    /// Malformed or missing input, reported before any process is spawned
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Duration probe failed for one file
    #[error("Failed to probe {}: {message}", path.display())]
    Probe { path: PathBuf, message: String },

    /// The concatenation tool failed
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChapcatError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for chapcat operations
pub type ChapcatResult<T> = std::result::Result<T, ChapcatError>;
