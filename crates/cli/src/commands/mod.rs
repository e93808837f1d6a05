//! CLI command implementations.
//!
//! Commands return their output as text; `main` decides where it goes.

pub mod catalog;
pub mod shelves;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The shelves file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The shelves file could not be parsed.
    #[error(transparent)]
    Editorial(#[from] shelf_core::EditorialError),

    /// A shelf definition is invalid.
    #[error("Invalid shelf definition: {0}")]
    Schema(#[from] shelf_core::SchemaError),

    /// No shelf with the requested name.
    #[error("No shelf named {0}")]
    UnknownShelf(String),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
