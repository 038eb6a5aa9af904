//! Error types for Cellgrid core.
//!
//! Formula failures are not errors at this level: they surface as `#ERROR!`
//! cell values. These variants cover structural edits, storage and config.

use thiserror::Error;

/// Errors that can occur in the Cellgrid store
#[derive(Error, Debug)]
pub enum CellgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed sheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid cell reference: {0}")]
    InvalidCellId(String),

    #[error("{dimension} index {index} out of bounds (count {count})")]
    IndexOutOfBounds {
        dimension: &'static str,
        index: usize,
        count: usize,
    },

    #[error("No file path set")]
    NoFilePath,

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CellgridError>;
