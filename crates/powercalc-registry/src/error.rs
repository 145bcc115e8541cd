//! Error types for registry snapshots.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a registry snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read registry snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse registry snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Registry snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("Duplicate {kind} id: '{id}'")]
    Duplicate { kind: &'static str, id: String },

    #[error("Malformed entity id: '{0}'")]
    MalformedEntityId(String),
}
