//! Configuration errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("You must supply an entity_id in the configuration, see the README")]
    MissingEntity,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Layer {path} must be a table of options")]
    NotATable { path: PathBuf },

    #[error("Layer file not found: {0}")]
    NotFound(PathBuf),
}
