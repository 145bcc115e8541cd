//! Loading configuration layers from disk
//!
//! Layers are TOML (`.toml`) or JSON (anything else) documents whose top
//! level is a table of options.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::error::ConfigError;
use super::merge::ConfigMap;

/// Where a layer came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSource {
    /// File path (None for layers built in memory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// One configuration layer with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    pub source: LayerSource,
    pub values: ConfigMap,
}

impl ConfigLayer {
    /// Layer built in memory
    pub fn inline(values: ConfigMap) -> Self {
        Self {
            source: LayerSource {
                path: None,
                digest: None,
            },
            values,
        }
    }

    /// Load a layer file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: format!("Invalid UTF-8: {}", e),
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let value = if is_toml {
            let table: toml::Value =
                toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                    path: path.to_path_buf(),
                    reason: format!("TOML parse error: {}", e),
                })?;
            toml_to_json(table)
        } else {
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                reason: format!("JSON parse error: {}", e),
            })?
        };

        let Value::Object(values) = value else {
            return Err(ConfigError::NotATable {
                path: path.to_path_buf(),
            });
        };

        debug!(path = %path.display(), keys = values.len(), "loaded configuration layer");

        Ok(Self {
            source: LayerSource {
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            },
            values,
        })
    }
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
