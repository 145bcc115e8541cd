//! Merged sensor configuration with provenance
//!
//! Wraps the merged options with the layers that contributed to them and,
//! for every option, the layer that supplied its final value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ConfigError;
use super::loader::{ConfigLayer, LayerSource};
use super::merge::{apply_defaults, filter_layer, validate_merged, ConfigMap};

/// Where the final value of an option came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KeyOrigin {
    /// Layer at this zero-based position
    Layer { index: usize },
    /// Filled in after merging
    Default,
}

/// Merged sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedConfig {
    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged options
    pub config: ConfigMap,

    /// Contributing layers in precedence order
    pub sources: Vec<LayerSource>,

    /// Origin of every option in `config`
    pub origins: BTreeMap<String, KeyOrigin>,
}

impl MergedConfig {
    /// Merge layers, broadest first.
    ///
    /// Same rules as [`merge_sensor_configuration`](super::merge_sensor_configuration).
    pub fn build(layers: &[ConfigLayer], validate: bool) -> Result<Self, ConfigError> {
        let count = layers.len();
        let mut config = ConfigMap::new();
        let mut origins = BTreeMap::new();

        for (index, layer) in layers.iter().enumerate() {
            for (key, value) in filter_layer(&layer.values, index + 1, count) {
                origins.insert(key.clone(), KeyOrigin::Layer { index });
                config.insert(key, value);
            }
        }

        apply_defaults(&mut config);
        for key in config.keys() {
            if !origins.contains_key(key) {
                origins.insert(key.clone(), KeyOrigin::Default);
            }
        }

        if validate {
            validate_merged(&config)?;
        }

        Ok(Self {
            created_at: Utc::now(),
            config,
            sources: layers.iter().map(|l| l.source.clone()).collect(),
            origins,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get an option by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.config.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get an option as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get an option as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Get an option as f64
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(|v| v.as_f64())
    }

    /// Origin of a top-level option
    pub fn origin(&self, key: &str) -> Option<&KeyOrigin> {
        self.origins.get(key)
    }

    /// Entity id the sensor is built for, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.get_str(super::keys::CONF_ENTITY_ID)
    }

    pub fn into_config(self) -> ConfigMap {
        self.config
    }
}
