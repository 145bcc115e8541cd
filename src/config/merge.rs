//! Sensor configuration merge logic
//!
//! Merges configuration layers (global, group, sensor) with:
//! - Top-level keys: override (last wins)
//! - Identity keys: only honored on the deepest layer
//! - Post-merge defaults for the energy sensor flag and fixed energy

use serde_json::{Map, Value};
use tracing::trace;

use super::error::ConfigError;
use super::keys::{
    CONF_CREATE_ENERGY_SENSOR, CONF_CREATE_ENERGY_SENSORS, CONF_CREATE_GROUP,
    CONF_DAILY_FIXED_ENERGY, CONF_ENTITY_ID, IDENTITY_KEYS,
};
use crate::entity::DUMMY_ENTITY_ID;

/// A single configuration layer
pub type ConfigMap = Map<String, Value>;

/// Copy of the layer at `position` (1-based) out of `count` layers, with the
/// identity keys removed unless it is the deepest layer.
pub fn filter_layer(layer: &ConfigMap, position: usize, count: usize) -> ConfigMap {
    let mut copy = layer.clone();
    if position < count {
        for key in IDENTITY_KEYS {
            if copy.remove(key).is_some() {
                trace!(key, position, "dropped identity key from outer layer");
            }
        }
    }
    copy
}

/// Apply the post-merge defaults in place.
///
/// - `create_energy_sensor` falls back to the legacy `create_energy_sensors`
/// - a fixed daily energy without an entity is tied to the placeholder entity
pub fn apply_defaults(config: &mut ConfigMap) {
    if !config.contains_key(CONF_CREATE_ENERGY_SENSOR) {
        if let Some(legacy) = config.get(CONF_CREATE_ENERGY_SENSORS).cloned() {
            config.insert(CONF_CREATE_ENERGY_SENSOR.to_string(), legacy);
        }
    }

    if config.contains_key(CONF_DAILY_FIXED_ENERGY) && !config.contains_key(CONF_ENTITY_ID) {
        config.insert(
            CONF_ENTITY_ID.to_string(),
            Value::String(DUMMY_ENTITY_ID.to_string()),
        );
    }
}

/// A sensor configuration must name an entity or create a group.
pub fn validate_merged(config: &ConfigMap) -> Result<(), ConfigError> {
    if !config.contains_key(CONF_CREATE_GROUP) && !config.contains_key(CONF_ENTITY_ID) {
        return Err(ConfigError::MissingEntity);
    }
    Ok(())
}

/// Merge configuration layers, broadest first, into one sensor configuration.
///
/// With `validate` off the entity/group check is skipped, for callers that
/// merge partial configurations.
pub fn merge_sensor_configuration(
    layers: &[ConfigMap],
    validate: bool,
) -> Result<ConfigMap, ConfigError> {
    let count = layers.len();

    let mut merged = ConfigMap::new();
    for (index, layer) in layers.iter().enumerate() {
        merged.extend(filter_layer(layer, index + 1, count));
    }

    apply_defaults(&mut merged);

    if validate {
        validate_merged(&merged)?;
    }

    Ok(merged)
}
