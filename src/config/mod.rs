//! Sensor configuration merge system
//!
//! Merges configuration layers into the options of a single sensor:
//! 1. Global configuration
//! 2. Group configuration (any depth)
//! 3. Sensor configuration (deepest, the only layer that sets identity keys)

mod effective;
mod error;
pub mod keys;
mod loader;
mod merge;

pub use effective::{KeyOrigin, MergedConfig};
pub use error::ConfigError;
pub use loader::{ConfigLayer, LayerSource};
pub use merge::{
    apply_defaults, filter_layer, merge_sensor_configuration, validate_merged, ConfigMap,
};
