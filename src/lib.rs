//! Powercalc configuration core
//!
//! Resolves the source entity a power sensor is created for and merges the
//! layered sensor configuration (global, group, sensor) into the options of
//! that one sensor.

pub mod config;
pub mod entity;
pub mod validate;

pub use config::{merge_sensor_configuration, ConfigError, ConfigLayer, ConfigMap, MergedConfig};
pub use entity::{create_source_entity, SourceEntity, DUMMY_ENTITY_ID};
pub use powercalc_registry::{MetadataLookup, RegistrySnapshot};
pub use validate::{validate_is_number, validate_name_pattern, ValidationError};
