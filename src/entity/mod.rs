//! Source entity resolution
//!
//! A source entity is the host entity a power sensor is built for. Its
//! descriptor combines the entity id with whatever the host registries know
//! about it:
//! 1. Identifier parse (domain, object id, derived name)
//! 2. Entity registry record (domain, unique id, names, capabilities, device)
//! 3. Live state (current name and color modes)

mod resolver;

use std::sync::{Arc, OnceLock};

use powercalc_registry::{DeviceEntry, RegistryEntry};
use regex_lite::Regex;

pub use resolver::create_source_entity;

/// Placeholder entity used by virtual, state-less configurations such as a
/// fixed daily energy. It has no domain separator, so no real entity id can
/// be equal to it.
pub const DUMMY_ENTITY_ID: &str = "dummy";

/// Descriptor of a resolved source entity
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntity {
    /// Local part of the entity id
    pub object_id: String,

    /// Fully-qualified entity id as requested
    pub entity_id: String,

    /// Resolved domain
    pub domain: String,

    pub unique_id: Option<String>,

    /// Display name
    pub name: Option<String>,

    /// Color modes the entity supports, empty when unknown
    pub supported_color_modes: Vec<String>,

    /// Entity registry record, shared with the host
    pub entity_entry: Option<Arc<RegistryEntry>>,

    /// Device registry record of the parent device
    pub device_entry: Option<Arc<DeviceEntry>>,
}

impl SourceEntity {
    /// Descriptor for the placeholder entity
    pub fn dummy() -> Self {
        Self {
            object_id: DUMMY_ENTITY_ID.to_string(),
            entity_id: DUMMY_ENTITY_ID.to_string(),
            domain: DUMMY_ENTITY_ID.to_string(),
            unique_id: None,
            name: None,
            supported_color_modes: Vec::new(),
            entity_entry: None,
            device_entry: None,
        }
    }

    /// Check if this descriptor stands for the placeholder entity
    pub fn is_dummy(&self) -> bool {
        self.entity_id == DUMMY_ENTITY_ID
    }
}

/// Errors for identifiers that cannot be split into domain and object id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    #[error("Invalid entity id: '{0}'")]
    Invalid(String),
}

/// Split an entity id into `(domain, object_id)` on the first `.`
pub fn split_entity_id(entity_id: &str) -> Result<(&str, &str), EntityIdError> {
    match entity_id.split_once('.') {
        Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => {
            Ok((domain, object_id))
        }
        _ => Err(EntityIdError::Invalid(entity_id.to_string())),
    }
}

fn entity_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9_]+\.[a-z0-9_]+$").expect("entity id pattern is valid")
    })
}

/// Check an entity id against the host's naming rules.
///
/// Lowercase alphanumerics and underscores on both sides of a single `.`,
/// no part starting or ending with `_`, and no `__` anywhere.
pub fn is_valid_entity_id(entity_id: &str) -> bool {
    if !entity_id_pattern().is_match(entity_id) || entity_id.contains("__") {
        return false;
    }
    entity_id
        .split('.')
        .all(|part| !part.starts_with('_') && !part.ends_with('_'))
}
