//! Registry records as the host persists them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ATTR_FRIENDLY_NAME, ATTR_SUPPORTED_COLOR_MODES};

/// A persisted entity registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Fully-qualified entity identifier (`domain.object_id`)
    pub entity_id: String,

    /// Domain the entity is registered under. Authoritative over the
    /// identifier prefix, which may be stale after a platform migration.
    pub domain: String,

    /// Stable identity assigned by the integration
    pub unique_id: String,

    /// Platform (integration) that created the entity
    #[serde(default)]
    pub platform: Option<String>,

    /// Name set by the user
    #[serde(default)]
    pub name: Option<String>,

    /// Name generated by the integration
    #[serde(default)]
    pub original_name: Option<String>,

    /// Static capabilities reported at registration time
    #[serde(default)]
    pub capabilities: Option<Map<String, Value>>,

    /// Parent device
    #[serde(default)]
    pub device_id: Option<String>,
}

impl RegistryEntry {
    /// User-set name, falling back to the integration-provided one
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.original_name.as_deref())
    }

    /// Color modes declared in the capability map, if any
    pub fn supported_color_modes(&self) -> Option<Vec<String>> {
        self.capabilities
            .as_ref()
            .and_then(|caps| caps.get(ATTR_SUPPORTED_COLOR_MODES))
            .and_then(string_list)
    }
}

/// A persisted device registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_by_user: Option<String>,

    #[serde(default)]
    pub manufacturer: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub area_id: Option<String>,
}

/// Snapshot of an entity's live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,

    /// Raw state value, e.g. `on`, `off`, `21.5`
    pub state: String,

    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    /// Name the host displays for this state.
    ///
    /// Uses the `friendly_name` attribute when set, otherwise the object id
    /// with underscores turned into spaces.
    pub fn name(&self) -> String {
        if let Some(name) = self.attributes.get(ATTR_FRIENDLY_NAME).and_then(Value::as_str) {
            return name.to_string();
        }
        let object_id = self
            .entity_id
            .split_once('.')
            .map(|(_, object_id)| object_id)
            .unwrap_or(&self.entity_id);
        object_id.replace('_', " ")
    }

    /// Color modes the entity currently reports
    pub fn supported_color_modes(&self) -> Option<Vec<String>> {
        self.attributes
            .get(ATTR_SUPPORTED_COLOR_MODES)
            .and_then(string_list)
    }
}

/// Accepts a JSON array of strings; anything else counts as absent.
fn string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}
