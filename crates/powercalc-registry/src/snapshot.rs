//! In-memory registry snapshot
//!
//! Serves the three host lookups from a JSON document:
//!
//! ```json
//! {
//!   "entities": [{"entity_id": "light.kitchen", "domain": "light", "unique_id": "abc"}],
//!   "devices": [{"id": "dev-1", "name": "Hue Bulb"}],
//!   "states": [{"entity_id": "light.kitchen", "state": "on", "attributes": {}}]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SnapshotError;
use crate::lookup::MetadataLookup;
use crate::records::{DeviceEntry, EntityState, RegistryEntry};

/// On-disk shape of a snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    entities: Vec<RegistryEntry>,

    #[serde(default)]
    devices: Vec<DeviceEntry>,

    #[serde(default)]
    states: Vec<EntityState>,
}

/// Frozen copy of the host registries.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    entities: HashMap<String, Arc<RegistryEntry>>,
    devices: HashMap<String, Arc<DeviceEntry>>,
    states: HashMap<String, Arc<EntityState>>,
}

impl RegistrySnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            entities = snapshot.entities.len(),
            devices = snapshot.devices.len(),
            states = snapshot.states.len(),
            "loaded registry snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from a JSON string
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::from_records(file.entities, file.devices, file.states)
    }

    /// Build a snapshot from record lists, rejecting duplicate ids and
    /// entity ids without a domain separator.
    pub fn from_records(
        entities: Vec<RegistryEntry>,
        devices: Vec<DeviceEntry>,
        states: Vec<EntityState>,
    ) -> Result<Self, SnapshotError> {
        let mut snapshot = Self::default();

        for entry in entities {
            check_entity_id(&entry.entity_id)?;
            let id = entry.entity_id.clone();
            if snapshot.entities.insert(id.clone(), Arc::new(entry)).is_some() {
                return Err(SnapshotError::Duplicate { kind: "entity", id });
            }
        }

        for device in devices {
            let id = device.id.clone();
            if snapshot.devices.insert(id.clone(), Arc::new(device)).is_some() {
                return Err(SnapshotError::Duplicate { kind: "device", id });
            }
        }

        for state in states {
            check_entity_id(&state.entity_id)?;
            let id = state.entity_id.clone();
            if snapshot.states.insert(id.clone(), Arc::new(state)).is_some() {
                return Err(SnapshotError::Duplicate { kind: "state", id });
            }
        }

        snapshot.warn_dangling_devices();
        Ok(snapshot)
    }

    /// Dangling device links are legal in the host registry, so only warn.
    fn warn_dangling_devices(&self) {
        let known: HashSet<&str> = self.devices.keys().map(String::as_str).collect();
        for entry in self.entities.values() {
            if let Some(device_id) = entry.device_id.as_deref() {
                if !known.contains(device_id) {
                    warn!(
                        entity_id = %entry.entity_id,
                        device_id,
                        "entity references unknown device"
                    );
                }
            }
        }
    }

    /// Number of registered entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the snapshot holds no records at all
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.devices.is_empty() && self.states.is_empty()
    }
}

fn check_entity_id(entity_id: &str) -> Result<(), SnapshotError> {
    match entity_id.split_once('.') {
        Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => Ok(()),
        _ => Err(SnapshotError::MalformedEntityId(entity_id.to_string())),
    }
}

#[async_trait]
impl MetadataLookup for RegistrySnapshot {
    async fn entity_entry(&self, entity_id: &str) -> Option<Arc<RegistryEntry>> {
        self.entities.get(entity_id).cloned()
    }

    async fn device_entry(&self, device_id: &str) -> Option<Arc<DeviceEntry>> {
        self.devices.get(device_id).cloned()
    }

    async fn state(&self, entity_id: &str) -> Option<Arc<EntityState>> {
        self.states.get(entity_id).cloned()
    }
}
