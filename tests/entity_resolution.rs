//! Source entity resolution tests
//!
//! Covers the name precedence (live state > registry > derived), live state
//! color modes replacing registry capabilities, and the placeholder
//! short-circuit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use powercalc_config::entity::{create_source_entity, EntityIdError, DUMMY_ENTITY_ID};
use powercalc_registry::{
    DeviceEntry, EmptyRegistry, EntityState, MetadataLookup, RegistryEntry, RegistrySnapshot,
};

mod fixtures;

/// Lookup that records how often it was queried
#[derive(Default)]
struct CountingLookup {
    inner: RegistrySnapshot,
    calls: AtomicUsize,
}

impl CountingLookup {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataLookup for CountingLookup {
    async fn entity_entry(&self, entity_id: &str) -> Option<Arc<RegistryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.entity_entry(entity_id).await
    }

    async fn device_entry(&self, device_id: &str) -> Option<Arc<DeviceEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.device_entry(device_id).await
    }

    async fn state(&self, entity_id: &str) -> Option<Arc<EntityState>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.state(entity_id).await
    }
}

fn entry(entity_id: &str, domain: &str) -> RegistryEntry {
    RegistryEntry {
        entity_id: entity_id.to_string(),
        domain: domain.to_string(),
        unique_id: format!("uid-{}", entity_id),
        platform: None,
        name: None,
        original_name: None,
        capabilities: None,
        device_id: None,
    }
}

fn state(entity_id: &str, attributes: serde_json::Value) -> EntityState {
    EntityState {
        entity_id: entity_id.to_string(),
        state: "on".to_string(),
        attributes: attributes.as_object().cloned().unwrap_or_default(),
    }
}

#[tokio::test]
async fn test_placeholder_performs_no_lookups() {
    let lookup = CountingLookup::default();

    let entity = create_source_entity(DUMMY_ENTITY_ID, &lookup).await.unwrap();

    assert_eq!(entity.entity_id, DUMMY_ENTITY_ID);
    assert_eq!(entity.object_id, DUMMY_ENTITY_ID);
    assert_eq!(entity.domain, DUMMY_ENTITY_ID);
    assert!(entity.is_dummy());
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn test_unregistered_entity_uses_derived_defaults() {
    let entity = create_source_entity("light.living_room_lamp", &EmptyRegistry)
        .await
        .unwrap();

    assert_eq!(entity.domain, "light");
    assert_eq!(entity.object_id, "living_room_lamp");
    assert_eq!(entity.name.as_deref(), Some("living room lamp"));
    assert_eq!(entity.unique_id, None);
    assert!(entity.supported_color_modes.is_empty());
    assert!(entity.entity_entry.is_none());
    assert!(entity.device_entry.is_none());
}

#[tokio::test]
async fn test_registry_domain_overrides_identifier_prefix() {
    let snapshot =
        RegistrySnapshot::from_records(vec![entry("light.heater", "sensor")], vec![], vec![])
            .unwrap();

    let entity = create_source_entity("light.heater", &snapshot).await.unwrap();

    assert_eq!(entity.domain, "sensor");
    assert_eq!(entity.object_id, "heater");
    assert_eq!(entity.unique_id.as_deref(), Some("uid-light.heater"));
}

#[tokio::test]
async fn test_registry_name_and_capabilities() {
    let mut registered = entry("light.kitchen", "light");
    registered.original_name = Some("Hue Ceiling".to_string());
    registered.capabilities = json!({"supported_color_modes": ["hs", "color_temp"]})
        .as_object()
        .cloned();

    let snapshot = RegistrySnapshot::from_records(vec![registered], vec![], vec![]).unwrap();
    let entity = create_source_entity("light.kitchen", &snapshot).await.unwrap();

    assert_eq!(entity.name.as_deref(), Some("Hue Ceiling"));
    assert_eq!(entity.supported_color_modes, vec!["hs", "color_temp"]);
    assert!(entity.entity_entry.is_some());
}

#[tokio::test]
async fn test_registered_entity_without_names_has_no_name() {
    let snapshot =
        RegistrySnapshot::from_records(vec![entry("switch.pump", "switch")], vec![], vec![])
            .unwrap();

    let entity = create_source_entity("switch.pump", &snapshot).await.unwrap();

    assert_eq!(entity.name, None);
}

#[tokio::test]
async fn test_live_state_overrides_registry() {
    let mut registered = entry("light.kitchen", "light");
    registered.name = Some("Registry Name".to_string());
    registered.capabilities = json!({"supported_color_modes": ["onoff"]}).as_object().cloned();

    let live = state(
        "light.kitchen",
        json!({"friendly_name": "State Name", "supported_color_modes": ["brightness", "xy"]}),
    );

    let snapshot = RegistrySnapshot::from_records(vec![registered], vec![], vec![live]).unwrap();
    let entity = create_source_entity("light.kitchen", &snapshot).await.unwrap();

    assert_eq!(entity.name.as_deref(), Some("State Name"));
    assert_eq!(entity.supported_color_modes, vec!["brightness", "xy"]);
}

#[tokio::test]
async fn test_state_without_color_modes_clears_registry_modes() {
    let mut registered = entry("light.kitchen", "light");
    registered.capabilities = json!({"supported_color_modes": ["hs"]}).as_object().cloned();
    let live = state("light.kitchen", json!({"friendly_name": "Kitchen"}));

    let snapshot = RegistrySnapshot::from_records(vec![registered], vec![], vec![live]).unwrap();
    let entity = create_source_entity("light.kitchen", &snapshot).await.unwrap();

    assert_eq!(entity.name.as_deref(), Some("Kitchen"));
    assert!(entity.supported_color_modes.is_empty());
}

#[tokio::test]
async fn test_state_only_entity() {
    let live = state("sensor.outdoor_temp", json!({}));
    let snapshot = RegistrySnapshot::from_records(vec![], vec![], vec![live]).unwrap();

    let entity = create_source_entity("sensor.outdoor_temp", &snapshot).await.unwrap();

    assert_eq!(entity.name.as_deref(), Some("outdoor temp"));
    assert_eq!(entity.unique_id, None);
}

#[tokio::test]
async fn test_device_entry_resolved() {
    let mut registered = entry("light.kitchen", "light");
    registered.device_id = Some("dev-1".to_string());
    let device = DeviceEntry {
        id: "dev-1".to_string(),
        name: Some("Hue Bulb".to_string()),
        name_by_user: None,
        manufacturer: Some("Signify".to_string()),
        model: Some("LCT015".to_string()),
        area_id: None,
    };

    let snapshot =
        RegistrySnapshot::from_records(vec![registered], vec![device], vec![]).unwrap();
    let entity = create_source_entity("light.kitchen", &snapshot).await.unwrap();

    let device = entity.device_entry.expect("device should be resolved");
    assert_eq!(device.model.as_deref(), Some("LCT015"));
}

#[tokio::test]
async fn test_dangling_device_link_is_absent() {
    let mut registered = entry("light.kitchen", "light");
    registered.device_id = Some("dev-gone".to_string());

    let snapshot = RegistrySnapshot::from_records(vec![registered], vec![], vec![]).unwrap();
    let entity = create_source_entity("light.kitchen", &snapshot).await.unwrap();

    assert!(entity.entity_entry.is_some());
    assert!(entity.device_entry.is_none());
}

#[tokio::test]
async fn test_unregistered_entity_skips_device_lookup() {
    let lookup = CountingLookup::default();

    create_source_entity("light.kitchen", &lookup).await.unwrap();

    // entity registry + state
    assert_eq!(lookup.calls(), 2);
}

#[tokio::test]
async fn test_identifier_without_separator_fails() {
    let result = create_source_entity("kitchen", &EmptyRegistry).await;
    assert_eq!(result, Err(EntityIdError::Invalid("kitchen".to_string())));
}

#[tokio::test]
async fn test_fixture_snapshot() {
    let snapshot = RegistrySnapshot::load(&fixtures::registry_snapshot_path()).unwrap();
    let lookup = Arc::new(snapshot);

    let entity = create_source_entity("light.office_desk", &lookup).await.unwrap();

    assert_eq!(entity.name.as_deref(), Some("Desk Lamp"));
    assert_eq!(entity.supported_color_modes, vec!["color_temp"]);
    assert_eq!(
        entity.device_entry.and_then(|d| d.manufacturer.clone()).as_deref(),
        Some("IKEA of Sweden")
    );
}
