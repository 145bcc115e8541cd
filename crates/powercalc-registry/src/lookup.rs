//! Lookup seam between powercalc and the host registries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::records::{DeviceEntry, EntityState, RegistryEntry};

/// Read-only access to the host's entity registry, device registry and
/// state machine.
///
/// Every lookup may suspend. A missing record is `None`, never an error.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Entity registry record for `entity_id`
    async fn entity_entry(&self, entity_id: &str) -> Option<Arc<RegistryEntry>>;

    /// Device registry record for `device_id`
    async fn device_entry(&self, device_id: &str) -> Option<Arc<DeviceEntry>>;

    /// Current state of `entity_id`
    async fn state(&self, entity_id: &str) -> Option<Arc<EntityState>>;
}

/// Lookup with nothing registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

#[async_trait]
impl MetadataLookup for EmptyRegistry {
    async fn entity_entry(&self, _entity_id: &str) -> Option<Arc<RegistryEntry>> {
        None
    }

    async fn device_entry(&self, _device_id: &str) -> Option<Arc<DeviceEntry>> {
        None
    }

    async fn state(&self, _entity_id: &str) -> Option<Arc<EntityState>> {
        None
    }
}

#[async_trait]
impl<T: MetadataLookup + ?Sized> MetadataLookup for Arc<T> {
    async fn entity_entry(&self, entity_id: &str) -> Option<Arc<RegistryEntry>> {
        (**self).entity_entry(entity_id).await
    }

    async fn device_entry(&self, device_id: &str) -> Option<Arc<DeviceEntry>> {
        (**self).device_entry(device_id).await
    }

    async fn state(&self, entity_id: &str) -> Option<Arc<EntityState>> {
        (**self).state(entity_id).await
    }
}
