//! Resolution of an entity id into a [`SourceEntity`].

use powercalc_registry::MetadataLookup;
use tracing::{debug, trace};

use super::{split_entity_id, EntityIdError, SourceEntity, DUMMY_ENTITY_ID};

/// Value fed by an ordered list of sources; the last source that has a
/// value wins.
#[derive(Debug)]
struct Layered<T>(Option<T>);

impl<T> Layered<T> {
    fn new() -> Self {
        Self(None)
    }

    fn offer(&mut self, value: Option<T>) {
        if value.is_some() {
            self.0 = value;
        }
    }

    fn into_inner(self) -> Option<T> {
        self.0
    }
}

/// Create the descriptor of the source entity `entity_id`.
///
/// The name comes from the live state if there is one, then the entity
/// registry, then the identifier itself. Color modes are taken from the live
/// state when there is one (empty if it reports none), otherwise from the
/// registry capabilities. The domain comes from the registry when the entity
/// is registered.
///
/// Missing registry data never fails the resolution; only an identifier
/// without a domain separator does.
pub async fn create_source_entity<L>(
    entity_id: &str,
    lookup: &L,
) -> Result<SourceEntity, EntityIdError>
where
    L: MetadataLookup + ?Sized,
{
    if entity_id == DUMMY_ENTITY_ID {
        return Ok(SourceEntity::dummy());
    }

    let (domain, object_id) = split_entity_id(entity_id)?;
    let mut domain = domain.to_string();
    let mut unique_id = None;
    let mut name = Layered::new();
    let mut color_modes = Vec::new();
    let mut device_entry = None;

    let entity_entry = lookup.entity_entry(entity_id).await;
    match &entity_entry {
        Some(entry) => {
            trace!(entity_id, domain = %entry.domain, "found entity registry entry");
            domain = entry.domain.clone();
            unique_id = Some(entry.unique_id.clone());
            name.offer(entry.display_name().map(str::to_string));
            color_modes = entry.supported_color_modes().unwrap_or_default();

            if let Some(device_id) = entry.device_id.as_deref() {
                device_entry = lookup.device_entry(device_id).await;
                if device_entry.is_none() {
                    debug!(entity_id, device_id, "device not found in device registry");
                }
            }
        }
        None => {
            name.offer(Some(object_id.replace('_', " ")));
        }
    }

    if let Some(state) = lookup.state(entity_id).await {
        trace!(entity_id, state = %state.state, "found live state");
        name.offer(Some(state.name()));
        color_modes = state.supported_color_modes().unwrap_or_default();
    }

    let source_entity = SourceEntity {
        object_id: object_id.to_string(),
        entity_id: entity_id.to_string(),
        domain,
        unique_id,
        name: name.into_inner(),
        supported_color_modes: color_modes,
        entity_entry,
        device_entry,
    };
    debug!(
        entity_id,
        domain = %source_entity.domain,
        name = ?source_entity.name,
        registered = source_entity.entity_entry.is_some(),
        "resolved source entity"
    );
    Ok(source_entity)
}
