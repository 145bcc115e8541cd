//! Powercalc Registry Types
//!
//! Read-only views of the host's entity registry, device registry and live
//! state machine, plus an in-memory snapshot that serves all three lookups.

pub mod error;
pub mod lookup;
pub mod records;
pub mod snapshot;

pub use error::SnapshotError;
pub use lookup::{EmptyRegistry, MetadataLookup};
pub use records::{DeviceEntry, EntityState, RegistryEntry};
pub use snapshot::RegistrySnapshot;

/// Capability and state attribute listing the color modes a light supports.
pub const ATTR_SUPPORTED_COLOR_MODES: &str = "supported_color_modes";

/// State attribute carrying the user-facing name of an entity.
pub const ATTR_FRIENDLY_NAME: &str = "friendly_name";
