//! Sensor configuration key vocabulary

/// Display name of the created sensor
pub const CONF_NAME: &str = "name";

/// Source entity the sensor is created for
pub const CONF_ENTITY_ID: &str = "entity_id";

pub const CONF_UNIQUE_ID: &str = "unique_id";

/// Existing power sensor to build energy sensors on
pub const CONF_POWER_SENSOR_ID: &str = "power_sensor_id";

pub const CONF_CREATE_ENERGY_SENSOR: &str = "create_energy_sensor";

/// Plural spelling still accepted for `create_energy_sensor`
pub const CONF_CREATE_ENERGY_SENSORS: &str = "create_energy_sensors";

pub const CONF_CREATE_GROUP: &str = "create_group";

/// Fixed daily energy sub-configuration
pub const CONF_DAILY_FIXED_ENERGY: &str = "daily_fixed_energy";

/// Keys that only take effect on the deepest configuration layer.
///
/// Outer layers usually apply to a whole group of sensors, where these would
/// collide.
pub const IDENTITY_KEYS: [&str; 4] = [
    CONF_NAME,
    CONF_ENTITY_ID,
    CONF_UNIQUE_ID,
    CONF_POWER_SENSOR_ID,
];
