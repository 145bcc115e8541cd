//! Test fixtures for integration tests
//!
//! - Registry snapshot with a registered light (device + live state) and a
//!   registered switch without state
//! - Configuration layers: global (TOML), group (TOML), sensor (JSON)

#![allow(dead_code)]

use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Path to the registry snapshot fixture
pub fn registry_snapshot_path() -> PathBuf {
    fixtures_dir().join("registry.json")
}

/// Paths to the layer fixtures, broadest first
pub fn layer_paths() -> Vec<PathBuf> {
    let layers = fixtures_dir().join("layers");
    vec![
        layers.join("global.toml"),
        layers.join("group.toml"),
        layers.join("sensor.json"),
    ]
}
