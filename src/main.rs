//! Powercalc configuration CLI
//!
//! Entry point for the `powercalc` command-line tool.

use clap::{Parser, Subcommand};
use powercalc_config::config::{ConfigLayer, KeyOrigin, MergedConfig};
use powercalc_config::entity::create_source_entity;
use powercalc_config::validate::{validate_is_number, validate_name_pattern};
use powercalc_config::SourceEntity;
use powercalc_registry::{EmptyRegistry, MetadataLookup, RegistrySnapshot};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "powercalc")]
#[command(about = "Powercalc sensor configuration tools", version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge configuration layers (broadest first) into one sensor configuration
    Merge {
        /// Layer files, TOML or JSON
        #[arg(required = true)]
        layers: Vec<PathBuf>,

        /// Skip the entity/group check
        #[arg(long)]
        no_validate: bool,

        /// Output in JSON format, including provenance
        #[arg(long)]
        json: bool,
    },

    /// Resolve a source entity against a registry snapshot
    Resolve {
        /// Entity id, e.g. light.kitchen
        entity_id: String,

        /// Path to registry snapshot (JSON); empty registries when omitted
        #[arg(long, short = 's')]
        snapshot: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check a naming pattern contains {}
    CheckPattern { value: String },

    /// Check a value is a number
    CheckNumber { value: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Merge {
            layers,
            no_validate,
            json,
        } => {
            run_merge(&layers, !no_validate, json);
        }
        Commands::Resolve {
            entity_id,
            snapshot,
            json,
        } => {
            run_resolve(&entity_id, snapshot, json).await;
        }
        Commands::CheckPattern { value } => match validate_name_pattern(&value) {
            Ok(_) => println!("Naming pattern valid: {}", value),
            Err(e) => {
                eprintln!("Invalid: {}", e);
                process::exit(1);
            }
        },
        Commands::CheckNumber { value } => match validate_is_number(&value) {
            Ok(_) => println!("Number valid: {}", value),
            Err(e) => {
                eprintln!("Invalid: {}", e);
                process::exit(1);
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run_merge(paths: &[PathBuf], validate: bool, json_output: bool) {
    let mut layers = Vec::with_capacity(paths.len());
    for path in paths {
        match ConfigLayer::load(path) {
            Ok(layer) => layers.push(layer),
            Err(e) => {
                eprintln!("Error loading layer: {}", e);
                process::exit(1);
            }
        }
    }

    let merged = match MergedConfig::build(&layers, validate) {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    debug!(options = merged.config.len(), "merged configuration");

    if json_output {
        match merged.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if merged.config.is_empty() {
        println!("No options.");
        return;
    }

    println!("Merged configuration ({} options):\n", merged.config.len());
    for (key, value) in &merged.config {
        let origin = match merged.origin(key) {
            Some(KeyOrigin::Layer { index }) => paths
                .get(*index)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("layer {}", index)),
            _ => "default".to_string(),
        };
        println!("  {} = {}    ({})", key, value, origin);
    }
}

async fn run_resolve(entity_id: &str, snapshot_path: Option<PathBuf>, json_output: bool) {
    let lookup: Box<dyn MetadataLookup> = match snapshot_path {
        Some(path) => match RegistrySnapshot::load(&path) {
            Ok(snapshot) => Box::new(snapshot),
            Err(e) => {
                eprintln!("Error loading registry snapshot: {}", e);
                process::exit(1);
            }
        },
        None => Box::new(EmptyRegistry),
    };

    let source_entity = match create_source_entity(entity_id, lookup.as_ref()).await {
        Ok(entity) => entity,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&source_entity_json(&source_entity)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_source_entity(&source_entity);
    }
}

fn source_entity_json(entity: &SourceEntity) -> serde_json::Value {
    serde_json::json!({
        "entity_id": entity.entity_id,
        "object_id": entity.object_id,
        "domain": entity.domain,
        "unique_id": entity.unique_id,
        "name": entity.name,
        "supported_color_modes": entity.supported_color_modes,
        "entity_entry": entity.entity_entry.as_deref(),
        "device_entry": entity.device_entry.as_deref(),
    })
}

fn print_source_entity(entity: &SourceEntity) {
    println!("{}", entity.entity_id);
    if entity.is_dummy() {
        println!("  Placeholder entity (no registry lookups)");
        return;
    }
    println!("  Domain: {}", entity.domain);
    println!("  Object ID: {}", entity.object_id);
    if let Some(ref name) = entity.name {
        println!("  Name: {}", name);
    }
    if let Some(ref unique_id) = entity.unique_id {
        println!("  Unique ID: {}", unique_id);
    }
    if !entity.supported_color_modes.is_empty() {
        println!("  Color modes: {}", entity.supported_color_modes.join(", "));
    }
    if let Some(ref device) = entity.device_entry {
        let device_name = device
            .name_by_user
            .as_deref()
            .or(device.name.as_deref())
            .unwrap_or(&device.id);
        println!("  Device: {}", device_name);
    }
    if entity.entity_entry.is_none() {
        println!("  (not in entity registry)");
    }
}
