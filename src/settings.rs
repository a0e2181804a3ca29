use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "artwork_normalizer";
const ENV_PREFIX: &str = "ARTWORK";

/// Defaults, overridden by `artwork_normalizer.toml`, overridden by
/// `ARTWORK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub raw_dir: PathBuf,
    pub enriched_dir: PathBuf,
    pub chunk_size: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        build(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }
}

fn build(env: Environment) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .set_default("input", "data/uuid_enriched_data/uuid_enriched.json")?
        .set_default("raw_dir", "data/normalized/raw")?
        .set_default("enriched_dir", "data/normalized/enriched")?
        .set_default("chunk_size", 500)?
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(env)
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;
    anyhow::ensure!(settings.chunk_size > 0, "chunk_size must be positive");
    Ok(settings)
}
