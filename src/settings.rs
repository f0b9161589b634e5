use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const SOURCE_CANDIDATES: &[&str] = &["data/aesopa10.txt", "../data/aesopa10.txt", "aesopa10.txt"];
const COLLECTION_CANDIDATES: &[&str] = &[
    "data/collection.json",
    "../data/collection.json",
    "collection.json",
];

/// File locations, read from an optional `anthology.{toml,json,yaml}` and
/// `ANTHOLOGY_*` environment variables (environment wins).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: Option<PathBuf>,
    pub collection: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("anthology").required(false))
            .add_source(Environment::with_prefix("ANTHOLOGY"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn source_path(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| first_existing(SOURCE_CANDIDATES))
    }

    pub fn collection_path(&self) -> PathBuf {
        self.collection
            .clone()
            .unwrap_or_else(|| first_existing(COLLECTION_CANDIDATES))
    }
}

fn first_existing(candidates: &[&str]) -> PathBuf {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(candidates[0]))
}
