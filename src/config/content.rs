//! Default content loading from content.toml
//!
//! The entries defined in content.toml are seeded into the content store at
//! startup. Seeding never overwrites a value that has already been edited.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire content.toml file
#[derive(Debug, Deserialize, Default)]
pub struct ContentSeed {
    /// Default content entries
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

/// A single default `(section, key) -> value` entry
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    /// Section the entry belongs to
    pub section: String,
    /// Key within the section
    pub key: String,
    /// Default value
    pub value: String,
}

/// Loads the content seed from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<ContentSeed> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read content seed file: {e}"),
    })?;
    parse_seed(&contents)
}

/// Loads the content seed if the file exists; a missing file yields an empty seed.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_seed_if_present<P: AsRef<Path>>(path: P) -> Result<ContentSeed> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(?path, "No content seed file found, skipping default content");
        return Ok(ContentSeed::default());
    }
    load_seed(path)
}

fn parse_seed(contents: &str) -> Result<ContentSeed> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse content seed: {e}"),
    })
}
