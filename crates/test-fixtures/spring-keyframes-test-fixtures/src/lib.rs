use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    syntheses: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup(name: &str) -> Result<&'static str> {
    MANIFEST
        .syntheses
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown synthesis fixture '{name}'"))
}

/// Synthesis requests paired with the blocks they must produce.
///
/// Each file holds `{"request": {...}, "expected": {...}}`; the request half
/// is a serialized synthesis request.
pub mod syntheses {
    use super::*;

    /// Expectations stored next to a request.
    #[derive(Debug, Clone, Deserialize)]
    pub struct Expected {
        pub first_block: String,
        pub last_block: String,
        #[serde(default)]
        pub tweened: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Entry {
        request: serde_json::Value,
        expected: Expected,
    }

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.syntheses.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Request half of the fixture as JSON text.
    pub fn request_json(name: &str) -> Result<String> {
        let entry: Entry = super::load_json(lookup(name)?)?;
        serde_json::to_string(&entry.request)
            .with_context(|| format!("failed to re-encode request of fixture {name}"))
    }

    pub fn request<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry: Entry = super::load_json(lookup(name)?)?;
        serde_json::from_value(entry.request)
            .with_context(|| format!("failed to decode request of fixture {name}"))
    }

    pub fn expected(name: &str) -> Result<Expected> {
        let entry: Entry = super::load_json(lookup(name)?)?;
        Ok(entry.expected)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(name)?))
    }
}
