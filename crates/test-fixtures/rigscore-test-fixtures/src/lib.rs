//! Shared rigs and a reference pose evaluator for tests and benches.
//!
//! JSON rigs live under the workspace `fixtures/` directory and are indexed by
//! `fixtures/manifest.json`; [`RigBuilder`] covers rigs that are easier to state in code.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub mod builder;
pub mod evaluator;

pub use builder::{AnimationBuilder, RigBuilder};
pub use evaluator::KeyframeEvaluator;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    rigs: HashMap<String, RigEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RigEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        #[allow(dead_code)]
        description: Option<String>,
    },
}

impl RigEntry {
    fn as_path(&self) -> &str {
        match self {
            RigEntry::Path(path) => path,
            RigEntry::Detailed { path, .. } => path,
        }
    }
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

fn lookup(name: &str) -> Result<&'static RigEntry> {
    MANIFEST
        .rigs
        .get(name)
        .ok_or_else(|| anyhow!("unknown rig fixture '{name}'"))
}

pub mod rigs {
    use super::*;
    use rigscore_rig_core::Rig;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.rigs.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(name)?.as_path())
    }

    pub fn load(name: &str) -> Result<Rig> {
        let rel = lookup(name)?.as_path();
        let text = read_to_string(rel)?;
        let rig: Rig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse rig fixture {rel}"))?;
        log::debug!(
            "loaded rig fixture '{}' ({} bones, {} animations)",
            rig.name,
            rig.bones.len(),
            rig.animations.len()
        );
        Ok(rig)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(name)?.as_path()))
    }

    /// Load `name` and wrap it in a [`KeyframeEvaluator`].
    pub fn evaluator(name: &str) -> Result<KeyframeEvaluator> {
        load(name).map(KeyframeEvaluator::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_rig_parses() {
        for key in rigs::keys() {
            rigs::load(&key).unwrap_or_else(|e| panic!("{key}: {e:#}"));
        }
    }

    #[test]
    fn json_and_path_point_at_the_same_file() {
        let text = rigs::json("hero").unwrap();
        let path = rigs::path("hero").unwrap();
        assert!(path.ends_with("rigs/hero.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), text);
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        assert!(rigs::load("no-such-rig").is_err());
    }
}
