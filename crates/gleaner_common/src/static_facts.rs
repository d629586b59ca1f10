//! Static facts file handling.
//!
//! Facts that cannot be derived from live command output are maintained per
//! target in a YAML file and merged underneath whatever the device reports.
//! Top-level format: mapping from target identifier to `{ facts: {...} }`.
//! The snapshot step produces the same format from an inventory document.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::payload::FactSet;
use crate::processor::StaticFactsLookup;

/// One target's entry in the static facts file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFactsEntry {
    #[serde(default)]
    pub facts: FactSet,
}

/// The static facts file, keyed by target identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFacts(pub BTreeMap<String, StaticFactsEntry>);

impl StaticFacts {
    /// Read and parse the file. A failure here is fleet-fatal: a broken
    /// static facts file blocks every target uniformly.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read static facts file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid static facts file {}", path.display()))
    }

    /// Resolve one target's entry.
    pub fn lookup(&self, target: &str) -> StaticFactsLookup<'_> {
        match self.0.get(target) {
            Some(entry) => StaticFactsLookup::Entry(&entry.facts),
            None => StaticFactsLookup::Missing,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)
            .with_context(|| format!("failed to write static facts file {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inventory document consumed by the snapshot step: the fleet's targets
/// with whatever facts are already known about them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub targets: Vec<InventoryTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTarget {
    pub name: String,
    #[serde(default)]
    pub facts: FactSet,
}

impl Inventory {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read inventory {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid inventory {}", path.display()))
    }
}

/// Freeze an inventory's known facts into the static facts file format.
pub fn snapshot(inventory: &Inventory) -> StaticFacts {
    StaticFacts(
        inventory
            .targets
            .iter()
            .map(|target| {
                (
                    target.name.clone(),
                    StaticFactsEntry {
                        facts: target.facts.clone(),
                    },
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fgt-a:\n  facts:\n    site: hq\n    rack: b12\nfgt-b:\n  facts: {{}}").unwrap();

        let facts = StaticFacts::load(file.path()).unwrap();
        assert_eq!(facts.len(), 2);

        match facts.lookup("fgt-a") {
            StaticFactsLookup::Entry(set) => {
                assert_eq!(set.get("site").map(String::as_str), Some("hq"));
            }
            other => panic!("expected entry, got {:?}", other),
        }
        assert!(matches!(facts.lookup("fgt-c"), StaticFactsLookup::Missing));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fgt-a: [not, a, mapping]").unwrap();
        assert!(StaticFacts::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(StaticFacts::load(Path::new("/nonexistent/facts.yaml")).is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static_facts.yaml");

        let mut inventory_facts = FactSet::new();
        inventory_facts.insert("site".to_string(), "hq".to_string());
        let inventory = Inventory {
            targets: vec![InventoryTarget {
                name: "fgt-a".to_string(),
                facts: inventory_facts,
            }],
        };

        snapshot(&inventory).write(&path).unwrap();

        let reloaded = StaticFacts::load(&path).unwrap();
        match reloaded.lookup("fgt-a") {
            StaticFactsLookup::Entry(set) => {
                assert_eq!(set.get("site").map(String::as_str), Some("hq"));
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_inventory_target_without_facts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "targets:\n  - name: fgt-a").unwrap();

        let inventory = Inventory::load(file.path()).unwrap();
        assert_eq!(inventory.targets.len(), 1);
        assert!(inventory.targets[0].facts.is_empty());
    }
}
