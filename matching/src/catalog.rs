//! Pair-group catalog and difficulty levels.
//!
//! The catalog is static configuration: a set of pair-groups (each exactly two
//! asset ids) and an ordered list of levels, each naming the groups that make
//! up a round. It is validated once on construction and immutable afterwards.
//!
//! A catalog can be loaded from JSON:
//!
//! ```json
//! {
//!   "groups": { "A": ["sock_a1.png", "sock_a2.png"] },
//!   "levels": [{ "name": "easy", "label": "Easy (2 socks)", "groups": ["A"] }]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{AssetId, GroupKey, Item};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog defines no levels")]
    NoLevels,
    #[error("Level '{0}' has no pair-groups")]
    EmptyLevel(String),
    #[error("Level '{level}' references unknown group '{group}'")]
    UnknownGroup { level: String, group: GroupKey },
    #[error("Level '{level}' lists group '{group}' more than once")]
    DuplicateGroup { level: String, group: GroupKey },
    #[error("Duplicate level name: {0}")]
    DuplicateLevel(String),
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A difficulty level: a named slice of the catalog's pair-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub label: String,
    pub groups: Vec<GroupKey>,
}

impl Level {
    /// Number of tiles a round at this level has.
    pub fn item_count(&self) -> usize {
        self.groups.len() * 2
    }
}

/// On-disk shape, validated into a [`Catalog`].
#[derive(Debug, Deserialize)]
struct RawCatalog {
    groups: BTreeMap<GroupKey, [AssetId; 2]>,
    levels: Vec<Level>,
}

/// Validated pair-group catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: BTreeMap<GroupKey, [AssetId; 2]>,
    levels: Vec<Level>,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(
        groups: BTreeMap<GroupKey, [AssetId; 2]>,
        levels: Vec<Level>,
    ) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::NoLevels);
        }

        let mut names = HashSet::new();
        for level in &levels {
            if !names.insert(level.name.as_str()) {
                return Err(CatalogError::DuplicateLevel(level.name.clone()));
            }
            if level.groups.is_empty() {
                return Err(CatalogError::EmptyLevel(level.name.clone()));
            }

            let mut seen = HashSet::new();
            for group in &level.groups {
                if !groups.contains_key(group) {
                    return Err(CatalogError::UnknownGroup {
                        level: level.name.clone(),
                        group: group.clone(),
                    });
                }
                if !seen.insert(group) {
                    return Err(CatalogError::DuplicateGroup {
                        level: level.name.clone(),
                        group: group.clone(),
                    });
                }
            }
        }

        Ok(Self { groups, levels })
    }

    /// The sock catalog shipped with the activity.
    pub fn builtin() -> Self {
        let groups: BTreeMap<GroupKey, [AssetId; 2]> = BTreeMap::from([
            (GroupKey::from("A"), ["sock_a1.png".into(), "sock_a2.png".into()]),
            (GroupKey::from("B"), ["sock_b1.png".into(), "sock_b2.png".into()]),
            (GroupKey::from("C"), ["sock_c1.png".into(), "sock_c2.png".into()]),
        ]);
        let levels = vec![
            Level {
                name: "easy".to_string(),
                label: "Easy (4 socks)".to_string(),
                groups: vec!["A".into(), "B".into()],
            },
            Level {
                name: "medium".to_string(),
                label: "Medium (6 socks)".to_string(),
                groups: vec!["A".into(), "B".into(), "C".into()],
            },
        ];

        Self { groups, levels }
    }

    /// Parse and validate a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.groups, raw.levels)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded catalog from {} ({} levels)",
            path.display(),
            catalog.levels.len()
        );
        Ok(catalog)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, name: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.name == name)
    }

    /// First level in catalog order. Validation guarantees there is one.
    pub fn default_level(&self) -> &Level {
        &self.levels[0]
    }

    /// The two assets of a pair-group.
    pub fn group(&self, key: &GroupKey) -> Option<&[AssetId; 2]> {
        self.groups.get(key)
    }

    /// Full item list for a level, in catalog order (two items per group).
    pub fn items_for(&self, level: &str) -> Option<Vec<Item>> {
        let level = self.level(level)?;
        let mut items = Vec::with_capacity(level.item_count());
        for key in &level.groups {
            let assets = self.groups.get(key)?;
            items.extend(assets.iter().map(|asset| Item {
                asset: asset.clone(),
                group: key.clone(),
            }));
        }
        Some(items)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
