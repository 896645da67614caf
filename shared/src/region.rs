use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::Level;

/// Anything that can report the current level of a region.
pub trait LevelLookup {
    fn level_of(&self, region: &str) -> Level;
}

impl LevelLookup for HashMap<String, Level> {
    fn level_of(&self, region: &str) -> Level {
        self.get(region).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub level: Level,
}

/// Ordered table of every tracked region with its display name and level.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    entries: Vec<RegionEntry>,
    index: HashMap<String, usize>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` without touching the registry if `id` is already present.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>, level: Level) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(RegionEntry {
            id,
            name: name.into(),
            level,
        });
        true
    }

    pub fn get(&self, id: &str) -> Option<&RegionEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Set a region's level, returning the previous one. `None` for unknown regions.
    pub fn set_level(&mut self, id: &str, level: Level) -> Option<Level> {
        let &i = self.index.get(id)?;
        Some(std::mem::replace(&mut self.entries[i].level, level))
    }

    /// Sum of every region's level.
    pub fn total_level(&self) -> u32 {
        self.entries.iter().map(|e| e.level.index() as u32).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LevelLookup for RegionRegistry {
    fn level_of(&self, region: &str) -> Level {
        self.get(region).map(|e| e.level).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub region: String,
    pub x: f64,
    pub y: f64,
}

/// Interior world coordinate per region, kept in insertion order.
///
/// Labels are handed out in this order, so it must not depend on hashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedTable {
    seeds: Vec<Seed>,
}

impl SeedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, x: f64, y: f64) -> Result<(), ConfigError> {
        let region = region.into();
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::InvalidSeed { region });
        }
        if self.contains(&region) {
            return Err(ConfigError::DuplicateSeed(region));
        }
        self.seeds.push(Seed { region, x, y });
        Ok(())
    }

    pub fn contains(&self, region: &str) -> bool {
        self.seeds.iter().any(|s| s.region == region)
    }

    pub fn get(&self, region: &str) -> Option<&Seed> {
        self.seeds.iter().find(|s| s.region == region)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seed> {
        self.seeds.iter()
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}
