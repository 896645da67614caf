use std::path::Path;

use levelmap_shared::{Level, OutlinePath, RegionRegistry, SeedTable, WorldExtent};
use serde::Deserialize;

use crate::error::AppError;

/// On-disk description of a map: extent, merged outline and the ordered regions.
#[derive(Debug, Clone, Deserialize)]
pub struct MapFile {
    pub extent: WorldExtent,
    pub outline: String,
    pub regions: Vec<RegionDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Interior point in world coordinates. Regions without one are never clickable.
    #[serde(default)]
    pub seed: Option<[f64; 2]>,
    #[serde(default)]
    pub level: Level,
}

/// Validated map ready to hand to the core.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub extent: WorldExtent,
    pub outline: OutlinePath,
    pub seeds: SeedTable,
    pub registry: RegionRegistry,
}

impl MapFile {
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn into_parts(self) -> Result<LoadedMap, AppError> {
        self.extent.validate()?;
        let outline = OutlinePath::parse(&self.outline)?;

        let mut registry = RegionRegistry::new();
        let mut seeds = SeedTable::new();
        for region in self.regions {
            let name = region.name.unwrap_or_else(|| region.id.clone());
            if !registry.insert(region.id.clone(), name, region.level) {
                return Err(AppError::DuplicateRegion(region.id));
            }
            if let Some([x, y]) = region.seed {
                seeds.insert(region.id, x, y)?;
            }
        }

        Ok(LoadedMap {
            extent: self.extent,
            outline,
            seeds,
            registry,
        })
    }
}
