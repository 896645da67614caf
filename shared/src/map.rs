use crate::buffer::PixelBuffer;
use crate::composite::composite_into;
use crate::error::ConfigError;
use crate::extent::WorldExtent;
use crate::labeler::SeedFailure;
use crate::mask::RegionMask;
use crate::outline::OutlinePath;
use crate::region::{LevelLookup, SeedTable};

/// Owns the static map configuration plus the per-resolution mask and output layer.
#[derive(Debug, Clone)]
pub struct MapContext {
    extent: WorldExtent,
    outline: OutlinePath,
    seeds: SeedTable,
    mask: RegionMask,
    output: PixelBuffer,
}

impl MapContext {
    pub fn new(
        extent: WorldExtent,
        outline: OutlinePath,
        seeds: SeedTable,
        width: u32,
        height: u32,
    ) -> Result<Self, ConfigError> {
        let mask = RegionMask::build(&outline, &extent, &seeds, width, height)?;
        let output = PixelBuffer::new(width, height)?;
        Ok(Self {
            extent,
            outline,
            seeds,
            mask,
            output,
        })
    }

    /// Rebuild the mask for a new resolution. On error the previous mask stays live.
    ///
    /// The output layer is cleared to the new size; callers recomposite afterwards.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<&[SeedFailure], ConfigError> {
        let mask = RegionMask::build(&self.outline, &self.extent, &self.seeds, width, height)?;
        let output = PixelBuffer::new(width, height)?;
        self.mask = mask;
        self.output = output;
        Ok(self.mask.failures())
    }

    pub fn resolve(&self, px: i64, py: i64) -> Option<&str> {
        self.mask.resolve(px, py)
    }

    pub fn recomposite(&mut self, levels: &impl LevelLookup) -> Result<&PixelBuffer, ConfigError> {
        composite_into(&mut self.output, &self.mask, levels)?;
        Ok(&self.output)
    }

    /// Pixel a seed lands on at the current resolution, before any fallback search.
    pub fn seed_pixel(&self, region: &str) -> Option<(i64, i64)> {
        let seed = self.seeds.get(region)?;
        let (px, py) = self
            .extent
            .to_pixel(seed.x, seed.y, self.mask.width(), self.mask.height());
        Some((px.round() as i64, py.round() as i64))
    }

    pub fn seeds(&self) -> &SeedTable {
        &self.seeds
    }

    pub fn mask(&self) -> &RegionMask {
        &self.mask
    }

    pub fn output(&self) -> &PixelBuffer {
        &self.output
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }
}
