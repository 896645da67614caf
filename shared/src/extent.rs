use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stroke width as a fraction of the larger buffer side.
pub const STROKE_RATIO: f32 = 0.012;

/// The fixed logical rectangle the outline path and the seeds are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldExtent {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Result<Self, ConfigError> {
        let extent = Self {
            min_x,
            min_y,
            width,
            height,
        };
        extent.validate()?;
        Ok(extent)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::DegenerateExtent {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Map world coordinates into a `width` x `height` pixel buffer.
    pub fn to_pixel(&self, wx: f64, wy: f64, width: u32, height: u32) -> (f64, f64) {
        (
            (wx - self.min_x) / self.width * width as f64,
            (wy - self.min_y) / self.height * height as f64,
        )
    }
}

/// Boundary stroke width in device pixels for a buffer of the given size.
pub fn stroke_width_for(width: u32, height: u32) -> f32 {
    width.max(height) as f32 * STROKE_RATIO
}
