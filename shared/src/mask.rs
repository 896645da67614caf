use tracing::info;

use crate::buffer::PixelBuffer;
use crate::error::ConfigError;
use crate::extent::{WorldExtent, stroke_width_for};
use crate::labeler::{LabelReport, LabelTable, SeedFailure, label_regions};
use crate::outline::{OutlinePath, paint_boundary};
use crate::region::SeedTable;

/// Per-pixel region identity for one buffer resolution.
///
/// A single allocation is used for both phases: [`paint_boundary`] first fills it
/// with the boundary stroke, then [`label_regions`] floods it in place, so the
/// finished buffer is a label map whose red channel holds the label (0 for
/// boundary or unreached pixels). Rebuilt from scratch on every resize.
#[derive(Debug, Clone)]
pub struct RegionMask {
    labels: PixelBuffer,
    report: LabelReport,
}

impl RegionMask {
    /// Build with the resolution-scaled stroke width.
    pub fn build(
        outline: &OutlinePath,
        extent: &WorldExtent,
        seeds: &SeedTable,
        width: u32,
        height: u32,
    ) -> Result<Self, ConfigError> {
        let stroke_width = stroke_width_for(width, height);
        Self::build_with_stroke(outline, extent, seeds, width, height, stroke_width)
    }

    pub fn build_with_stroke(
        outline: &OutlinePath,
        extent: &WorldExtent,
        seeds: &SeedTable,
        width: u32,
        height: u32,
        stroke_width: f32,
    ) -> Result<Self, ConfigError> {
        extent.validate()?;
        let mut labels = PixelBuffer::new(width, height)?;

        paint_boundary(&mut labels, outline, extent, stroke_width)?;
        let report = label_regions(&mut labels, seeds, extent, stroke_width)?;

        info!(
            width,
            height,
            stroke_width,
            labeled = report.table.len(),
            failed = report.failures.len(),
            "region mask built"
        );

        Ok(Self { labels, report })
    }

    pub fn width(&self) -> u32 {
        self.labels.width()
    }

    pub fn height(&self) -> u32 {
        self.labels.height()
    }

    pub fn labels(&self) -> &PixelBuffer {
        &self.labels
    }

    pub fn table(&self) -> &LabelTable {
        &self.report.table
    }

    pub fn failures(&self) -> &[SeedFailure] {
        &self.report.failures
    }

    /// Raw label at a pixel, 0 when out of bounds.
    pub fn label_at(&self, px: i64, py: i64) -> u8 {
        if !self.labels.contains(px, py) {
            return 0;
        }
        self.labels.data()[self.labels.offset(px as u32, py as u32)]
    }

    /// Region under pixel `(px, py)`, or `None` on a boundary, in unseeded space,
    /// or outside the buffer.
    pub fn resolve(&self, px: i64, py: i64) -> Option<&str> {
        match self.label_at(px, py) {
            0 => None,
            label => self.report.table.region(label),
        }
    }
}
