use serde::Serialize;
use tracing::{debug, warn};

use crate::buffer::{PixelBuffer, TRANSPARENT};
use crate::error::ConfigError;
use crate::extent::WorldExtent;
use crate::region::{Seed, SeedTable};

/// Labels are stored in the red channel, so at most 255 regions fit in one buffer.
pub const MAX_LABELS: usize = u8::MAX as usize;
pub const MIN_SEARCH_RADIUS: u32 = 4;
pub const SEED_FAILURE_REASON: &str = "no empty pixel found within radius";

/// A region whose seed could not be placed on an empty pixel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedFailure {
    pub region: String,
    pub reason: &'static str,
    pub radius: u32,
}

/// Label -> region id. Label `n` lives at index `n - 1`; label 0 is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    regions: Vec<String>,
}

impl LabelTable {
    pub fn region(&self, label: u8) -> Option<&str> {
        let i = (label as usize).checked_sub(1)?;
        self.regions.get(i).map(String::as_str)
    }

    pub fn label_of(&self, region: &str) -> Option<u8> {
        self.regions
            .iter()
            .position(|r| r == region)
            .map(|i| (i + 1) as u8)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| ((i + 1) as u8, r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn push(&mut self, region: &str) -> u8 {
        self.regions.push(region.to_owned());
        self.regions.len() as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelReport {
    pub table: LabelTable,
    pub failures: Vec<SeedFailure>,
}

/// How far from the seed pixel to look for empty space.
pub fn search_radius(stroke_width: f32) -> u32 {
    MIN_SEARCH_RADIUS.max((stroke_width * 2.0).ceil() as u32)
}

pub(crate) fn label_rgba(label: u8) -> [u8; 4] {
    [label, 0, 0, 255]
}

/// Offsets on the square ring at Chebyshev distance `r`, in probe order:
/// the top and bottom rows left to right, then the right and left columns top
/// to bottom. Corners are visited by both sweeps.
pub(crate) fn ring_offsets(r: i64) -> impl Iterator<Item = (i64, i64)> {
    let rows = (-r..=r).flat_map(move |dx| [(dx, r), (dx, -r)]);
    let cols = (-r..=r).flat_map(move |dy| [(r, dy), (-r, dy)]);
    rows.chain(cols)
}

fn find_empty(buffer: &PixelBuffer, sx: i64, sy: i64, radius: u32) -> Option<(u32, u32)> {
    for r in 0..=radius as i64 {
        for (dx, dy) in ring_offsets(r) {
            let (x, y) = (sx + dx, sy + dy);
            if !buffer.contains(x, y) {
                continue;
            }
            if buffer.pixel(x as u32, y as u32) == TRANSPARENT {
                return Some((x as u32, y as u32));
            }
        }
    }
    None
}

/// 4-connected fill of the transparent area containing `(x, y)`. Returns the
/// number of pixels stamped.
fn flood_fill(buffer: &mut PixelBuffer, x: u32, y: u32, label: u8) -> usize {
    let fill = label_rgba(label);
    let (width, height) = (buffer.width(), buffer.height());
    let mut stack = vec![(x, y)];
    let mut filled = 0;

    while let Some((cx, cy)) = stack.pop() {
        if buffer.pixel(cx, cy) != TRANSPARENT {
            continue;
        }
        buffer.set_pixel(cx, cy, fill);
        filled += 1;

        if cx + 1 < width {
            stack.push((cx + 1, cy));
        }
        if cx > 0 {
            stack.push((cx - 1, cy));
        }
        if cy + 1 < height {
            stack.push((cx, cy + 1));
        }
        if cy > 0 {
            stack.push((cx, cy - 1));
        }
    }
    filled
}

fn seed_pixel(seed: &Seed, extent: &WorldExtent, buffer: &PixelBuffer) -> (i64, i64) {
    let (px, py) = extent.to_pixel(seed.x, seed.y, buffer.width(), buffer.height());
    (px.round() as i64, py.round() as i64)
}

/// Turn a boundary mask into a label buffer in place.
///
/// Seeds are processed in table order and labels are allocated from 1 upward, so
/// the same inputs always give the same labels. A seed with no empty pixel within
/// the search radius is reported and skipped without consuming a label.
pub fn label_regions(
    buffer: &mut PixelBuffer,
    seeds: &SeedTable,
    extent: &WorldExtent,
    stroke_width: f32,
) -> Result<LabelReport, ConfigError> {
    if seeds.len() > MAX_LABELS {
        return Err(ConfigError::TooManySeeds {
            count: seeds.len(),
            max: MAX_LABELS,
        });
    }

    let radius = search_radius(stroke_width);
    let mut report = LabelReport::default();

    for seed in seeds.iter() {
        let (sx, sy) = seed_pixel(seed, extent, buffer);
        match find_empty(buffer, sx, sy, radius) {
            Some((x, y)) => {
                let label = report.table.push(&seed.region);
                let pixels = flood_fill(buffer, x, y, label);
                debug!(label, region = %seed.region, pixels, "region labeled");
            }
            None => {
                warn!(
                    region = %seed.region,
                    reason = SEED_FAILURE_REASON,
                    radius,
                    "seed placement failed"
                );
                report.failures.push(SeedFailure {
                    region: seed.region.clone(),
                    reason: SEED_FAILURE_REASON,
                    radius,
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        MAX_LABELS, SEED_FAILURE_REASON, flood_fill, label_regions, label_rgba, ring_offsets,
        search_radius,
    };
    use crate::buffer::{PixelBuffer, TRANSPARENT, WALL};
    use crate::error::ConfigError;
    use crate::extent::WorldExtent;
    use crate::outline::{OutlinePath, paint_boundary};
    use crate::region::SeedTable;

    const NESTED: &str = "M2 2 L8 2 L8 8 L2 8 Z M4 4 L6 4 L6 6 L4 6 Z";

    fn extent() -> WorldExtent {
        WorldExtent::new(0.0, 0.0, 10.0, 10.0).unwrap()
    }

    fn painted(path: &str) -> PixelBuffer {
        let mut buf = PixelBuffer::new(100, 100).unwrap();
        let outline = OutlinePath::parse(path).unwrap();
        paint_boundary(&mut buf, &outline, &extent(), 1.2).unwrap();
        buf
    }

    fn seeds(entries: &[(&str, f64, f64)]) -> SeedTable {
        let mut table = SeedTable::new();
        for &(id, x, y) in entries {
            table.insert(id, x, y).unwrap();
        }
        table
    }

    #[test]
    fn search_radius_has_a_floor() {
        assert_eq!(search_radius(1.2), 4);
        assert_eq!(search_radius(2.1), 5);
        assert_eq!(search_radius(9.6), 20);
    }

    #[test]
    fn ring_probe_covers_exactly_the_ring_perimeter() {
        assert_eq!(ring_offsets(0).collect::<HashSet<_>>().len(), 1);
        for r in 1..6i64 {
            let cells: HashSet<_> = ring_offsets(r).collect();
            assert_eq!(cells.len() as i64, 8 * r);
            assert!(cells.iter().all(|&(dx, dy)| dx.abs().max(dy.abs()) == r));
        }
    }

    #[test]
    fn ring_probe_sweeps_rows_before_columns() {
        let order: Vec<_> = ring_offsets(1).collect();
        assert_eq!(&order[..2], &[(-1, 1), (-1, -1)]);
        // The side-column midpoints only come after both rows are exhausted.
        let row_cells = 2 * 3;
        assert!(order[..row_cells].iter().all(|&(_, dy)| dy.abs() == 1));
        assert!(order[row_cells..].contains(&(1, 0)));
        assert!(order[row_cells..].contains(&(-1, 0)));
    }

    #[test]
    fn flood_fill_stops_at_walls_and_edges() {
        let mut buf = PixelBuffer::new(5, 3).unwrap();
        for y in 0..3 {
            buf.set_pixel(2, y, WALL);
        }
        let filled = flood_fill(&mut buf, 0, 0, 7);
        assert_eq!(filled, 6);
        assert_eq!(buf.pixel(1, 2), label_rgba(7));
        assert_eq!(buf.pixel(2, 1), WALL);
        assert_eq!(buf.pixel(3, 1), TRANSPARENT);
    }

    #[test]
    fn labels_are_dense_in_seed_order() {
        let mut buf = painted(NESTED);
        let table = seeds(&[("outside", 0.5, 0.5), ("ring", 3.0, 3.0), ("core", 5.0, 5.0)]);
        let report = label_regions(&mut buf, &table, &extent(), 1.2).unwrap();

        assert!(report.failures.is_empty());
        let labels: Vec<_> = report.table.iter().collect();
        assert_eq!(labels, [(1, "outside"), (2, "ring"), (3, "core")]);

        let used: HashSet<u8> = buf.pixels().map(|px| px[0]).filter(|&l| l != 0).collect();
        assert_eq!(used, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn labeling_never_overwrites_the_boundary() {
        let boundary = painted(NESTED);
        let mut labeled = boundary.clone();
        let table = seeds(&[("outside", 0.5, 0.5), ("ring", 3.0, 3.0), ("core", 5.0, 5.0)]);
        label_regions(&mut labeled, &table, &extent(), 1.2).unwrap();

        for (before, after) in boundary.pixels().zip(labeled.pixels()) {
            if before == WALL {
                assert_eq!(after, WALL);
            }
        }
    }

    #[test]
    fn seed_on_a_wall_falls_back_to_a_nearby_empty_pixel() {
        let mut buf = painted("M2 2 L8 2 L8 8 L2 8 Z");
        // x = 2 is exactly the left edge of the square.
        let table = seeds(&[("edge", 2.0, 5.0)]);
        let report = label_regions(&mut buf, &table, &extent(), 1.2).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.table.label_of("edge"), Some(1));
        assert_eq!(buf.pixel(20, 50), WALL);
    }

    #[test]
    fn boxed_in_seed_fails_without_consuming_a_label() {
        let mut buf = painted(NESTED);
        let table = seeds(&[
            ("ring", 3.0, 3.0),
            ("core", 5.0, 5.0),
            // Sits on the inner square's left wall, surrounded by labeled pixels.
            ("stranded", 4.0, 5.0),
            ("outside", 0.5, 0.5),
        ]);
        let report = label_regions(&mut buf, &table, &extent(), 1.2).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].region, "stranded");
        assert_eq!(report.failures[0].reason, SEED_FAILURE_REASON);
        assert_eq!(report.failures[0].radius, 4);
        assert_eq!(report.table.label_of("stranded"), None);
        assert_eq!(report.table.label_of("outside"), Some(3));
        assert_eq!(buf.pixel(0, 0), label_rgba(3));
    }

    #[test]
    fn second_seed_in_a_filled_basin_fails() {
        let mut buf = painted(NESTED);
        let table = seeds(&[("core", 5.0, 5.0), ("twin", 5.2, 4.8)]);
        let report = label_regions(&mut buf, &table, &extent(), 1.2).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.failures[0].region, "twin");
    }

    #[test]
    fn seed_outside_the_buffer_fails() {
        let mut buf = painted(NESTED);
        let table = seeds(&[("far", 50.0, 50.0)]);
        let report = label_regions(&mut buf, &table, &extent(), 1.2).unwrap();
        assert!(report.table.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn too_many_seeds_is_a_config_error() {
        let mut buf = painted(NESTED);
        let mut table = SeedTable::new();
        for i in 0..=MAX_LABELS {
            table.insert(format!("r{i}"), 0.5, 0.5).unwrap();
        }
        assert_eq!(
            label_regions(&mut buf, &table, &extent(), 1.2),
            Err(ConfigError::TooManySeeds {
                count: 256,
                max: 255
            })
        );
    }
}
