use crate::buffer::{PixelBuffer, TRANSPARENT};
use crate::error::ConfigError;
use crate::mask::RegionMask;
use crate::region::LevelLookup;

/// Fill color per label for the current levels. Index 0 (unlabeled) is transparent.
fn label_palette(mask: &RegionMask, levels: &impl LevelLookup) -> Vec<[u8; 4]> {
    let mut palette = vec![TRANSPARENT; mask.table().len() + 1];
    for (label, region) in mask.table().iter() {
        palette[label as usize] = levels.level_of(region).fill_rgba();
    }
    palette
}

/// Recolor every pixel of `out` from the mask and the current levels.
///
/// `out` is resized to the mask's dimensions when they differ. Labeled pixels get
/// their region's palette color at the fill alpha; everything else is cleared.
pub fn composite_into(
    out: &mut PixelBuffer,
    mask: &RegionMask,
    levels: &impl LevelLookup,
) -> Result<(), ConfigError> {
    if out.width() != mask.width() || out.height() != mask.height() {
        *out = PixelBuffer::new(mask.width(), mask.height())?;
    }

    let palette = label_palette(mask, levels);
    let src = mask.labels().data().chunks_exact(4);
    let dst = out.data_mut().chunks_exact_mut(4);
    for (s, d) in src.zip(dst) {
        let color = palette.get(s[0] as usize).copied().unwrap_or(TRANSPARENT);
        d.copy_from_slice(&color);
    }
    Ok(())
}

/// Produce a fresh RGBA layer for the mask.
pub fn composite(
    mask: &RegionMask,
    levels: &impl LevelLookup,
) -> Result<PixelBuffer, ConfigError> {
    let mut out = PixelBuffer::new(mask.width(), mask.height())?;
    composite_into(&mut out, mask, levels)?;
    Ok(out)
}
