use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, PixmapMut, Stroke, Transform};

use crate::buffer::{PixelBuffer, TRANSPARENT, WALL};
use crate::error::ConfigError;
use crate::extent::WorldExtent;

/// One absolute segment of the merged boundary outline, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

/// The single compound outline holding every region border.
///
/// Parsed once from SVG path data; relative commands, shorthand curves and arcs
/// are normalized to absolute moves, lines and Béziers.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePath {
    segments: Vec<Segment>,
}

impl OutlinePath {
    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut drawable = false;

        for segment in SimplifyingPathParser::from(data) {
            let segment = segment.map_err(|e| ConfigError::MalformedPath {
                message: e.to_string(),
            })?;
            let seg = match segment {
                SimplePathSegment::MoveTo { x, y } => Segment::MoveTo(x, y),
                SimplePathSegment::LineTo { x, y } => Segment::LineTo(x, y),
                SimplePathSegment::Quadratic { x1, y1, x, y } => Segment::QuadTo(x1, y1, x, y),
                SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => Segment::CubicTo(x1, y1, x2, y2, x, y),
                SimplePathSegment::ClosePath => Segment::Close,
            };
            if !matches!(seg, Segment::MoveTo(..)) {
                drawable = true;
            }
            segments.push(seg);
        }

        if !drawable {
            return Err(ConfigError::EmptyPath);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Build a device-space path for a `width` x `height` buffer.
    fn to_device_path(
        &self,
        extent: &WorldExtent,
        width: u32,
        height: u32,
    ) -> Option<tiny_skia::Path> {
        let map = |x: f64, y: f64| {
            let (px, py) = extent.to_pixel(x, y, width, height);
            (px as f32, py as f32)
        };

        let mut pb = PathBuilder::new();
        for seg in &self.segments {
            match *seg {
                Segment::MoveTo(x, y) => {
                    let (x, y) = map(x, y);
                    pb.move_to(x, y);
                }
                Segment::LineTo(x, y) => {
                    let (x, y) = map(x, y);
                    pb.line_to(x, y);
                }
                Segment::QuadTo(x1, y1, x, y) => {
                    let (x1, y1) = map(x1, y1);
                    let (x, y) = map(x, y);
                    pb.quad_to(x1, y1, x, y);
                }
                Segment::CubicTo(x1, y1, x2, y2, x, y) => {
                    let (x1, y1) = map(x1, y1);
                    let (x2, y2) = map(x2, y2);
                    let (x, y) = map(x, y);
                    pb.cubic_to(x1, y1, x2, y2, x, y);
                }
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

/// Paint the outline into `buffer` as an anti-aliased stroke of `stroke_width`
/// device pixels, then binarize it: any pixel with nonzero coverage becomes
/// [`WALL`], everything else [`TRANSPARENT`].
///
/// Partially covered pixels count as wall, so thin or shallow segments still
/// close off 4-connected gaps. The buffer is cleared first and the stroke is
/// applied twice before anything reads the result.
pub fn paint_boundary(
    buffer: &mut PixelBuffer,
    outline: &OutlinePath,
    extent: &WorldExtent,
    stroke_width: f32,
) -> Result<(), ConfigError> {
    let (width, height) = (buffer.width(), buffer.height());
    buffer.clear();

    let Some(path) = outline.to_device_path(extent, width, height) else {
        return Err(ConfigError::EmptyPath);
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(WALL[0], WALL[1], WALL[2], WALL[3]);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: stroke_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer.data_mut(), width, height) else {
            return Err(ConfigError::EmptyBuffer { width, height });
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    for px in buffer.data_mut().chunks_exact_mut(4) {
        let value = if px[3] == 0 { TRANSPARENT } else { WALL };
        px.copy_from_slice(&value);
    }
    Ok(())
}
