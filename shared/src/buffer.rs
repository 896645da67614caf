use crate::error::ConfigError;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
/// Color the boundary stroke is painted with.
pub const WALL: [u8; 4] = [0, 0, 0, 255];

/// Row-major RGBA pixel grid with the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBuffer { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Byte offset of the pixel at `(x, y)`. Callers bounds-check first.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, WALL};

    #[test]
    fn new_buffer_is_transparent() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.data().len(), 24);
        assert!(buf.pixels().all(|px| px == [0, 0, 0, 0]));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(PixelBuffer::new(0, 10).is_err());
        assert!(PixelBuffer::new(10, 0).is_err());
    }

    #[test]
    fn set_pixel_is_row_major() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        buf.set_pixel(1, 2, WALL);
        assert_eq!(buf.offset(1, 2), (2 * 4 + 1) * 4);
        assert_eq!(buf.pixel(1, 2), WALL);
        assert_eq!(buf.pixel(2, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn contains_checks_both_axes() {
        let buf = PixelBuffer::new(4, 3).unwrap();
        assert!(buf.contains(0, 0));
        assert!(buf.contains(3, 2));
        assert!(!buf.contains(4, 0));
        assert!(!buf.contains(0, 3));
        assert!(!buf.contains(-1, 1));
    }
}
