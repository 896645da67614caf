use serde::{Deserialize, Serialize};

/// Alpha used for every filled region so the boundary layer stays visible (~78%).
pub const FILL_ALPHA: u8 = 200;

/// Ordinal level a user assigns to a region, 0 through 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    #[default]
    White,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Self::White,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Red,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Palette color as RGB bytes.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (0xff, 0xff, 0xff),
            Self::Blue => (0x35, 0x98, 0xdb),
            Self::Green => (0x30, 0xcc, 0x70),
            Self::Yellow => (0xf3, 0xc2, 0x18),
            Self::Orange => (0xd5, 0x83, 0x37),
            Self::Red => (0xe8, 0x4c, 0x3d),
        }
    }

    /// Palette color with [`FILL_ALPHA`], ready to write into an RGBA buffer.
    pub fn fill_rgba(self) -> [u8; 4] {
        let (r, g, b) = self.color_rgb();
        [r, g, b, FILL_ALPHA]
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("level must be 0..=5, got {value}"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.index()
    }
}
