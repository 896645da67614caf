pub mod buffer;
pub mod composite;
pub mod error;
pub mod extent;
pub mod labeler;
pub mod level;
pub mod map;
pub mod mask;
pub mod outline;
pub mod region;

pub use buffer::PixelBuffer;
pub use composite::{composite, composite_into};
pub use error::ConfigError;
pub use extent::WorldExtent;
pub use labeler::{LabelTable, SeedFailure};
pub use level::{FILL_ALPHA, Level};
pub use map::MapContext;
pub use mask::RegionMask;
pub use outline::OutlinePath;
pub use region::{LevelLookup, RegionEntry, RegionRegistry, SeedTable};
