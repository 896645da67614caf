use thiserror::Error;

/// Setup-time failures. Any of these means no mask is built and nothing is rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("malformed outline path: {message}")]
    MalformedPath { message: String },

    #[error("outline path has no drawable segments")]
    EmptyPath,

    #[error("world extent must be finite with positive size (got {width}x{height})")]
    DegenerateExtent { width: f64, height: f64 },

    #[error("buffer dimensions must be positive (got {width}x{height})")]
    EmptyBuffer { width: u32, height: u32 },

    #[error("seed for region {region:?} is not a finite coordinate")]
    InvalidSeed { region: String },

    #[error("region {0:?} has more than one seed")]
    DuplicateSeed(String),

    #[error("{count} seeds exceed the {max} labels the red channel can hold")]
    TooManySeeds { count: usize, max: usize },
}
