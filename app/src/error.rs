use levelmap_shared::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid map file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("region {0:?} is listed more than once")]
    DuplicateRegion(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
