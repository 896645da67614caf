use std::path::PathBuf;

pub const DEFAULT_MAP_PATH: &str = "demos/grid-map.json";
// Matches the 47.2 x 39.2 aspect of the province outline's extent.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 664;

pub fn map_path() -> PathBuf {
    std::env::var("LEVELMAP_MAP")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_PATH))
}

pub fn canvas_width() -> u32 {
    std::env::var("LEVELMAP_WIDTH")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_CANVAS_WIDTH)
}

pub fn canvas_height() -> u32 {
    std::env::var("LEVELMAP_HEIGHT")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_CANVAS_HEIGHT)
}
