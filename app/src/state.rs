use levelmap_shared::{Level, MapContext, RegionRegistry};
use tracing::{info, warn};

use crate::command::Command;
use crate::error::AppError;
use crate::events::MapEvent;
use crate::map_file::LoadedMap;

/// Everything the command loop touches: the map core and the level registry.
pub struct AppState {
    pub map: MapContext,
    pub registry: RegionRegistry,
}

impl AppState {
    /// Build the initial mask and layer. Returns the startup events alongside.
    pub fn new(
        loaded: LoadedMap,
        width: u32,
        height: u32,
    ) -> Result<(Self, Vec<MapEvent>), AppError> {
        for entry in loaded.registry.iter() {
            if !loaded.seeds.contains(&entry.id) {
                warn!(region = %entry.id, "region has no seed and can never be selected");
            }
        }

        let map = MapContext::new(loaded.extent, loaded.outline, loaded.seeds, width, height)?;
        let mut state = Self {
            map,
            registry: loaded.registry,
        };
        let events = state.after_rebuild()?;
        Ok((state, events))
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<MapEvent> {
        match command {
            Command::ClickAt { x, y } => vec![self.click(x, y)],
            Command::PointerAt {
                x,
                y,
                rect_width,
                rect_height,
            } => match self.pointer_to_pixel(x, y, rect_width, rect_height) {
                Ok((px, py)) => vec![self.click(px, py)],
                Err(message) => vec![MapEvent::Error { message }],
            },
            Command::Resize { width, height } => self.resize(width, height),
            Command::SetLevel { region, level } => vec![self.set_level(region, level)],
            Command::Total => vec![MapEvent::Total {
                total_level: self.registry.total_level(),
            }],
        }
    }

    /// Scale a position inside a `rect_width` x `rect_height` display rect to buffer pixels.
    fn pointer_to_pixel(
        &self,
        x: f64,
        y: f64,
        rect_width: f64,
        rect_height: f64,
    ) -> Result<(i64, i64), String> {
        if !(rect_width.is_finite() && rect_height.is_finite())
            || rect_width <= 0.0
            || rect_height <= 0.0
        {
            return Err(format!("display size must be positive (got {rect_width}x{rect_height})"));
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(format!("pointer position must be finite (got {x}, {y})"));
        }
        let px = (x * self.map.width() as f64 / rect_width).round();
        let py = (y * self.map.height() as f64 / rect_height).round();
        Ok((px as i64, py as i64))
    }

    fn click(&self, x: i64, y: i64) -> MapEvent {
        let Some(region) = self.map.resolve(x, y) else {
            return MapEvent::Missed { x, y };
        };
        let (name, level) = match self.registry.get(region) {
            Some(entry) => (entry.name.clone(), entry.level),
            None => (region.to_string(), Level::default()),
        };
        MapEvent::Selected {
            region: region.to_string(),
            name,
            level,
            x,
            y,
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Vec<MapEvent> {
        if let Err(e) = self.map.resize(width, height) {
            warn!(error = %e, width, height, "resize rejected");
            return vec![MapEvent::Error {
                message: e.to_string(),
            }];
        }
        match self.after_rebuild() {
            Ok(events) => events,
            Err(e) => vec![MapEvent::Error {
                message: e.to_string(),
            }],
        }
    }

    /// Recomposite after a fresh mask and describe the build.
    fn after_rebuild(&mut self) -> Result<Vec<MapEvent>, AppError> {
        self.map.recomposite(&self.registry)?;

        let mask = self.map.mask();
        let mut events = vec![MapEvent::Resized {
            width: mask.width(),
            height: mask.height(),
            labeled: mask.table().len(),
        }];
        events.extend(mask.failures().iter().map(MapEvent::from));
        Ok(events)
    }

    fn set_level(&mut self, region: String, level: Level) -> MapEvent {
        let Some(previous) = self.registry.set_level(&region, level) else {
            return MapEvent::Error {
                message: format!("unknown region: {region:?}"),
            };
        };
        if let Err(e) = self.map.recomposite(&self.registry) {
            return MapEvent::Error {
                message: e.to_string(),
            };
        }

        let filled_pixels = match self.map.mask().table().label_of(&region) {
            Some(label) => self
                .map
                .mask()
                .labels()
                .pixels()
                .filter(|px| px[0] == label)
                .count(),
            None => 0,
        };
        let total_level = self.registry.total_level();
        info!(region = %region, level = level.index(), total_level, "level changed");

        MapEvent::LevelChanged {
            region,
            previous,
            level,
            total_level,
            filled_pixels,
        }
    }
}
