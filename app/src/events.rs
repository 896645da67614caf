use chrono::Utc;
use levelmap_shared::{Level, SeedFailure};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    Selected {
        region: String,
        name: String,
        level: Level,
        x: i64,
        y: i64,
    },
    Missed {
        x: i64,
        y: i64,
    },
    Resized {
        width: u32,
        height: u32,
        labeled: usize,
    },
    SeedFailed {
        region: String,
        reason: &'static str,
        radius: u32,
    },
    LevelChanged {
        region: String,
        previous: Level,
        level: Level,
        total_level: u32,
        filled_pixels: usize,
    },
    Total {
        total_level: u32,
    },
    Error {
        message: String,
    },
}

impl From<&SeedFailure> for MapEvent {
    fn from(failure: &SeedFailure) -> Self {
        Self::SeedFailed {
            region: failure.region.clone(),
            reason: failure.reason,
            radius: failure.radius,
        }
    }
}

/// An event stamped with the time it was emitted.
#[derive(Debug, Clone, Serialize)]
pub struct Stamped<'a> {
    pub timestamp: String,
    #[serde(flatten)]
    pub event: &'a MapEvent,
}

impl<'a> Stamped<'a> {
    pub fn now(event: &'a MapEvent) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use levelmap_shared::Level;
    use serde_json::json;

    use super::{MapEvent, Stamped};

    #[test]
    fn events_serialize_with_snake_case_tag() {
        let event = MapEvent::LevelChanged {
            region: "bj".into(),
            previous: Level::White,
            level: Level::Orange,
            total_level: 4,
            filled_pixels: 120,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "level_changed",
                "region": "bj",
                "previous": 0,
                "level": 4,
                "total_level": 4,
                "filled_pixels": 120
            })
        );
    }

    #[test]
    fn stamped_event_flattens_fields() {
        let event = MapEvent::Missed { x: 3, y: 4 };
        let value = serde_json::to_value(Stamped::now(&event)).unwrap();
        assert_eq!(value["type"], "missed");
        assert_eq!(value["x"], 3);
        assert!(value["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }
}
