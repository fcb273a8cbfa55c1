//! Room records consumed by the layout engines.
//!
//! Rooms are created by callers (hand-written sample plans, a pasted JSON floor plan,
//! an annotation tool, or [`crate::floorplan`]) and are read-only for the duration of
//! a generation run.
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;

pub type RoomId = String;

/// Functional category of a room. Rule tables are keyed by this.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomCategory {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Utility,
    Entrance,
    Office,
    Dining,
    Corridor,
    PowderRoom,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 10] = [
        RoomCategory::Living,
        RoomCategory::Bedroom,
        RoomCategory::Kitchen,
        RoomCategory::Bathroom,
        RoomCategory::Utility,
        RoomCategory::Entrance,
        RoomCategory::Office,
        RoomCategory::Dining,
        RoomCategory::Corridor,
        RoomCategory::PowderRoom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomCategory::Living => "living",
            RoomCategory::Bedroom => "bedroom",
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::Utility => "utility",
            RoomCategory::Entrance => "entrance",
            RoomCategory::Office => "office",
            RoomCategory::Dining => "dining",
            RoomCategory::Corridor => "corridor",
            RoomCategory::PowderRoom => "powder-room",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RoomCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

/// An axis-aligned room.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RoomRecord", into = "RoomRecord")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub category: RoomCategory,
    pub bounds: Rect,
    pub color: Option<String>,
}

impl Room {
    /// Creates a room, rejecting non-finite coordinates and non-positive sizes.
    pub fn try_new(
        id: impl Into<RoomId>,
        name: impl Into<String>,
        category: RoomCategory,
        bounds: Rect,
    ) -> Result<Self> {
        let id = id.into();
        if !(bounds.origin.is_finite() && bounds.size.is_finite()) {
            return Err(Error::invalid_room(id, "coordinates must be finite"));
        }
        if bounds.width() <= 0.0 {
            return Err(Error::invalid_room(id, "width must be > 0"));
        }
        if bounds.height() <= 0.0 {
            return Err(Error::invalid_room(id, "height must be > 0"));
        }
        Ok(Self {
            id,
            name: name.into(),
            category,
            bounds,
            color: None,
        })
    }

    /// Sets the display color (any CSS color string).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Flat interchange form of a room: `{id, name, type, x, y, width, height, color}`.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RoomRecord {
    id: RoomId,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    category: RoomCategory,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RoomRecord> for Room {
    type Error = Error;

    fn try_from(r: RoomRecord) -> Result<Self> {
        let mut room = Room::try_new(
            r.id,
            r.name,
            r.category,
            Rect::new(r.x, r.y, r.width, r.height),
        )?;
        room.color = r.color;
        Ok(room)
    }
}

#[cfg(feature = "serde")]
impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        RoomRecord {
            id: room.id,
            name: room.name,
            category: room.category,
            x: room.bounds.x(),
            y: room.bounds.y(),
            width: room.bounds.width(),
            height: room.bounds.height(),
            color: room.color,
        }
    }
}

/// A named list of rooms.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloorPlan {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub rooms: Vec<Room>,
}

impl FloorPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: Vec::new(),
        }
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = Room>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Total floor area over all rooms.
    pub fn total_area(&self) -> f32 {
        self.rooms.iter().map(|r| r.bounds.area()).sum()
    }

    /// Checks that room ids are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.rooms.len());
        for room in &self.rooms {
            if !seen.insert(room.id.as_str()) {
                return Err(Error::invalid_room(room.id.clone(), "duplicate room id"));
            }
        }
        Ok(())
    }

    /// Parses and validates the JSON interchange format.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let plan: FloorPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    #[cfg(feature = "json")]
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_empty_rooms() {
        let err = Room::try_new("r1", "Hall", RoomCategory::Living, Rect::new(0.0, 0.0, 0.0, 5.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRoom { ref id, .. } if id == "r1"));

        let err = Room::try_new("r2", "Hall", RoomCategory::Living, Rect::new(0.0, 0.0, 5.0, -1.0))
            .unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn try_new_rejects_nan_coordinates() {
        let bounds = Rect::new(f32::NAN, 0.0, 10.0, 10.0);
        assert!(Room::try_new("r", "n", RoomCategory::Office, bounds).is_err());
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in RoomCategory::ALL {
            assert_eq!(category.as_str().parse::<RoomCategory>().unwrap(), category);
        }
        assert!("garage".parse::<RoomCategory>().is_err());
        assert_eq!(RoomCategory::PowderRoom.to_string(), "powder-room");
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let a = Room::try_new("a", "A", RoomCategory::Bedroom, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let plan = FloorPlan::new("dup").with_rooms([a.clone(), a]);
        assert!(plan.validate().is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn parses_interchange_json() {
        let json = r##"{
            "name": "Studio",
            "rooms": [
                {"id": "r1", "name": "Bed", "type": "bedroom", "x": 0, "y": 0, "width": 100, "height": 80, "color": "#eef"},
                {"id": "r2", "name": "WC", "type": "powder-room", "x": 100, "y": 0, "width": 30, "height": 30}
            ]
        }"##;
        let plan = FloorPlan::from_json_str(json).expect("valid plan");
        assert_eq!(plan.name, "Studio");
        assert_eq!(plan.rooms.len(), 2);
        assert_eq!(plan.rooms[0].color.as_deref(), Some("#eef"));
        assert_eq!(plan.rooms[1].category, RoomCategory::PowderRoom);
        assert_eq!(plan.total_area(), 8000.0 + 900.0);
    }

    #[cfg(feature = "json")]
    #[test]
    fn rejects_zero_width_rooms_in_json() {
        let json = r#"{"rooms": [{"id": "r1", "type": "kitchen", "x": 0, "y": 0, "width": 0, "height": 10}]}"#;
        assert!(FloorPlan::from_json_str(json).is_err());
    }
}
