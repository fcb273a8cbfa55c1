//! Rectangular floor-plan generation from plot dimensions and a room program.
//!
//! The buildable area (plot minus a uniform setback) is split into a public zone at
//! the front and a private zone at the rear. The public zone holds the living room and
//! kitchen, the private zone the bedrooms. Bathrooms are carved out of existing rooms,
//! and a corridor along the top of the private zone links the bedrooms. The resulting
//! rooms feed straight into [`crate::generator::LayoutGenerator`].
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::room::{FloorPlan, Room, RoomCategory, RoomId};

/// Uniform setback from every plot boundary.
pub const SETBACK: f32 = 3.0;
pub const CORRIDOR_WIDTH: f32 = 4.0;
pub const MAX_BEDROOMS: u32 = 6;
/// Smallest plot side accepted by [`generate_floor_plan`].
pub const MIN_PLOT_SIDE: f32 = 20.0;

const LIVING_RATIO: f32 = 5.0;
const KITCHEN_RATIO: f32 = 3.0;
const MASTER_RATIO: f32 = 4.0;
const BEDROOM_RATIO: f32 = 3.0;
const OPEN_KITCHEN_DEPTH: f32 = 0.7;
const BATH_WIDTH: f32 = 6.0;
const BATH_MAX_DEPTH: f32 = 8.0;
const MIN_BEDROOM_AFTER_CARVE: f32 = 8.0;
const WINDOW_TOLERANCE: f32 = 1.0;

/// Side of the plot facing the street.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Facing::North),
            "east" => Ok(Facing::East),
            "south" => Ok(Facing::South),
            "west" => Ok(Facing::West),
            other => Err(Error::InvalidFloorPlanInput(format!(
                "unknown facing direction '{other}'"
            ))),
        }
    }
}

/// Inputs describing the plot and the requested room program.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlanInputs {
    /// Plot extent along x.
    pub plot_length: f32,
    /// Plot extent along y; the front (public) side is at the smaller y.
    pub plot_width: f32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub open_kitchen: bool,
    pub staircase: bool,
    pub facing: Facing,
}

impl FloorPlanInputs {
    pub fn new(plot_length: f32, plot_width: f32) -> Self {
        Self {
            plot_length,
            plot_width,
            bedrooms: 2,
            bathrooms: 2,
            open_kitchen: false,
            staircase: false,
            facing: Facing::North,
        }
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = bedrooms;
        self
    }

    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = bathrooms;
        self
    }

    pub fn with_open_kitchen(mut self, open_kitchen: bool) -> Self {
        self.open_kitchen = open_kitchen;
        self
    }

    pub fn with_staircase(mut self, staircase: bool) -> Self {
        self.staircase = staircase;
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("plot_length", self.plot_length),
            ("plot_width", self.plot_width),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidFloorPlanInput(format!(
                    "{name} must be finite"
                )));
            }
            if value < MIN_PLOT_SIDE {
                return Err(Error::InvalidFloorPlanInput(format!(
                    "{name} must be >= {MIN_PLOT_SIDE}"
                )));
            }
        }
        if self.bedrooms > MAX_BEDROOMS {
            return Err(Error::InvalidFloorPlanInput(format!(
                "at most {MAX_BEDROOMS} bedrooms are supported"
            )));
        }
        Ok(())
    }

    /// Buildable area inside the setback.
    pub fn buildable(&self) -> Rect {
        Rect::new(
            SETBACK,
            SETBACK,
            self.plot_length - 2.0 * SETBACK,
            self.plot_width - 2.0 * SETBACK,
        )
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A door or window drawn as a thin rectangle on a wall.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub bounds: Rect,
    pub orientation: Orientation,
    /// Room the opening belongs to.
    pub room_id: RoomId,
}

impl Opening {
    fn horizontal(center: Vec2, length: f32, room_id: &str) -> Self {
        Self {
            bounds: Rect::new(center.x - length / 2.0, center.y, length, 0.5),
            orientation: Orientation::Horizontal,
            room_id: room_id.to_string(),
        }
    }

    fn vertical(center: Vec2, length: f32, room_id: &str) -> Self {
        Self {
            bounds: Rect::new(center.x, center.y - length / 2.0, 0.5, length),
            orientation: Orientation::Vertical,
            room_id: room_id.to_string(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Staircase {
    pub bounds: Rect,
    pub room_id: RoomId,
}

/// Output of [`generate_floor_plan`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFloorPlan {
    /// Plot length and width.
    pub plot: Vec2,
    pub facing: Facing,
    pub open_kitchen: bool,
    pub rooms: Vec<Room>,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
    pub staircase: Option<Staircase>,
}

impl GeneratedFloorPlan {
    pub fn room_named(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    /// Rooms as a [`FloorPlan`] ready for the layout engines.
    pub fn to_floor_plan(&self, name: impl Into<String>) -> FloorPlan {
        FloorPlan::new(name).with_rooms(self.rooms.iter().cloned())
    }
}

struct Draft {
    name: String,
    category: RoomCategory,
    bounds: Rect,
}

impl Draft {
    fn new(name: impl Into<String>, category: RoomCategory, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            category,
            bounds,
        }
    }
}

/// Generates a floor plan. Deterministic for equal inputs.
pub fn generate_floor_plan(inputs: &FloorPlanInputs) -> Result<GeneratedFloorPlan> {
    inputs.validate()?;

    let buildable = inputs.buildable();
    let zone_depth = buildable.height() / 2.0;
    let public = Rect::new(buildable.x(), buildable.y(), buildable.width(), zone_depth);
    let private = Rect::new(
        buildable.x(),
        buildable.y() + zone_depth,
        buildable.width(),
        zone_depth,
    );

    let mut drafts = public_rooms(&public, inputs.open_kitchen);
    drafts.extend(bedrooms(&private, inputs.bedrooms));

    let has_corridor = inputs.bedrooms > 0;
    if has_corridor {
        let corridor_y = private.y() - CORRIDOR_WIDTH;
        for draft in drafts.iter_mut().filter(|d| is_public(d.category)) {
            let bottom = draft.bounds.max().y;
            if bottom > corridor_y {
                draft.bounds.size.y -= bottom - corridor_y;
            }
        }
    }

    let en_suite = carve_en_suite(&mut drafts, inputs.bathrooms);
    let remaining = inputs.bathrooms.saturating_sub(u32::from(en_suite));
    let common = remaining > 0 && carve_common_bathroom(&mut drafts);
    if remaining > 1 {
        debug!(
            "{} bathrooms requested; {} placed.",
            inputs.bathrooms,
            u32::from(en_suite) + u32::from(common)
        );
    }

    if has_corridor {
        drafts.push(Draft::new(
            "Corridor",
            RoomCategory::Corridor,
            Rect::new(
                private.x(),
                private.y() - CORRIDOR_WIDTH,
                private.width(),
                CORRIDOR_WIDTH,
            ),
        ));
    }

    let rooms = drafts
        .into_iter()
        .enumerate()
        .map(|(i, d)| Room::try_new(format!("room-{}", i + 1), d.name, d.category, d.bounds))
        .collect::<Result<Vec<_>>>()?;

    let doors = doors(&rooms, private.y());
    let windows = windows(&rooms, &buildable);
    let staircase = if inputs.staircase {
        staircase(&rooms)
    } else {
        None
    };

    info!(
        "Floor plan {}x{}: rooms: {} | doors: {} | windows: {}.",
        inputs.plot_length,
        inputs.plot_width,
        rooms.len(),
        doors.len(),
        windows.len()
    );

    Ok(GeneratedFloorPlan {
        plot: Vec2::new(inputs.plot_length, inputs.plot_width),
        facing: inputs.facing,
        open_kitchen: inputs.open_kitchen,
        rooms,
        doors,
        windows,
        staircase,
    })
}

fn is_public(category: RoomCategory) -> bool {
    matches!(category, RoomCategory::Living | RoomCategory::Kitchen)
}

fn public_rooms(zone: &Rect, open_kitchen: bool) -> Vec<Draft> {
    let living_width = zone.width() * LIVING_RATIO / (LIVING_RATIO + KITCHEN_RATIO);
    let kitchen_width = zone.width() - living_width;
    let (living_name, kitchen_depth) = if open_kitchen {
        ("Living / Dining", zone.height() * OPEN_KITCHEN_DEPTH)
    } else {
        ("Living Room", zone.height())
    };
    vec![
        Draft::new(
            living_name,
            RoomCategory::Living,
            Rect::new(zone.x(), zone.y(), living_width, zone.height()),
        ),
        Draft::new(
            "Kitchen",
            RoomCategory::Kitchen,
            Rect::new(zone.x() + living_width, zone.y(), kitchen_width, kitchen_depth),
        ),
    ]
}

fn bedrooms(zone: &Rect, count: u32) -> Vec<Draft> {
    if count == 0 {
        return Vec::new();
    }
    let total = MASTER_RATIO + BEDROOM_RATIO * (count - 1) as f32;
    let mut x = zone.x();
    (0..count)
        .map(|i| {
            let (name, ratio) = if i == 0 {
                ("Master Bedroom".to_string(), MASTER_RATIO)
            } else {
                (format!("Bedroom {i}"), BEDROOM_RATIO)
            };
            let width = zone.width() * ratio / total;
            let draft = Draft::new(
                name,
                RoomCategory::Bedroom,
                Rect::new(x, zone.y(), width, zone.height()),
            );
            x += width;
            draft
        })
        .collect()
}

/// Takes a bathroom off the left end of the master bedroom when it stays wide enough.
fn carve_en_suite(drafts: &mut Vec<Draft>, bathrooms: u32) -> bool {
    if bathrooms == 0 {
        return false;
    }
    let Some(master) = drafts.iter_mut().find(|d| d.name == "Master Bedroom") else {
        return false;
    };
    if master.bounds.width() < BATH_WIDTH + MIN_BEDROOM_AFTER_CARVE {
        debug!(
            "Master bedroom is {:.1} wide; no en-suite bathroom.",
            master.bounds.width()
        );
        return false;
    }
    let bath = Rect::new(
        master.bounds.x(),
        master.bounds.y(),
        BATH_WIDTH,
        master.bounds.height().min(BATH_MAX_DEPTH),
    );
    master.bounds.origin.x += BATH_WIDTH;
    master.bounds.size.x -= BATH_WIDTH;
    drafts.push(Draft::new("Master Bathroom", RoomCategory::Bathroom, bath));
    true
}

/// Takes a bathroom off the bottom of the kitchen column.
fn carve_common_bathroom(drafts: &mut Vec<Draft>) -> bool {
    let Some(kitchen) = drafts
        .iter_mut()
        .find(|d| d.category == RoomCategory::Kitchen)
    else {
        return false;
    };
    let depth = BATH_MAX_DEPTH.min(kitchen.bounds.height() / 2.0);
    let width = BATH_WIDTH.min(kitchen.bounds.width());
    let bath = Rect::new(
        kitchen.bounds.x(),
        kitchen.bounds.max().y - depth,
        width,
        depth,
    );
    kitchen.bounds.size.y -= depth;
    drafts.push(Draft::new("Common Bathroom", RoomCategory::Bathroom, bath));
    true
}

fn doors(rooms: &[Room], private_y: f32) -> Vec<Opening> {
    let mut doors = Vec::new();

    if let Some(living) = rooms.iter().find(|r| r.category == RoomCategory::Living) {
        let b = &living.bounds;
        doors.push(Opening::horizontal(
            Vec2::new(b.center().x, b.y()),
            4.0,
            &living.id,
        ));
    }

    let has_corridor = rooms.iter().any(|r| r.category == RoomCategory::Corridor);
    for room in rooms {
        let b = &room.bounds;
        match (room.category, room.name.as_str()) {
            (RoomCategory::Bedroom, _) if has_corridor => {
                doors.push(Opening::horizontal(
                    Vec2::new(b.center().x, private_y),
                    3.0,
                    &room.id,
                ));
            }
            (RoomCategory::Bathroom, "Common Bathroom") => {
                doors.push(Opening::horizontal(
                    Vec2::new(b.center().x, b.max().y),
                    3.0,
                    &room.id,
                ));
            }
            (RoomCategory::Bathroom, "Master Bathroom") => {
                doors.push(Opening::vertical(
                    Vec2::new(b.max().x, b.center().y),
                    3.0,
                    &room.id,
                ));
            }
            _ => {}
        }
    }
    doors
}

/// One window per room edge lying on the buildable boundary.
fn windows(rooms: &[Room], buildable: &Rect) -> Vec<Opening> {
    let (min, max) = (buildable.min(), buildable.max());
    let mut windows = Vec::new();
    for room in rooms
        .iter()
        .filter(|r| r.category != RoomCategory::Corridor)
    {
        let b = &room.bounds;
        let c = b.center();
        if b.min().y <= min.y + WINDOW_TOLERANCE {
            windows.push(Opening::horizontal(Vec2::new(c.x, b.min().y), 4.0, &room.id));
        }
        if b.max().y >= max.y - WINDOW_TOLERANCE {
            windows.push(Opening::horizontal(Vec2::new(c.x, b.max().y), 4.0, &room.id));
        }
        if b.min().x <= min.x + WINDOW_TOLERANCE {
            windows.push(Opening::vertical(Vec2::new(b.min().x, c.y), 4.0, &room.id));
        }
        if b.max().x >= max.x - WINDOW_TOLERANCE {
            windows.push(Opening::vertical(Vec2::new(b.max().x, c.y), 4.0, &room.id));
        }
    }
    windows
}

/// A 4x10 flight against the living room's left wall, ending 1 unit above its back wall.
fn staircase(rooms: &[Room]) -> Option<Staircase> {
    let living = rooms.iter().find(|r| r.category == RoomCategory::Living)?;
    let b = &living.bounds;
    if b.width() < 6.0 || b.height() < 12.0 {
        debug!(
            "Living room {:.1}x{:.1} too small for a staircase.",
            b.width(),
            b.height()
        );
        return None;
    }
    Some(Staircase {
        bounds: Rect::new(b.x() + 1.0, b.max().y - 11.0, 4.0, 10.0),
        room_id: living.id.clone(),
    })
}
