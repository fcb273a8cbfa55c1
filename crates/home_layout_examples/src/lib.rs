#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_floor_plan_to_png, render_layout_to_png, RenderConfig};

use home_layout::prelude::{Rect, Result, Room, RoomCategory};

/// The two-room bedroom + entrance house used across the examples.
pub fn sample_rooms() -> Result<Vec<Room>> {
    Ok(vec![
        Room::try_new("r1", "Bedroom", RoomCategory::Bedroom, Rect::new(0.0, 0.0, 100.0, 100.0))?,
        Room::try_new("r2", "Entrance", RoomCategory::Entrance, Rect::new(100.0, 0.0, 20.0, 20.0))?,
    ])
}

/// A small single-storey house with every wet room the plumbing rules know about.
pub fn sample_house() -> Result<Vec<Room>> {
    let rooms = [
        ("living", "Living Room", RoomCategory::Living, (0.0, 0.0, 240.0, 180.0)),
        ("kitchen", "Kitchen", RoomCategory::Kitchen, (240.0, 0.0, 140.0, 120.0)),
        ("utility", "Utility", RoomCategory::Utility, (240.0, 120.0, 140.0, 60.0)),
        ("entrance", "Entrance", RoomCategory::Entrance, (0.0, 180.0, 80.0, 60.0)),
        ("corridor", "Corridor", RoomCategory::Corridor, (80.0, 180.0, 300.0, 60.0)),
        ("bed-1", "Master Bedroom", RoomCategory::Bedroom, (0.0, 240.0, 160.0, 160.0)),
        ("bath-1", "Bathroom", RoomCategory::Bathroom, (160.0, 240.0, 80.0, 80.0)),
        ("powder", "Powder Room", RoomCategory::PowderRoom, (160.0, 320.0, 80.0, 80.0)),
        ("bed-2", "Bedroom 2", RoomCategory::Bedroom, (240.0, 240.0, 140.0, 160.0)),
    ];
    rooms
        .into_iter()
        .map(|(id, name, category, (x, y, w, h))| {
            Room::try_new(id, name, category, Rect::new(x, y, w, h))
        })
        .collect()
}
