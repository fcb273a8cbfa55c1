//! Electrical domain: distribution board, switches, and the loads they feed.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domains::{AnchorSpec, ComponentKind, ComponentRole, ConnectionCategory, Marker};
use crate::geometry::Corner;
use crate::room::RoomCategory;
use crate::rules::PlacementStrategy::{Ceiling, Wall};
use crate::rules::{ComponentSpec, RuleTable};

/// Amperage of every distribution board → switch feed.
pub const MAIN_FEED_AMPS: f32 = 20.0;
/// Amperage assumed for loads without a rating.
pub const FALLBACK_AMPS: f32 = 5.0;
/// Rating of the main distribution board.
pub const MDB_AMPS: f32 = 100.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElectricalComponent {
    #[cfg_attr(feature = "serde", serde(rename = "MDB"))]
    Mdb,
    #[cfg_attr(feature = "serde", serde(rename = "switch"))]
    Switch,
    #[cfg_attr(feature = "serde", serde(rename = "light"))]
    Light,
    #[cfg_attr(feature = "serde", serde(rename = "fan"))]
    Fan,
    #[cfg_attr(feature = "serde", serde(rename = "socket5A"))]
    Socket5A,
    #[cfg_attr(feature = "serde", serde(rename = "socket15A"))]
    Socket15A,
    #[cfg_attr(feature = "serde", serde(rename = "ac"))]
    Ac,
    #[cfg_attr(feature = "serde", serde(rename = "geyser"))]
    Geyser,
    #[cfg_attr(feature = "serde", serde(rename = "washing"))]
    Washing,
    #[cfg_attr(feature = "serde", serde(rename = "tv"))]
    Tv,
    #[cfg_attr(feature = "serde", serde(rename = "exhaust"))]
    Exhaust,
}

impl fmt::Display for ElectricalComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl ComponentKind for ElectricalComponent {
    const DOMAIN: &'static str = "electrical";

    fn role(self) -> ComponentRole {
        use ElectricalComponent::*;
        match self {
            Mdb => ComponentRole::Hub,
            Switch => ComponentRole::Controller,
            Light | Fan | Exhaust => ComponentRole::Controllable,
            Socket5A | Socket15A | Ac | Geyser | Washing | Tv => ComponentRole::Direct,
        }
    }

    fn token(self) -> &'static str {
        use ElectricalComponent::*;
        match self {
            Mdb => "MDB",
            Switch => "switch",
            Light => "light",
            Fan => "fan",
            Socket5A => "socket5A",
            Socket15A => "socket15A",
            Ac => "ac",
            Geyser => "geyser",
            Washing => "washing",
            Tv => "tv",
            Exhaust => "exhaust",
        }
    }

    fn marker(self) -> Marker {
        use ElectricalComponent::*;
        let (color, glyph) = match self {
            Mdb => ([0xdc, 0x26, 0x26], 'M'),
            Switch => ([0x05, 0x96, 0x69], 'S'),
            Light => ([0xf5, 0x9e, 0x0b], 'L'),
            Fan => ([0x3b, 0x82, 0xf6], 'F'),
            Socket5A => ([0x8b, 0x5c, 0xf6], 'o'),
            Socket15A => ([0xdc, 0x26, 0x26], 'O'),
            Ac => ([0x06, 0xb6, 0xd4], 'A'),
            Geyser => ([0xef, 0x44, 0x44], 'G'),
            Washing => ([0x6b, 0x72, 0x80], 'W'),
            Tv => ([0x1f, 0x29, 0x37], 'T'),
            Exhaust => ([0x10, 0xb9, 0x81], 'E'),
        };
        let radius = match self {
            Mdb => 8,
            Socket15A => 6,
            _ => 5,
        };
        Marker {
            color,
            radius,
            glyph,
        }
    }

    fn hub() -> Option<AnchorSpec<Self>> {
        Some(AnchorSpec {
            component: ElectricalComponent::Mdb,
            label: "Main Distribution Board",
            capacity: MDB_AMPS,
            corner: Corner::BottomLeft,
        })
    }

    fn anchor_category() -> Option<RoomCategory> {
        Some(RoomCategory::Entrance)
    }

    fn feed_category() -> ConnectionCategory {
        ConnectionCategory::Power
    }

    fn control_category() -> ConnectionCategory {
        ConnectionCategory::Control
    }

    fn main_feed_capacity() -> f32 {
        MAIN_FEED_AMPS
    }

    fn fallback_capacity() -> f32 {
        FALLBACK_AMPS
    }

    fn default_rules() -> RuleTable<Self> {
        default_rules()
    }
}

/// The stock electrical rule table, one entry per room category.
pub fn default_rules() -> RuleTable<ElectricalComponent> {
    use ElectricalComponent::*;

    let switch = || ComponentSpec::new(Switch, 1, Wall, 1);
    let light = || ComponentSpec::new(Light, 1, Ceiling, 2);

    RuleTable::new()
        .with_room(
            RoomCategory::Living,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Fan, 1, Ceiling, 3),
                ComponentSpec::new(Socket5A, 2, Wall, 4).with_capacity(5.0),
                ComponentSpec::new(Ac, 1, Wall, 5).with_capacity(15.0),
                ComponentSpec::new(Tv, 1, Wall, 6),
            ],
        )
        .with_room(
            RoomCategory::Bedroom,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Fan, 1, Ceiling, 3),
                ComponentSpec::new(Socket5A, 2, Wall, 4).with_capacity(5.0),
                ComponentSpec::new(Ac, 1, Wall, 5).with_capacity(15.0),
            ],
        )
        .with_room(
            RoomCategory::Kitchen,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Socket15A, 3, Wall, 3).with_capacity(15.0),
                ComponentSpec::new(Exhaust, 1, Wall, 4),
            ],
        )
        .with_room(
            RoomCategory::Bathroom,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Geyser, 1, Wall, 3).with_capacity(15.0),
                ComponentSpec::new(Exhaust, 1, Wall, 4),
            ],
        )
        .with_room(
            RoomCategory::Utility,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Washing, 1, Wall, 3).with_capacity(15.0),
                ComponentSpec::new(Socket15A, 1, Wall, 4).with_capacity(15.0),
            ],
        )
        .with_room(
            RoomCategory::Entrance,
            vec![switch(), light(), ComponentSpec::new(Mdb, 1, Wall, 0)],
        )
        .with_room(
            RoomCategory::Office,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Socket5A, 3, Wall, 3).with_capacity(5.0),
                ComponentSpec::new(Ac, 1, Wall, 4).with_capacity(15.0),
            ],
        )
        .with_room(
            RoomCategory::Dining,
            vec![
                switch(),
                light(),
                ComponentSpec::new(Socket5A, 1, Wall, 3).with_capacity(5.0),
            ],
        )
        .with_room(RoomCategory::Corridor, vec![switch(), light()])
}
