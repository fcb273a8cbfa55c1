//! Domain descriptors for the layout engines.
//!
//! A domain is a closed component enum implementing [`ComponentKind`]. The trait tells
//! the shared placement and topology passes which type is the hub, which types are
//! local controllers and which are served through them, which take a dedicated feed,
//! where drainage ends, and which capacities to use when a rule leaves them unset.
//!
//! Two domains ship with the crate: [`electrical::ElectricalComponent`] and
//! [`plumbing::PlumbingFixture`].
use std::fmt;
use std::hash::Hash;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Corner;
use crate::room::RoomCategory;
use crate::rules::RuleTable;

pub mod electrical;
pub mod plumbing;

pub use electrical::ElectricalComponent;
pub use plumbing::PlumbingFixture;

/// How a component participates in the connection topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    /// The single distribution point every feed starts from.
    Hub,
    /// The single collection point that discharges end at.
    Outfall,
    /// Room-local switch or valve between the hub and the room's dependents.
    Controller,
    /// Fed through the room's controllers.
    Controllable,
    /// Fed straight from the hub.
    Direct,
    /// Fed straight from the hub and, in addition, from every controller of its room.
    Mixed,
    /// Off-site end point the outfall discharges into.
    Terminal,
    /// Receives no feed.
    Passive,
}

/// Category of a generated connection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionCategory {
    Power,
    Control,
    WaterSupply,
    HotWater,
    Drainage,
    SoilPipe,
}

impl ConnectionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionCategory::Power => "power",
            ConnectionCategory::Control => "control",
            ConnectionCategory::WaterSupply => "water-supply",
            ConnectionCategory::HotWater => "hot-water",
            ConnectionCategory::Drainage => "drainage",
            ConnectionCategory::SoilPipe => "soil-pipe",
        }
    }

    /// Render hint for a connection of this category carrying `capacity`.
    pub fn stroke(self, capacity: f32) -> Stroke {
        match self {
            ConnectionCategory::Power => Stroke {
                color: [0xdc, 0x26, 0x26],
                width: if capacity > 10.0 { 3 } else { 2 },
                dashed: false,
            },
            ConnectionCategory::Control => Stroke {
                color: [0xf5, 0x9e, 0x0b],
                width: if capacity > 10.0 { 3 } else { 2 },
                dashed: true,
            },
            ConnectionCategory::WaterSupply => Stroke {
                color: [0x25, 0x63, 0xeb],
                width: 3,
                dashed: false,
            },
            ConnectionCategory::HotWater => Stroke {
                color: [0xdc, 0x26, 0x26],
                width: 3,
                dashed: false,
            },
            ConnectionCategory::Drainage => Stroke {
                color: [0x16, 0xa3, 0x4a],
                width: 4,
                dashed: true,
            },
            ConnectionCategory::SoilPipe => Stroke {
                color: [0x1f, 0x29, 0x37],
                width: 6,
                dashed: false,
            },
        }
    }
}

impl fmt::Display for ConnectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line style for drawing a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    pub color: [u8; 3],
    pub width: u32,
    pub dashed: bool,
}

/// Marker style for drawing a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    pub color: [u8; 3],
    pub radius: u32,
    pub glyph: char,
}

/// Describes a component placed once per run, outside the per-room loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorSpec<C> {
    pub component: C,
    pub label: &'static str,
    pub capacity: f32,
    /// Corner of the anchor room the component sits in.
    pub corner: Corner,
}

/// Describes a component placed at a fixed offset from the outfall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerminalSpec<C> {
    pub component: C,
    pub label: &'static str,
    pub offset: Vec2,
}

/// Discharge connection from a fixture to the outfall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Discharge {
    pub category: ConnectionCategory,
    pub capacity: f32,
}

/// Domain descriptor implemented by each closed component enum.
pub trait ComponentKind: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// Short domain name used in events and logs.
    const DOMAIN: &'static str;

    fn role(self) -> ComponentRole;

    /// Identifier prefix and display token, e.g. `MDB` or `socket5A`.
    fn token(self) -> &'static str;

    fn marker(self) -> Marker;

    /// The hub placed once per run, if the domain has one.
    fn hub() -> Option<AnchorSpec<Self>>;

    /// The outfall placed once per run, if the domain has one.
    fn outfall() -> Option<AnchorSpec<Self>> {
        None
    }

    /// The terminal the outfall discharges into. Only placed when an outfall exists.
    fn terminal() -> Option<TerminalSpec<Self>> {
        None
    }

    /// Category of room the hub and outfall are anchored in. Falls back to the first room.
    fn anchor_category() -> Option<RoomCategory>;

    /// Category of hub → controller and hub → direct connections.
    fn feed_category() -> ConnectionCategory;

    /// Category of controller → dependent connections.
    fn control_category() -> ConnectionCategory;

    /// Capacity of every hub → controller feed.
    fn main_feed_capacity() -> f32;

    /// Capacity used when a component carries no rating of its own.
    fn fallback_capacity() -> f32;

    /// Discharge of this component, if it drains. The outfall's own discharge runs to
    /// the terminal.
    fn discharge(self) -> Option<Discharge> {
        None
    }

    /// Component of the same room this one drains into instead of the outfall.
    fn drains_through(self) -> Option<Self> {
        None
    }

    fn default_rules() -> RuleTable<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_stroke_thickens_above_ten() {
        assert_eq!(ConnectionCategory::Power.stroke(20.0).width, 3);
        assert_eq!(ConnectionCategory::Power.stroke(10.0).width, 2);
        assert_eq!(ConnectionCategory::Power.stroke(5.0).width, 2);
    }

    #[test]
    fn control_lines_are_dashed() {
        assert!(ConnectionCategory::Control.stroke(5.0).dashed);
        assert!(!ConnectionCategory::Power.stroke(5.0).dashed);
    }

    #[test]
    fn category_names_are_kebab_case() {
        assert_eq!(ConnectionCategory::WaterSupply.to_string(), "water-supply");
        assert_eq!(ConnectionCategory::SoilPipe.as_str(), "soil-pipe");
    }
}
