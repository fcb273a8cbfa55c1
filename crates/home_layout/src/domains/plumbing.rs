//! Plumbing domain: water source, bathroom water heaters, fixtures, the main drain and
//! the sewer connection.
//!
//! Capacities are nominal pipe bores in millimetres. Every fixture takes a cold feed
//! from the water source; bathrooms also get a heater whose hot branch serves the
//! basin. The discharge pass drains fixtures into the main drain (kitchen sinks go
//! through the grease trap first) and runs the main soil pipe on to the sewer.
use std::fmt;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domains::{
    AnchorSpec, ComponentKind, ComponentRole, ConnectionCategory, Discharge, Marker,
    TerminalSpec,
};
use crate::geometry::Corner;
use crate::room::RoomCategory;
use crate::rules::PlacementStrategy::{Ceiling, Corner as CornerSlot, Wall};
use crate::rules::{ComponentSpec, RuleTable};

pub const MAIN_FEED_MM: f32 = 25.0;
pub const FALLBACK_MM: f32 = 15.0;
pub const SOURCE_MM: f32 = 32.0;
pub const SOIL_PIPE_MM: f32 = 100.0;
pub const WASTE_PIPE_MM: f32 = 50.0;
/// Distance of the sewer connection below the main drain.
pub const SEWER_DROP: f32 = 100.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlumbingFixture {
    WaterSource,
    MainDrain,
    Sewer,
    WaterHeater,
    Wc,
    Basin,
    Shower,
    #[cfg_attr(feature = "serde", serde(rename = "sink"))]
    KitchenSink,
    WashingMachine,
    GreaseTrap,
}

impl fmt::Display for PlumbingFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl ComponentKind for PlumbingFixture {
    const DOMAIN: &'static str = "plumbing";

    fn role(self) -> ComponentRole {
        use PlumbingFixture::*;
        match self {
            WaterSource => ComponentRole::Hub,
            MainDrain => ComponentRole::Outfall,
            Sewer => ComponentRole::Terminal,
            WaterHeater => ComponentRole::Controller,
            Basin => ComponentRole::Mixed,
            Wc | Shower | KitchenSink | WashingMachine => ComponentRole::Direct,
            GreaseTrap => ComponentRole::Passive,
        }
    }

    fn token(self) -> &'static str {
        use PlumbingFixture::*;
        match self {
            WaterSource => "water-source",
            MainDrain => "main-drain",
            Sewer => "sewer",
            WaterHeater => "water-heater",
            Wc => "wc",
            Basin => "basin",
            Shower => "shower",
            KitchenSink => "sink",
            WashingMachine => "washing-machine",
            GreaseTrap => "grease-trap",
        }
    }

    fn marker(self) -> Marker {
        use PlumbingFixture::*;
        const FIXTURE: [u8; 3] = [0x08, 0x91, 0xb2];
        let (color, radius, glyph) = match self {
            WaterSource => ([0x1d, 0x4e, 0xd8], 8, 'W'),
            MainDrain => ([0x1f, 0x29, 0x37], 8, 'D'),
            Sewer => ([0x1f, 0x29, 0x37], 6, 'X'),
            WaterHeater => ([0xdc, 0x26, 0x26], 6, 'H'),
            Wc => (FIXTURE, 6, 'C'),
            Basin => (FIXTURE, 5, 'B'),
            Shower => (FIXTURE, 5, 'S'),
            KitchenSink => (FIXTURE, 5, 'K'),
            WashingMachine => (FIXTURE, 5, 'M'),
            GreaseTrap => ([0xf5, 0x9e, 0x0b], 4, 'G'),
        };
        Marker {
            color,
            radius,
            glyph,
        }
    }

    fn hub() -> Option<AnchorSpec<Self>> {
        Some(AnchorSpec {
            component: PlumbingFixture::WaterSource,
            label: "Water Source",
            capacity: SOURCE_MM,
            corner: Corner::BottomLeft,
        })
    }

    fn outfall() -> Option<AnchorSpec<Self>> {
        Some(AnchorSpec {
            component: PlumbingFixture::MainDrain,
            label: "Main Drain",
            capacity: SOIL_PIPE_MM,
            corner: Corner::BottomRight,
        })
    }

    fn terminal() -> Option<TerminalSpec<Self>> {
        Some(TerminalSpec {
            component: PlumbingFixture::Sewer,
            label: "Sewer Connection",
            offset: Vec2::new(0.0, SEWER_DROP),
        })
    }

    fn anchor_category() -> Option<RoomCategory> {
        Some(RoomCategory::Utility)
    }

    fn feed_category() -> ConnectionCategory {
        ConnectionCategory::WaterSupply
    }

    fn control_category() -> ConnectionCategory {
        ConnectionCategory::HotWater
    }

    fn main_feed_capacity() -> f32 {
        MAIN_FEED_MM
    }

    fn fallback_capacity() -> f32 {
        FALLBACK_MM
    }

    fn discharge(self) -> Option<Discharge> {
        use PlumbingFixture::*;
        match self {
            Wc | MainDrain => Some(Discharge {
                category: ConnectionCategory::SoilPipe,
                capacity: SOIL_PIPE_MM,
            }),
            Basin | Shower | KitchenSink | WashingMachine | GreaseTrap => Some(Discharge {
                category: ConnectionCategory::Drainage,
                capacity: WASTE_PIPE_MM,
            }),
            WaterSource | Sewer | WaterHeater => None,
        }
    }

    fn drains_through(self) -> Option<Self> {
        match self {
            PlumbingFixture::KitchenSink => Some(PlumbingFixture::GreaseTrap),
            _ => None,
        }
    }

    fn default_rules() -> RuleTable<Self> {
        default_rules()
    }
}

/// The stock plumbing rule table. Dry rooms have no entry; only bathrooms get hot water.
pub fn default_rules() -> RuleTable<PlumbingFixture> {
    use PlumbingFixture::*;

    RuleTable::new()
        .with_room(
            RoomCategory::Bathroom,
            vec![
                ComponentSpec::new(WaterHeater, 1, Wall, 1),
                ComponentSpec::new(Wc, 1, CornerSlot, 2).with_capacity(15.0),
                ComponentSpec::new(Basin, 1, Wall, 3).with_capacity(15.0),
                ComponentSpec::new(Shower, 1, Ceiling, 4).with_capacity(15.0),
            ],
        )
        .with_room(
            RoomCategory::Kitchen,
            vec![
                ComponentSpec::new(KitchenSink, 1, Wall, 1).with_capacity(15.0),
                ComponentSpec::new(GreaseTrap, 1, CornerSlot, 2),
            ],
        )
        .with_room(
            RoomCategory::Utility,
            vec![ComponentSpec::new(WashingMachine, 1, Wall, 1).with_capacity(20.0)],
        )
        .with_room(
            RoomCategory::PowderRoom,
            vec![
                ComponentSpec::new(Wc, 1, CornerSlot, 1).with_capacity(15.0),
                ComponentSpec::new(Basin, 1, Wall, 2).with_capacity(15.0),
            ],
        )
}
