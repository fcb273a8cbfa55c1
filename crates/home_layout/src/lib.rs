#![forbid(unsafe_code)]
//! home_layout: Rule-driven placement and routing of electrical and plumbing components in home floor plans.
//!
//! Modules:
//! - room, geometry: room rectangles, floor plans, and orthogonal paths
//! - rules, domains: per-category rule tables and the electrical/plumbing component sets
//! - placement: slot-based component placement per room
//! - topology: hub → controller → dependent connection graph
//! - routing: orthogonal path routers
//! - generator: end-to-end runs with stats and events
//! - floorplan: zoned floor-plan generation from plot dimensions
//!
//! For examples and docs, see README and docs.rs.
pub mod config;
pub mod domains;
pub mod error;
pub mod events;
pub mod floorplan;
pub mod generator;
pub mod geometry;
pub mod placement;
pub mod room;
pub mod routing;
pub mod rules;
pub mod topology;

/// Convenient re-exports for common types. Import with `use home_layout::prelude::*;`.
pub mod prelude {
    pub use crate::config::{LayoutConfig, SlotOverflow};
    pub use crate::domains::{
        AnchorSpec, ComponentKind, ComponentRole, ConnectionCategory, Discharge,
        ElectricalComponent, Marker, PlumbingFixture, Stroke, TerminalSpec,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, LayoutEvent, LayoutEventKind, VecSink};
    pub use crate::floorplan::{
        generate_floor_plan, Facing, FloorPlanInputs, GeneratedFloorPlan, Opening, Orientation,
        Staircase,
    };
    pub use crate::generator::{LayoutGenerator, LayoutResult, LayoutStats};
    pub use crate::geometry::{Corner, Path, Rect};
    pub use crate::placement::{place_components, place_components_with_events, PlacedComponent};
    pub use crate::room::{FloorPlan, Room, RoomCategory, RoomId};
    pub use crate::routing::{route_path, route_with, ChannelRouter, ElbowRouter, PathRouter};
    pub use crate::rules::{ComponentSpec, PlacementStrategy, RuleTable};
    pub use crate::topology::{build_connections, build_connections_with_events, Connection};
}
