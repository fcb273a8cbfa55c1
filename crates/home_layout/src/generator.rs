//! High-level generator running placement, topology and routing for one domain.
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LayoutConfig;
use crate::domains::ComponentKind;
use crate::error::Result;
use crate::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::placement::{place_components_with_events, PlacedComponent};
use crate::room::{FloorPlan, Room};
use crate::routing::{ElbowRouter, PathRouter};
use crate::rules::RuleTable;
use crate::topology::{build_connections_with_events, Connection};

/// Counters describing a generated layout.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStats {
    pub components: usize,
    pub connections: usize,
    /// Sum of the capacity of every component that has one.
    pub total_load: f32,
    /// Distinct rooms holding at least one component.
    pub rooms_covered: usize,
    /// Rooms whose category has no rules.
    pub rooms_skipped: usize,
}

/// Result of a generation run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct LayoutResult<C> {
    pub components: Vec<PlacedComponent<C>>,
    pub connections: Vec<Connection>,
    pub stats: LayoutStats,
}

impl<C> Default for LayoutResult<C> {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            connections: Vec::new(),
            stats: LayoutStats::default(),
        }
    }
}

impl<C: ComponentKind> LayoutResult<C> {
    pub fn component(&self, id: &str) -> Option<&PlacedComponent<C>> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

pub struct LayoutGenerator<'a, C: ComponentKind> {
    /// Placement geometry applied to every run.
    pub config: LayoutConfig,
    /// Rule table consulted for each room.
    pub rules: &'a RuleTable<C>,
    router: Box<dyn PathRouter>,
}

impl<'a, C: ComponentKind> LayoutGenerator<'a, C> {
    /// Rejects a config with negative or non-finite offsets.
    pub fn try_new(config: LayoutConfig, rules: &'a RuleTable<C>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, rules))
    }

    /// Like [`Self::try_new`], but resets invalid offsets to their defaults instead.
    pub fn new(config: LayoutConfig, rules: &'a RuleTable<C>) -> Self {
        let config = if let Err(err) = config.validate() {
            warn!("{err}; falling back to default offsets.");
            config.sanitized()
        } else {
            config
        };
        Self {
            config,
            rules,
            router: Box::new(ElbowRouter),
        }
    }

    /// Replaces the default [`ElbowRouter`].
    pub fn with_router(mut self, router: impl PathRouter + 'static) -> Self {
        self.router = Box::new(router);
        self
    }

    pub fn router(&self) -> &dyn PathRouter {
        self.router.as_ref()
    }

    /// Generates the layout for the given rooms.
    pub fn generate(&self, rooms: &[Room]) -> LayoutResult<C> {
        self.generate_with_events(rooms, &mut ())
    }

    pub fn generate_with_events(&self, rooms: &[Room], sink: &mut dyn EventSink) -> LayoutResult<C> {
        if sink.wants(LayoutEventKind::RunStarted) {
            sink.send(LayoutEvent::RunStarted {
                domain: C::DOMAIN,
                room_count: rooms.len(),
            });
        }

        let result = if rooms.is_empty() {
            warn!("No rooms to lay out for {}.", C::DOMAIN);
            if sink.wants(LayoutEventKind::Warning) {
                sink.send(LayoutEvent::Warning {
                    context: C::DOMAIN.into(),
                    message: "No rooms to lay out".into(),
                });
            }
            LayoutResult::default()
        } else {
            let components = place_components_with_events(rooms, self.rules, &self.config, sink);
            let connections =
                build_connections_with_events(&components, self.router.as_ref(), sink);
            let stats = self.stats(rooms, &components, &connections);
            LayoutResult {
                components,
                connections,
                stats,
            }
        };

        info!(
            "{} layout: rooms: {} | components: {} | connections: {}.",
            C::DOMAIN,
            rooms.len(),
            result.stats.components,
            result.stats.connections
        );
        if sink.wants(LayoutEventKind::RunFinished) {
            sink.send(LayoutEvent::RunFinished {
                stats: result.stats.clone(),
            });
        }
        result
    }

    /// Generates the layout for every room of a floor plan.
    pub fn generate_plan(&self, plan: &FloorPlan) -> LayoutResult<C> {
        self.generate(&plan.rooms)
    }

    fn stats(
        &self,
        rooms: &[Room],
        components: &[PlacedComponent<C>],
        connections: &[Connection],
    ) -> LayoutStats {
        let covered: HashSet<&str> = components.iter().map(|c| c.room_id.as_str()).collect();
        LayoutStats {
            components: components.len(),
            connections: connections.len(),
            total_load: components.iter().filter_map(|c| c.capacity).sum(),
            rooms_covered: covered.len(),
            rooms_skipped: rooms
                .iter()
                .filter(|r| !self.rules.contains(r.category))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::{ElectricalComponent, PlumbingFixture};
    use crate::error::Error;
    use crate::events::VecSink;
    use crate::geometry::Rect;
    use crate::room::RoomCategory;
    use crate::routing::ChannelRouter;
    use crate::rules::{ComponentSpec, PlacementStrategy};

    fn room(id: &str, category: RoomCategory, x: f32, y: f32, w: f32, h: f32) -> Room {
        Room::try_new(id, id, category, Rect::new(x, y, w, h)).unwrap()
    }

    fn sample_rooms() -> Vec<Room> {
        vec![
            room("r1", RoomCategory::Bedroom, 0.0, 0.0, 100.0, 100.0),
            room("r2", RoomCategory::Entrance, 100.0, 0.0, 20.0, 20.0),
        ]
    }

    #[test]
    fn end_to_end_bedroom_and_entrance() {
        let rules = crate::domains::electrical::default_rules();
        let generator = LayoutGenerator::try_new(LayoutConfig::default(), &rules).unwrap();
        let result = generator.generate(&sample_rooms());

        assert_eq!(result.components.len(), 9);
        assert_eq!(result.connections.len(), 8);
        assert_eq!(
            result.stats,
            LayoutStats {
                components: 9,
                connections: 8,
                total_load: 125.0,
                rooms_covered: 2,
                rooms_skipped: 0,
            }
        );
        assert_eq!(
            result.component("MDB_1").map(|c| c.component),
            Some(ElectricalComponent::Mdb)
        );
    }

    #[test]
    fn empty_rooms_give_empty_result() {
        let rules = crate::domains::electrical::default_rules();
        let generator = LayoutGenerator::new(LayoutConfig::default(), &rules);
        let mut sink = VecSink::new();
        let result = generator.generate_with_events(&[], &mut sink);

        assert!(result.is_empty());
        assert!(result.connections.is_empty());
        assert_eq!(sink.count(LayoutEventKind::MissingHub), 0);
        assert_eq!(sink.count(LayoutEventKind::Warning), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let rules = crate::domains::electrical::default_rules();
        let config = LayoutConfig::default().with_hub_margin(f32::INFINITY);
        assert!(matches!(
            LayoutGenerator::try_new(config, &rules),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn new_falls_back_to_finite_offsets() {
        let rules = crate::domains::electrical::default_rules();
        let config = LayoutConfig::default()
            .with_hub_margin(f32::NAN)
            .with_wall_offsets(f32::INFINITY, 10.0);
        let generator = LayoutGenerator::new(config, &rules);
        assert!(generator.config.validate().is_ok());

        let result = generator.generate(&sample_rooms());
        assert!(result.components.iter().all(|c| c.position.is_finite()));
        assert!(result.connections.iter().all(|c| c.path.is_finite()));
        assert_eq!(
            result.component("MDB_1").map(|c| c.position),
            Some(glam::Vec2::new(120.0, 0.0))
        );
    }

    #[test]
    fn events_bracket_the_run() {
        let rules = crate::domains::electrical::default_rules();
        let generator = LayoutGenerator::new(LayoutConfig::default(), &rules);
        let mut sink = VecSink::new();
        let result = generator.generate_with_events(&sample_rooms(), &mut sink);
        let events = sink.into_inner();

        assert!(matches!(
            events.first(),
            Some(LayoutEvent::RunStarted {
                domain: "electrical",
                room_count: 2
            })
        ));
        match events.last() {
            Some(LayoutEvent::RunFinished { stats }) => assert_eq!(stats, &result.stats),
            other => panic!("unexpected last event: {other:?}"),
        }
        let made = events
            .iter()
            .filter(|e| e.kind() == LayoutEventKind::ConnectionMade)
            .count();
        assert_eq!(made, 8);
    }

    #[test]
    fn injected_rules_replace_the_defaults() {
        let rules = RuleTable::new().with_room(
            RoomCategory::Bedroom,
            vec![ComponentSpec::new(
                ElectricalComponent::Tv,
                1,
                PlacementStrategy::Center,
                1,
            )],
        );
        let generator = LayoutGenerator::new(LayoutConfig::default(), &rules);
        let result = generator.generate(&sample_rooms());

        // MDB + tv; the entrance has no entry in this table
        assert_eq!(result.components.len(), 2);
        assert_eq!(result.connections.len(), 1);
        assert_eq!(result.stats.rooms_skipped, 1);
        assert_eq!(result.connections[0].capacity, 5.0);
    }

    #[test]
    fn plumbing_with_custom_router() {
        let rules = crate::domains::plumbing::default_rules();
        let generator = LayoutGenerator::<PlumbingFixture>::new(LayoutConfig::default(), &rules)
            .with_router(ChannelRouter::new(10.0));
        let rooms = vec![
            room("u", RoomCategory::Utility, 0.0, 0.0, 40.0, 40.0),
            room("b", RoomCategory::Bathroom, 40.0, 0.0, 60.0, 60.0),
            room("bed", RoomCategory::Bedroom, 100.0, 0.0, 60.0, 60.0),
        ];
        let result = generator.generate(&rooms);

        // source, drain, sewer, washing machine, heater, wc, basin, shower
        assert_eq!(result.stats.components, 8);
        assert_eq!(result.stats.rooms_skipped, 1);
        assert_eq!(result.stats.rooms_covered, 2);
        assert!(result
            .connections
            .iter()
            .all(|c| c.path.points.len() == 4));
    }
}
