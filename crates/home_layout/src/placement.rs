//! Placement engine: turns rooms and a rule table into concrete component positions.
//!
//! For every room the category's specs are taken in ascending priority (stable for
//! ties) and each instance is put on a slot chosen by its [`PlacementStrategy`]:
//! - wall: four points just inside the top, right, bottom and left walls, consumed by
//!   a counter shared by every wall spec of the room;
//! - ceiling: the center and two interior points on the diagonal, shared likewise;
//! - corner: the four inset corners, indexed by the instance index within its spec;
//! - center: the room centroid for every instance.
//!
//! The domain hub (and outfall, if any) is placed once before the room loop, in the
//! first room of the domain's anchor category or else the first room. A domain with an
//! outfall may add a terminal at a fixed offset from it. The output therefore holds the
//! rule instances of every covered room plus one entry per anchor: one for electrical,
//! three for plumbing (water source, main drain, sewer).
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::domains::{AnchorSpec, ComponentKind, ComponentRole, TerminalSpec};
use crate::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::geometry::{Corner, Rect};
use crate::room::{Room, RoomId};
use crate::rules::{ComponentSpec, PlacementStrategy, RuleTable};

/// A component instance at a concrete position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComponent<C> {
    /// `<token>_<n>` where `n` counts up from 1 across the whole run.
    pub id: String,
    pub component: C,
    pub position: Vec2,
    pub room_id: RoomId,
    pub label: String,
    pub capacity: Option<f32>,
    pub priority: i32,
}

impl<C: ComponentKind> PlacedComponent<C> {
    #[inline]
    pub fn role(&self) -> ComponentRole {
        self.component.role()
    }
}

/// Wall slots in order: top, right, bottom, left.
pub fn wall_slots(bounds: &Rect, config: &LayoutConfig) -> [Vec2; 4] {
    let (min, max) = (bounds.min(), bounds.max());
    let (margin, inset) = (config.wall_margin, config.wall_inset);
    [
        Vec2::new(min.x + margin, min.y + inset),
        Vec2::new(max.x - inset, min.y + margin),
        Vec2::new(min.x + margin, max.y - inset),
        Vec2::new(min.x + inset, min.y + margin),
    ]
}

/// Ceiling slots: center, then one third and two thirds along the diagonal.
pub fn ceiling_slots(bounds: &Rect) -> [Vec2; 3] {
    [
        bounds.center(),
        bounds.origin + bounds.size / 3.0,
        bounds.origin + bounds.size * 2.0 / 3.0,
    ]
}

/// Corner slots clockwise from the top-left.
pub fn corner_slots(bounds: &Rect, config: &LayoutConfig) -> [Vec2; 4] {
    Corner::CLOCKWISE.map(|c| bounds.corner(c, config.corner_margin))
}

/// Places components for every room. Pure; the inputs are not modified.
pub fn place_components<C: ComponentKind>(
    rooms: &[Room],
    rules: &RuleTable<C>,
    config: &LayoutConfig,
) -> Vec<PlacedComponent<C>> {
    place_components_with_events(rooms, rules, config, &mut ())
}

pub fn place_components_with_events<C: ComponentKind>(
    rooms: &[Room],
    rules: &RuleTable<C>,
    config: &LayoutConfig,
    sink: &mut dyn EventSink,
) -> Vec<PlacedComponent<C>> {
    let mut placer = Placer::<C>::new(config);

    let Some(anchor_room) = anchor_room::<C>(rooms) else {
        debug!("No rooms supplied for {} placement.", C::DOMAIN);
        return placer.placed;
    };

    for anchor in [C::hub(), C::outfall()].into_iter().flatten() {
        placer.place_anchor(anchor_room, &anchor, sink);
    }
    if let Some(terminal) = C::terminal() {
        placer.place_terminal(anchor_room, &terminal, sink);
    }

    for room in rooms {
        if !rules.contains(room.category) {
            debug!(
                "No {} rules for room '{}' ({}); skipping.",
                C::DOMAIN,
                room.id,
                room.category
            );
            if sink.wants(LayoutEventKind::RoomSkipped) {
                sink.send(LayoutEvent::RoomSkipped {
                    room_id: room.id.clone(),
                    category: room.category,
                });
            }
            continue;
        }

        let ordered = rules.by_priority(room.category);
        let placed_before = placer.placed.len();
        placer.place_room(room, &ordered, sink);
        let count = placer.placed.len() - placed_before;

        debug!("Room '{}': placed {} components.", room.id, count);
        if sink.wants(LayoutEventKind::RoomPlaced) {
            sink.send(LayoutEvent::RoomPlaced {
                room_id: room.id.clone(),
                components: count,
            });
        }
    }

    placer.placed
}

/// First room of the domain's anchor category, else the first room.
pub fn anchor_room<C: ComponentKind>(rooms: &[Room]) -> Option<&Room> {
    C::anchor_category()
        .and_then(|category| rooms.iter().find(|r| r.category == category))
        .or_else(|| rooms.first())
}

struct Placer<'a, C> {
    config: &'a LayoutConfig,
    next_id: u32,
    placed: Vec<PlacedComponent<C>>,
}

impl<'a, C: ComponentKind> Placer<'a, C> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            next_id: 1,
            placed: Vec::new(),
        }
    }

    fn next_id(&mut self, component: C) -> String {
        let id = format!("{}_{}", component.token(), self.next_id);
        self.next_id += 1;
        id
    }

    fn place_anchor(&mut self, room: &Room, anchor: &AnchorSpec<C>, sink: &mut dyn EventSink) {
        let position = room.bounds.corner(anchor.corner, self.config.hub_margin);
        self.push_anchor(
            room,
            anchor.component,
            anchor.label,
            Some(anchor.capacity),
            position,
            sink,
        );
    }

    /// Places the terminal below the outfall; without an outfall there is nothing to drain.
    fn place_terminal(
        &mut self,
        room: &Room,
        terminal: &TerminalSpec<C>,
        sink: &mut dyn EventSink,
    ) {
        let Some(outfall) = self
            .placed
            .iter()
            .find(|c| c.role() == ComponentRole::Outfall)
            .map(|c| c.position)
        else {
            return;
        };
        let position = outfall + terminal.offset;
        self.push_anchor(room, terminal.component, terminal.label, None, position, sink);
    }

    fn push_anchor(
        &mut self,
        room: &Room,
        component: C,
        label: &str,
        capacity: Option<f32>,
        position: Vec2,
        sink: &mut dyn EventSink,
    ) {
        let id = self.next_id(component);
        if sink.wants(LayoutEventKind::AnchorPlaced) {
            sink.send(LayoutEvent::AnchorPlaced {
                component_id: id.clone(),
                role: component.role(),
                room_id: room.id.clone(),
                position,
            });
        }
        self.placed.push(PlacedComponent {
            id,
            component,
            position,
            room_id: room.id.clone(),
            label: label.to_string(),
            capacity,
            priority: 0,
        });
    }

    fn place_room(&mut self, room: &Room, specs: &[&ComponentSpec<C>], sink: &mut dyn EventSink) {
        let walls = wall_slots(&room.bounds, self.config);
        let ceilings = ceiling_slots(&room.bounds);
        let corners = corner_slots(&room.bounds, self.config);
        let center = room.bounds.center();

        let mut wall_index = 0usize;
        let mut ceiling_index = 0usize;

        for spec in specs {
            if is_anchor(spec.component) {
                debug!(
                    "Room '{}' lists {} in its rules; it is placed once per run instead.",
                    room.id, spec.component
                );
                continue;
            }

            for i in 0..spec.count as usize {
                let position = match spec.placement {
                    PlacementStrategy::Wall => {
                        let slot = self.config.wall_overflow.resolve(wall_index, walls.len());
                        wall_index += 1;
                        walls[slot]
                    }
                    PlacementStrategy::Ceiling => {
                        let slot = self
                            .config
                            .ceiling_overflow
                            .resolve(ceiling_index, ceilings.len());
                        ceiling_index += 1;
                        ceilings[slot]
                    }
                    PlacementStrategy::Corner => corners[i % corners.len()],
                    PlacementStrategy::Center => center,
                };

                let id = self.next_id(spec.component);
                if sink.wants(LayoutEventKind::ComponentPlaced) {
                    sink.send(LayoutEvent::ComponentPlaced {
                        component_id: id.clone(),
                        room_id: room.id.clone(),
                        position,
                    });
                }
                self.placed.push(PlacedComponent {
                    id,
                    component: spec.component,
                    position,
                    room_id: room.id.clone(),
                    label: format!("{} {}", room.name, spec.component),
                    capacity: spec.capacity,
                    priority: spec.priority,
                });
            }
        }
    }
}

fn is_anchor<C: ComponentKind>(component: C) -> bool {
    [C::hub(), C::outfall()]
        .into_iter()
        .flatten()
        .any(|a| a.component == component)
        || C::terminal().is_some_and(|t| t.component == component)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domains::{ElectricalComponent, PlumbingFixture};
    use crate::events::VecSink;
    use crate::room::RoomCategory;

    fn room(id: &str, category: RoomCategory, x: f32, y: f32, w: f32, h: f32) -> Room {
        Room::try_new(id, id.to_uppercase(), category, Rect::new(x, y, w, h)).unwrap()
    }

    fn serial(id: &str) -> u32 {
        id.rsplit('_').next().unwrap().parse().unwrap()
    }

    fn sample_rooms() -> Vec<Room> {
        vec![
            room("r1", RoomCategory::Bedroom, 0.0, 0.0, 100.0, 100.0),
            room("r2", RoomCategory::Entrance, 100.0, 0.0, 20.0, 20.0),
        ]
    }

    #[test]
    fn empty_room_list_places_nothing() {
        let rules = crate::domains::electrical::default_rules();
        let placed = place_components::<ElectricalComponent>(&[], &rules, &LayoutConfig::default());
        assert!(placed.is_empty());
    }

    #[test]
    fn count_matches_rules_plus_one_hub() {
        let rules = crate::domains::electrical::default_rules();
        let rooms = sample_rooms();
        let placed = place_components(&rooms, &rules, &LayoutConfig::default());

        // bedroom: switch, light, fan, 2 sockets, ac; entrance: switch, light (+ MDB hub)
        assert_eq!(placed.len(), 9);
        let hubs: Vec<_> = placed
            .iter()
            .filter(|c| c.component == ElectricalComponent::Mdb)
            .collect();
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].id, "MDB_1");
        assert_eq!(hubs[0].room_id, "r2");
        assert_eq!(hubs[0].position, Vec2::new(120.0, 0.0));
        assert_eq!(hubs[0].capacity, Some(100.0));
    }

    #[test]
    fn every_component_references_an_input_room() {
        let rules = crate::domains::electrical::default_rules();
        let rooms = sample_rooms();
        let ids: HashSet<_> = rooms.iter().map(|r| r.id.as_str()).collect();
        for c in place_components(&rooms, &rules, &LayoutConfig::default()) {
            assert!(ids.contains(c.room_id.as_str()), "{}", c.id);
        }
    }

    #[test]
    fn lower_priority_gets_lower_serials() {
        let rules = crate::domains::electrical::default_rules();
        let placed = place_components(&sample_rooms(), &rules, &LayoutConfig::default());
        let bedroom: Vec<_> = placed.iter().filter(|c| c.room_id == "r1").collect();
        for a in &bedroom {
            for b in &bedroom {
                if a.priority < b.priority {
                    assert!(serial(&a.id) < serial(&b.id), "{} vs {}", a.id, b.id);
                }
            }
        }
        let order: Vec<_> = bedroom.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            order,
            vec!["switch_2", "light_3", "fan_4", "socket5A_5", "socket5A_6", "ac_7"]
        );
    }

    #[test]
    fn wall_and_ceiling_slots_are_shared_across_specs() {
        let rules = crate::domains::electrical::default_rules();
        let placed = place_components(&sample_rooms(), &rules, &LayoutConfig::default());
        let pos = |id: &str| placed.iter().find(|c| c.id == id).unwrap().position;

        assert_eq!(pos("switch_2"), Vec2::new(20.0, 10.0));
        assert_eq!(pos("socket5A_5"), Vec2::new(90.0, 20.0));
        assert_eq!(pos("socket5A_6"), Vec2::new(20.0, 90.0));
        assert_eq!(pos("ac_7"), Vec2::new(10.0, 20.0));
        assert_eq!(pos("light_3"), Vec2::new(50.0, 50.0));
        let fan = pos("fan_4");
        assert!((fan.x - 100.0 / 3.0).abs() < 1e-4);
        assert!((fan.y - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn wall_slots_wrap_and_ceiling_slots_fall_back_to_center() {
        use ElectricalComponent::*;
        let rules = RuleTable::new().with_room(
            RoomCategory::Office,
            vec![
                ComponentSpec::new(Socket5A, 6, PlacementStrategy::Wall, 1),
                ComponentSpec::new(Light, 5, PlacementStrategy::Ceiling, 2),
            ],
        );
        let office = room("o", RoomCategory::Office, 0.0, 0.0, 90.0, 90.0);
        let config = LayoutConfig::default();
        let placed = place_components(std::slice::from_ref(&office), &rules, &config);

        let walls = wall_slots(&office.bounds, &config);
        let sockets: Vec<_> = placed
            .iter()
            .filter(|c| c.component == Socket5A)
            .map(|c| c.position)
            .collect();
        assert_eq!(
            sockets,
            vec![walls[0], walls[1], walls[2], walls[3], walls[0], walls[1]]
        );

        let lights: Vec<_> = placed
            .iter()
            .filter(|c| c.component == Light)
            .map(|c| c.position)
            .collect();
        let center = Vec2::new(45.0, 45.0);
        assert_eq!(lights[0], center);
        assert_eq!(lights[1], Vec2::new(30.0, 30.0));
        assert_eq!(lights[2], Vec2::new(60.0, 60.0));
        assert_eq!(lights[3], center);
        assert_eq!(lights[4], center);
    }

    #[test]
    fn corner_slots_restart_per_spec_and_center_collapses() {
        use ElectricalComponent::*;
        let rules = RuleTable::new().with_room(
            RoomCategory::Dining,
            vec![
                ComponentSpec::new(Light, 5, PlacementStrategy::Corner, 1),
                ComponentSpec::new(Fan, 1, PlacementStrategy::Corner, 2),
                ComponentSpec::new(Tv, 3, PlacementStrategy::Center, 3),
            ],
        );
        let dining = room("d", RoomCategory::Dining, 10.0, 10.0, 100.0, 60.0);
        let config = LayoutConfig::default();
        let placed = place_components(std::slice::from_ref(&dining), &rules, &config);
        let corners = corner_slots(&dining.bounds, &config);

        let lights: Vec<_> = placed
            .iter()
            .filter(|c| c.component == Light)
            .map(|c| c.position)
            .collect();
        assert_eq!(lights, vec![corners[0], corners[1], corners[2], corners[3], corners[0]]);

        let fan = placed.iter().find(|c| c.component == Fan).unwrap();
        assert_eq!(fan.position, corners[0]);

        for tv in placed.iter().filter(|c| c.component == Tv) {
            assert_eq!(tv.position, Vec2::new(60.0, 40.0));
        }
    }

    #[test]
    fn rooms_without_rules_are_skipped_and_reported() {
        let rules = crate::domains::plumbing::default_rules();
        let rooms = vec![
            room("bed", RoomCategory::Bedroom, 0.0, 0.0, 50.0, 50.0),
            room("bath", RoomCategory::Bathroom, 50.0, 0.0, 40.0, 40.0),
        ];
        let mut sink = VecSink::new();
        let placed = place_components_with_events(
            &rooms,
            &rules,
            &LayoutConfig::default(),
            &mut sink,
        );

        assert!(placed
            .iter()
            .filter(|c| c.room_id == "bed")
            .all(|c| matches!(
                c.role(),
                ComponentRole::Hub | ComponentRole::Outfall | ComponentRole::Terminal
            )));
        let skipped: Vec<_> = sink
            .as_slice()
            .iter()
            .filter_map(|e| match e {
                LayoutEvent::RoomSkipped { room_id, .. } => Some(room_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec!["bed"]);
    }

    #[test]
    fn plumbing_places_source_and_drain_in_first_room_without_utility() {
        let rules = crate::domains::plumbing::default_rules();
        let rooms = vec![room("bath", RoomCategory::Bathroom, 0.0, 0.0, 60.0, 60.0)];
        let placed = place_components(&rooms, &rules, &LayoutConfig::default());

        assert_eq!(placed[0].component, PlumbingFixture::WaterSource);
        assert_eq!(placed[0].position, Vec2::new(20.0, 40.0));
        assert_eq!(placed[1].component, PlumbingFixture::MainDrain);
        assert_eq!(placed[1].position, Vec2::new(40.0, 40.0));
        assert_eq!(placed[2].component, PlumbingFixture::Sewer);
        assert_eq!(placed[2].id, "sewer_3");
        assert_eq!(placed[2].position, Vec2::new(40.0, 140.0));
        assert_eq!(placed[2].room_id, "bath");
        // heater, wc, basin, shower
        assert_eq!(placed.len(), 7);
    }

    #[test]
    fn count_is_rule_instances_plus_domain_anchors() {
        let rules = crate::domains::plumbing::default_rules();
        let rooms = vec![
            room("u", RoomCategory::Utility, 0.0, 0.0, 40.0, 40.0),
            room("k", RoomCategory::Kitchen, 40.0, 0.0, 60.0, 60.0),
            room("b", RoomCategory::Bathroom, 100.0, 0.0, 60.0, 60.0),
            room("p", RoomCategory::PowderRoom, 160.0, 0.0, 30.0, 30.0),
            room("bed", RoomCategory::Bedroom, 190.0, 0.0, 60.0, 60.0),
        ];
        let placed = place_components(&rooms, &rules, &LayoutConfig::default());

        let from_rules: usize = rooms
            .iter()
            .map(|r| rules.instance_count(r.category) as usize)
            .sum();
        let anchors = placed
            .iter()
            .filter(|c| {
                matches!(
                    c.role(),
                    ComponentRole::Hub | ComponentRole::Outfall | ComponentRole::Terminal
                )
            })
            .count();
        assert_eq!(anchors, 3);
        assert_eq!(placed.len(), from_rules + 3);

        let electrical = crate::domains::electrical::default_rules();
        let wired = place_components(&sample_rooms(), &electrical, &LayoutConfig::default());
        assert!(wired.iter().all(|c| c.role() != ComponentRole::Terminal));
    }

    #[test]
    fn placement_is_deterministic() {
        let rules = crate::domains::electrical::default_rules();
        let rooms = sample_rooms();
        let config = LayoutConfig::default();
        assert_eq!(
            place_components(&rooms, &rules, &config),
            place_components(&rooms, &rules, &config)
        );
    }

    #[test]
    fn zero_count_and_degenerate_rooms_do_not_panic() {
        use ElectricalComponent::*;
        let rules = RuleTable::new().with_room(
            RoomCategory::Corridor,
            vec![
                ComponentSpec::new(Light, 0, PlacementStrategy::Ceiling, 1),
                ComponentSpec::new(Switch, 1, PlacementStrategy::Wall, 2),
            ],
        );
        let flat = Room {
            id: "flat".into(),
            name: "Flat".into(),
            category: RoomCategory::Corridor,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            color: None,
        };
        let placed = place_components(&[flat], &rules, &LayoutConfig::default());
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|c| c.position.is_finite()));
    }
}
