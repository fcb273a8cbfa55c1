//! Connection builder: derives the hub → controller → dependent graph from placed components.
//!
//! Components are grouped by room in first-seen order. Within a room, every controller
//! gets a feed from the hub followed by one control run to each controllable or mixed
//! component of that room; direct and mixed components then get their own feed from the
//! hub. Passive components receive no feed. When the domain has an outfall, a final pass
//! connects every draining component to it, or to the component of its room it drains
//! through, and runs the outfall's own discharge to the terminal.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domains::{ComponentKind, ComponentRole, ConnectionCategory};
use crate::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::geometry::Path;
use crate::placement::PlacedComponent;
use crate::routing::{route_with, ElbowRouter, PathRouter};

/// A routed connection between two placed components.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// `conn_<n>`, numbered in emission order from 1.
    pub id: String,
    pub from: String,
    pub to: String,
    pub path: Path,
    pub category: ConnectionCategory,
    pub capacity: f32,
}

/// Builds connections routed with [`ElbowRouter`].
///
/// Returns an empty list when no hub is present.
pub fn build_connections<C: ComponentKind>(components: &[PlacedComponent<C>]) -> Vec<Connection> {
    build_connections_with_events(components, &ElbowRouter, &mut ())
}

pub fn build_connections_with_events<C: ComponentKind>(
    components: &[PlacedComponent<C>],
    router: &dyn PathRouter,
    sink: &mut dyn EventSink,
) -> Vec<Connection> {
    let Some(hub) = components.iter().find(|c| c.role() == ComponentRole::Hub) else {
        warn!(
            "No {} hub among {} components; no connections built.",
            C::DOMAIN,
            components.len()
        );
        if sink.wants(LayoutEventKind::MissingHub) {
            sink.send(LayoutEvent::MissingHub { domain: C::DOMAIN });
        }
        return Vec::new();
    };
    let outfall = components
        .iter()
        .find(|c| c.role() == ComponentRole::Outfall);
    let terminal = components
        .iter()
        .find(|c| c.role() == ComponentRole::Terminal);

    let mut builder = Builder {
        router,
        sink,
        connections: Vec::new(),
    };

    for (room_id, group) in group_by_room(components) {
        let controlled: Vec<_> = group
            .iter()
            .filter(|c| matches!(c.role(), ComponentRole::Controllable | ComponentRole::Mixed))
            .collect();
        let mut controllers = group
            .iter()
            .filter(|c| c.role() == ComponentRole::Controller)
            .peekable();

        let stranded = controlled
            .iter()
            .filter(|c| c.role() == ComponentRole::Controllable)
            .count();
        if controllers.peek().is_none() && stranded > 0 {
            debug!(
                "Room '{}' has {} switched components but no controller.",
                room_id, stranded
            );
            if builder.sink.wants(LayoutEventKind::Warning) {
                builder.sink.send(LayoutEvent::Warning {
                    context: room_id.to_string(),
                    message: format!(
                        "{stranded} components left unconnected without a controller"
                    ),
                });
            }
        }

        for controller in controllers {
            builder.connect(
                hub,
                controller,
                C::feed_category(),
                C::main_feed_capacity(),
            );
            for dependent in &controlled {
                builder.connect(
                    controller,
                    dependent,
                    C::control_category(),
                    dependent.capacity.unwrap_or(C::fallback_capacity()),
                );
            }
        }

        for direct in group
            .iter()
            .filter(|c| matches!(c.role(), ComponentRole::Direct | ComponentRole::Mixed))
        {
            builder.connect(
                hub,
                direct,
                C::feed_category(),
                direct.capacity.unwrap_or(C::fallback_capacity()),
            );
        }
    }

    if let Some(outfall) = outfall {
        for component in components {
            if component.role() == ComponentRole::Outfall {
                continue;
            }
            let Some(discharge) = component.component.discharge() else {
                continue;
            };
            let target = drain_target(components, component).unwrap_or(outfall);
            builder.connect(component, target, discharge.category, discharge.capacity);
        }
        if let (Some(terminal), Some(discharge)) = (terminal, outfall.component.discharge()) {
            builder.connect(outfall, terminal, discharge.category, discharge.capacity);
        }
    }

    builder.connections
}

/// Component of the same room that `component` drains through, if the domain names one.
fn drain_target<'c, C: ComponentKind>(
    components: &'c [PlacedComponent<C>],
    component: &PlacedComponent<C>,
) -> Option<&'c PlacedComponent<C>> {
    let via = component.component.drains_through()?;
    components
        .iter()
        .find(|c| c.component == via && c.room_id == component.room_id)
}

/// Non-anchor components grouped by room, rooms in first-seen order.
fn group_by_room<C: ComponentKind>(
    components: &[PlacedComponent<C>],
) -> Vec<(&str, Vec<&PlacedComponent<C>>)> {
    let mut groups: Vec<(&str, Vec<&PlacedComponent<C>>)> = Vec::new();
    for component in components {
        if matches!(
            component.role(),
            ComponentRole::Hub | ComponentRole::Outfall | ComponentRole::Terminal
        ) {
            continue;
        }
        let room_id = component.room_id.as_str();
        match groups.iter_mut().find(|(id, _)| *id == room_id) {
            Some((_, group)) => group.push(component),
            None => groups.push((room_id, vec![component])),
        }
    }
    groups
}

struct Builder<'a> {
    router: &'a dyn PathRouter,
    sink: &'a mut dyn EventSink,
    connections: Vec<Connection>,
}

impl Builder<'_> {
    fn connect<C>(
        &mut self,
        from: &PlacedComponent<C>,
        to: &PlacedComponent<C>,
        category: ConnectionCategory,
        capacity: f32,
    ) {
        let id = format!("conn_{}", self.connections.len() + 1);
        if self.sink.wants(LayoutEventKind::ConnectionMade) {
            self.sink.send(LayoutEvent::ConnectionMade {
                connection_id: id.clone(),
                from: from.id.clone(),
                to: to.id.clone(),
                category,
            });
        }
        self.connections.push(Connection {
            id,
            from: from.id.clone(),
            to: to.id.clone(),
            path: route_with(self.router, from.position, to.position),
            category,
            capacity,
        });
    }
}
