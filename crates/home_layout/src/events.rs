//! Event types and sinks for observing layout generation.
//!
//! This module defines [`LayoutEvent`] and the sinks that receive events while running [`crate::placement::place_components_with_events`],
//! [`crate::topology::build_connections_with_events`], or a full
//! [`crate::generator::LayoutGenerator`] run. Diagnostics that the engines never raise
//! as errors (rooms without rules, a missing hub) surface here.
use glam::Vec2;

use crate::domains::{ComponentRole, ConnectionCategory};
use crate::generator::LayoutStats;
use crate::room::{RoomCategory, RoomId};

/// Describes events emitted while generating a layout.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// Emitted when a generation run starts.
    RunStarted {
        /// Domain name, e.g. `electrical`.
        domain: &'static str,
        /// Number of input rooms.
        room_count: usize,
    },

    /// Emitted when a room's category has no rule-table entry.
    RoomSkipped {
        room_id: RoomId,
        category: RoomCategory,
    },

    /// Emitted after the hub, outfall or terminal was placed.
    AnchorPlaced {
        component_id: String,
        role: ComponentRole,
        room_id: RoomId,
        position: Vec2,
    },

    /// Emitted for every component placed from a room's rules.
    ComponentPlaced {
        component_id: String,
        room_id: RoomId,
        position: Vec2,
    },

    /// Emitted once a room's rules are exhausted.
    RoomPlaced {
        room_id: RoomId,
        /// Number of components placed in this room.
        components: usize,
    },

    /// Emitted for every connection built.
    ConnectionMade {
        connection_id: String,
        from: String,
        to: String,
        category: ConnectionCategory,
    },

    /// Emitted when connections are requested but no hub component exists.
    MissingHub {
        domain: &'static str,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. room id, component id).
        context: String,
        /// Human-readable message.
        message: String,
    },

    /// Emitted when the run finishes.
    RunFinished {
        stats: LayoutStats,
    },
}

/// Discriminant of [`LayoutEvent`] used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    RoomSkipped,
    AnchorPlaced,
    ComponentPlaced,
    RoomPlaced,
    ConnectionMade,
    MissingHub,
    Warning,
    RunFinished,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::RoomSkipped { .. } => LayoutEventKind::RoomSkipped,
            LayoutEvent::AnchorPlaced { .. } => LayoutEventKind::AnchorPlaced,
            LayoutEvent::ComponentPlaced { .. } => LayoutEventKind::ComponentPlaced,
            LayoutEvent::RoomPlaced { .. } => LayoutEventKind::RoomPlaced,
            LayoutEvent::ConnectionMade { .. } => LayoutEventKind::ConnectionMade,
            LayoutEvent::MissingHub { .. } => LayoutEventKind::MissingHub,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Lets emitters skip building events nobody listens to.
    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    /// Number of collected events of the given kind.
    pub fn count(&self, kind: LayoutEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> LayoutEvent {
        LayoutEvent::Warning {
            context: context.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(LayoutEvent::MissingHub {
            domain: "electrical",
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(LayoutEventKind::MissingHub), 1);
        assert_eq!(sink.into_inner()[0].kind(), LayoutEventKind::Warning);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(LayoutEventKind::Warning));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        sink.send(warning("a"));
        assert!(sink.wants(LayoutEventKind::RoomPlaced));
        drop(sink);
        assert_eq!(count, 2);
    }
}
