//! Rule tables: which components a room of a given category receives, and where.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::room::RoomCategory;

/// Where inside a room the instances of a [`ComponentSpec`] go.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    /// Cycles through four points just inside the walls, shared across the room.
    Wall,
    /// Cycles through the room center and two interior points on the diagonal.
    Ceiling,
    /// Cycles through the four inset corners, per spec.
    Corner,
    /// Always the room centroid.
    Center,
}

/// A single rule-table entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSpec<C> {
    pub component: C,
    pub count: u32,
    pub placement: PlacementStrategy,
    /// Lower values are placed first.
    pub priority: i32,
    /// Amperage for electrical loads, bore in millimetres for plumbing fixtures.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<f32>,
}

impl<C> ComponentSpec<C> {
    pub fn new(component: C, count: u32, placement: PlacementStrategy, priority: i32) -> Self {
        Self {
            component,
            count,
            placement,
            priority,
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: f32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Immutable mapping from room category to an ordered list of [`ComponentSpec`]s.
///
/// Tables are plain values handed to the placement pass on every call, so tests and
/// callers can swap in their own rules without touching shared state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, PartialEq)]
pub struct RuleTable<C> {
    rooms: BTreeMap<RoomCategory, Vec<ComponentSpec<C>>>,
}

impl<C> Default for RuleTable<C> {
    fn default() -> Self {
        Self {
            rooms: BTreeMap::new(),
        }
    }
}

impl<C> RuleTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rules for a category.
    pub fn with_room(mut self, category: RoomCategory, specs: Vec<ComponentSpec<C>>) -> Self {
        self.rooms.insert(category, specs);
        self
    }

    pub fn get(&self, category: RoomCategory) -> Option<&[ComponentSpec<C>]> {
        self.rooms.get(&category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: RoomCategory) -> bool {
        self.rooms.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = RoomCategory> + '_ {
        self.rooms.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Specs for a category ordered by ascending priority; ties keep table order.
    pub fn by_priority(&self, category: RoomCategory) -> Vec<&ComponentSpec<C>> {
        let mut specs: Vec<_> = self.get(category).unwrap_or_default().iter().collect();
        specs.sort_by_key(|s| s.priority);
        specs
    }

    /// Total instances requested for a category.
    pub fn instance_count(&self, category: RoomCategory) -> u32 {
        self.get(category)
            .unwrap_or_default()
            .iter()
            .map(|s| s.count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_priority_is_stable_for_ties() {
        let table = RuleTable::new().with_room(
            RoomCategory::Office,
            vec![
                ComponentSpec::new("b", 1, PlacementStrategy::Wall, 2),
                ComponentSpec::new("a", 1, PlacementStrategy::Wall, 1),
                ComponentSpec::new("c", 1, PlacementStrategy::Wall, 2),
            ],
        );
        let ordered: Vec<_> = table
            .by_priority(RoomCategory::Office)
            .into_iter()
            .map(|s| s.component)
            .collect();
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_category_yields_nothing() {
        let table: RuleTable<&str> = RuleTable::new();
        assert!(table.get(RoomCategory::Kitchen).is_none());
        assert!(table.by_priority(RoomCategory::Kitchen).is_empty());
        assert_eq!(table.instance_count(RoomCategory::Kitchen), 0);
    }

    #[test]
    fn with_room_replaces_existing_rules() {
        let table = RuleTable::new()
            .with_room(
                RoomCategory::Dining,
                vec![ComponentSpec::new(1u8, 3, PlacementStrategy::Corner, 0)],
            )
            .with_room(
                RoomCategory::Dining,
                vec![ComponentSpec::new(2u8, 1, PlacementStrategy::Center, 0).with_capacity(5.0)],
            );
        assert_eq!(table.len(), 1);
        let specs = table.get(RoomCategory::Dining).unwrap();
        assert_eq!(specs[0].component, 2);
        assert_eq!(specs[0].capacity, Some(5.0));
    }
}
