//! Placement geometry configuration.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What a cycling placement strategy does once every slot of a room is used.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOverflow {
    /// Continue at `index % slot_count`.
    Wrap,
    /// Reuse the first slot for every further instance.
    FirstSlot,
}

impl SlotOverflow {
    /// Resolves a running slot counter to a slot index. `len` must be non-zero.
    #[inline]
    pub fn resolve(self, index: usize, len: usize) -> usize {
        debug_assert!(len > 0, "slot list must not be empty");
        if index < len {
            return index;
        }
        match self {
            SlotOverflow::Wrap => index % len,
            SlotOverflow::FirstSlot => 0,
        }
    }
}

/// Offsets used by the placement strategies, in plan units.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Distance along a wall from the room corner to a wall slot.
    pub wall_margin: f32,
    /// Distance from a wall into the room for a wall slot.
    pub wall_inset: f32,
    /// Inset of corner slots on both axes.
    pub corner_margin: f32,
    /// Inset of the hub and outfall from their anchor-room corner.
    pub hub_margin: f32,
    pub wall_overflow: SlotOverflow,
    pub ceiling_overflow: SlotOverflow,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wall_margin: 20.0,
            wall_inset: 10.0,
            corner_margin: 15.0,
            hub_margin: 20.0,
            wall_overflow: SlotOverflow::Wrap,
            ceiling_overflow: SlotOverflow::FirstSlot,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall slot margin and inset.
    pub fn with_wall_offsets(mut self, margin: f32, inset: f32) -> Self {
        self.wall_margin = margin;
        self.wall_inset = inset;
        self
    }

    pub fn with_corner_margin(mut self, corner_margin: f32) -> Self {
        self.corner_margin = corner_margin;
        self
    }

    pub fn with_hub_margin(mut self, hub_margin: f32) -> Self {
        self.hub_margin = hub_margin;
        self
    }

    pub fn with_wall_overflow(mut self, policy: SlotOverflow) -> Self {
        self.wall_overflow = policy;
        self
    }

    pub fn with_ceiling_overflow(mut self, policy: SlotOverflow) -> Self {
        self.ceiling_overflow = policy;
        self
    }

    /// Returns a copy with every negative or non-finite offset reset to its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            wall_margin: pick(self.wall_margin, defaults.wall_margin),
            wall_inset: pick(self.wall_inset, defaults.wall_inset),
            corner_margin: pick(self.corner_margin, defaults.corner_margin),
            hub_margin: pick(self.hub_margin, defaults.hub_margin),
            ..self.clone()
        }
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let offsets = [
            ("wall_margin", self.wall_margin),
            ("wall_inset", self.wall_inset),
            ("corner_margin", self.corner_margin),
            ("hub_margin", self.hub_margin),
        ];
        for (name, value) in offsets {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}
