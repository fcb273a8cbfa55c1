//! Two-bend routing through a channel beside both endpoints.
use mint::Vector2;

use crate::routing::PathRouter;

/// Routes through a shared channel offset from the endpoints.
///
/// Horizontal-dominant pairs travel along a horizontal channel `clearance` above
/// the higher endpoint; otherwise along a vertical channel `clearance` left of the
/// leftmost endpoint. Always four points.
#[derive(Debug, Clone, Copy)]
pub struct ChannelRouter {
    pub clearance: f32,
}

impl Default for ChannelRouter {
    fn default() -> Self {
        Self { clearance: 20.0 }
    }
}

impl ChannelRouter {
    pub fn new(clearance: f32) -> Self {
        Self { clearance }
    }
}

impl PathRouter for ChannelRouter {
    fn route(&self, from: Vector2<f32>, to: Vector2<f32>) -> Vec<Vector2<f32>> {
        if (to.x - from.x).abs() > (to.y - from.y).abs() {
            let y = from.y.min(to.y) - self.clearance;
            vec![
                from,
                Vector2 { x: from.x, y },
                Vector2 { x: to.x, y },
                to,
            ]
        } else {
            let x = from.x.min(to.x) - self.clearance;
            vec![
                from,
                Vector2 { x, y: from.y },
                Vector2 { x, y: to.y },
                to,
            ]
        }
    }
}
