//! Single-bend orthogonal routing.
use mint::Vector2;

use crate::routing::PathRouter;

/// Routes along the dominant axis first, then turns once.
///
/// Horizontal displacement strictly greater than vertical gives
/// `(x1,y1) → (x2,y1) → (x2,y2)`; anything else (ties included) gives
/// `(x1,y1) → (x1,y2) → (x2,y2)`. Always three points, so coincident endpoints yield a
/// zero-length path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElbowRouter;

impl PathRouter for ElbowRouter {
    fn route(&self, from: Vector2<f32>, to: Vector2<f32>) -> Vec<Vector2<f32>> {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let bend = if dx > dy {
            Vector2 { x: to.x, y: from.y }
        } else {
            Vector2 { x: from.x, y: to.y }
        };
        vec![from, bend, to]
    }
}
