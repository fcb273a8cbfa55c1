//! Orthogonal path routing between two component positions.
//!
//! Routers only shape the drawn run; they see two points and nothing else, so no
//! obstacle avoidance happens here.
use glam::Vec2;
use mint::Vector2;

use crate::geometry::Path;

pub mod channel;
pub mod elbow;

pub use channel::ChannelRouter;
pub use elbow::ElbowRouter;

/// Trait for connection routing.
pub trait PathRouter: Send + Sync {
    fn route(&self, from: Vector2<f32>, to: Vector2<f32>) -> Vec<Vector2<f32>>;
}

/// Routes with [`ElbowRouter`] and wraps the points in a [`Path`].
pub fn route_path(from: Vec2, to: Vec2) -> Path {
    route_with(&ElbowRouter, from, to)
}

/// Routes with any router and wraps the points in a [`Path`].
pub fn route_with(router: &dyn PathRouter, from: Vec2, to: Vec2) -> Path {
    router
        .route(from.into(), to.into())
        .into_iter()
        .map(Vec2::from)
        .collect::<Vec<_>>()
        .into()
}
