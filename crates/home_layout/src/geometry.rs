//! Axis-aligned rectangles and orthogonal paths in plan coordinates.
//!
//! Plan space is screen-like: `x` grows to the right, `y` grows downward, so the
//! "top" of a room is its minimum `y`.
use std::fmt::Write as _;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four corners of a [`Rect`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Corners in clockwise order starting at the top-left.
    pub const CLOCKWISE: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// Axis-aligned rectangle given by its top-left origin and size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Returns `true` when the rectangle has no interior.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Returns the given corner moved `inset` units toward the interior on both axes.
    pub fn corner(&self, corner: Corner, inset: f32) -> Vec2 {
        let min = self.min();
        let max = self.max();
        match corner {
            Corner::TopLeft => Vec2::new(min.x + inset, min.y + inset),
            Corner::TopRight => Vec2::new(max.x - inset, min.y + inset),
            Corner::BottomRight => Vec2::new(max.x - inset, max.y - inset),
            Corner::BottomLeft => Vec2::new(min.x + inset, max.y - inset),
        }
    }

    /// Shrinks the rectangle by `amount` on every side. The size never goes negative.
    pub fn shrink(&self, amount: f32) -> Self {
        let size = (self.size - Vec2::splat(amount * 2.0)).max(Vec2::ZERO);
        Self {
            origin: self.origin + Vec2::splat(amount),
            size,
        }
    }
}

/// An ordered polyline from a source point to a destination point.
///
/// Paths produced by the routers only contain horizontal and vertical segments.
/// A path between coincident points is valid and has zero length.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub points: Vec<Vec2>,
}

impl Path {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the `(start, end)` pairs of every segment.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total Euclidean length over all segments.
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Returns `true` when every segment is horizontal, vertical, or zero-length.
    pub fn is_orthogonal(&self) -> bool {
        self.segments().all(|(a, b)| a.x == b.x || a.y == b.y)
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Drops consecutive duplicate points. A fully degenerate path keeps one point.
    pub fn simplified(&self) -> Path {
        let mut points: Vec<Vec2> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        Path { points }
    }

    /// Encodes the path as SVG path data, e.g. `M0,0 L10,0 L10,3`.
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{cmd}{},{}", p.x, p.y);
        }
        out
    }
}

impl From<Vec<Vec2>> for Path {
    fn from(points: Vec<Vec2>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_inset_toward_the_interior() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.corner(Corner::TopLeft, 5.0), Vec2::new(15.0, 25.0));
        assert_eq!(rect.corner(Corner::TopRight, 5.0), Vec2::new(105.0, 25.0));
        assert_eq!(rect.corner(Corner::BottomRight, 5.0), Vec2::new(105.0, 65.0));
        assert_eq!(rect.corner(Corner::BottomLeft, 5.0), Vec2::new(15.0, 65.0));
    }

    #[test]
    fn center_and_area() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
        assert_eq!(rect.area(), 4000.0);
        assert!(rect.contains(Vec2::new(100.0, 40.0)));
        assert!(!rect.contains(Vec2::new(100.1, 40.0)));
    }

    #[test]
    fn zero_sized_rect_is_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn shrink_clamps_at_zero() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0).shrink(3.0);
        assert_eq!(rect.size, Vec2::ZERO);
    }

    #[test]
    fn path_length_and_svg_encoding() {
        let path = Path::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 3.0),
        ]);
        assert_eq!(path.length(), 13.0);
        assert_eq!(path.segment_count(), 2);
        assert!(path.is_orthogonal());
        assert_eq!(path.to_svg_path(), "M0,0 L10,0 L10,3");
    }

    #[test]
    fn diagonal_segment_is_not_orthogonal() {
        let path = Path::new(vec![Vec2::ZERO, Vec2::new(1.0, 1.0)]);
        assert!(!path.is_orthogonal());
    }

    #[test]
    fn simplified_collapses_repeated_points() {
        let p = Vec2::new(2.0, 2.0);
        let path = Path::new(vec![p, p, p]);
        assert_eq!(path.simplified().points, vec![p]);
        assert_eq!(path.length(), 0.0);
    }
}
