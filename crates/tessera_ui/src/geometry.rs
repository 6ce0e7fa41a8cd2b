//! Geometry primitives for layout and drawing.
//!
//! Layout runs in integer pixel space ([`Point`], [`Rect`]); scale factors,
//! fractions and draw positions use [`Vec2`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Integer 2D point or size, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if either component is negative.
    #[must_use]
    pub const fn has_negative(self) -> bool {
        self.x < 0 || self.y < 0
    }

    /// Componentwise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Componentwise clamp into `[lo, hi]`.
    ///
    /// `lo` must not exceed `hi` on either axis.
    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Returns true if both components are `<=` the other's.
    #[must_use]
    pub const fn fits_within(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    /// Converts to a float vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Componentwise product with a float vector, truncated to pixels.
    #[must_use]
    pub fn scale(self, factor: Vec2) -> Self {
        Self::new(
            (self.x as f32 * factor.x) as i32,
            (self.y as f32 * factor.y) as i32,
        )
    }
}

// Pixel arithmetic saturates. `scale` already pins huge products to the i32
// range, so offsets derived from it must not overflow when added back.
impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Float 2D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// (1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// Unit X vector.
    pub const X: Self = Self::new(1.0, 0.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if either component is negative.
    #[must_use]
    pub fn has_negative(self) -> bool {
        self.x < 0.0 || self.y < 0.0
    }

    /// Unit vector pointing along `angle` radians.
    ///
    /// An angle of exactly zero yields [`Vec2::X`] without touching the
    /// trigonometric functions.
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        if angle == 0.0 {
            Self::X
        } else {
            Self::new(angle.cos(), angle.sin())
        }
    }

    /// Rotates the vector by `angle` radians.
    #[must_use]
    pub fn rotate(self, angle: f32) -> Self {
        if angle == 0.0 {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div for Vec2 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

/// A rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from a location and a size.
    #[must_use]
    pub const fn from_location_size(location: Point, size: Point) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Returns the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns true if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 20, 100, 50);

        assert!(rect.contains(Point::new(50, 30)));
        assert!(!rect.contains(Point::new(5, 30)));
        assert!(!rect.contains(Point::new(50, 80)));
        // Right and bottom edges are exclusive
        assert!(!rect.contains(Point::new(110, 30)));
    }

    #[test]
    fn test_point_scale_truncates() {
        let scaled = Point::new(101, 51).scale(Vec2::new(0.5, 0.5));
        assert_eq!(scaled, Point::new(50, 25));
    }

    #[test]
    fn test_point_arithmetic_saturates() {
        let far = Point::new(10, 0) + Point::new(i32::MAX, 0);
        assert_eq!(far, Point::new(i32::MAX, 0));

        let near = Point::new(-10, 0) - Point::new(i32::MAX, 0);
        assert_eq!(near, Point::new(i32::MIN, 0));
    }

    #[test]
    fn test_edges_saturate() {
        let rect = Rect::new(i32::MAX - 5, 10, 100, i32::MAX);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.bottom(), i32::MAX);
        assert!(rect.contains(Point::new(i32::MAX - 1, 20)));
    }

    #[test]
    fn test_clamp() {
        let p = Point::new(-4, 500).clamp(Point::new(1, 1), Point::new(100, 100));
        assert_eq!(p, Point::new(1, 100));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotate(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_angle_zero_is_exact() {
        assert_eq!(Vec2::from_angle(0.0), Vec2::X);
    }
}
