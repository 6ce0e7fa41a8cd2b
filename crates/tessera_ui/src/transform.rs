//! Layout transforms.
//!
//! A [`LayoutTransform`] turns either explicit absolute geometry or fractions
//! of its parent's geometry into pixel rectangles, in both unscaled (reference
//! resolution) and scaled (current resolution) space.
//!
//! ## Lifecycle
//!
//! ```text
//!   setter ──► dirty ──► (tree pushes dirty to subscribers)
//!                │
//!   read ────────┴──► recalculate (parent first) ──► clean ──► Recalculated
//! ```
//!
//! Transforms are owned by [`UiTree`](crate::tree::UiTree) nodes and mutated
//! only through the tree, which knows the parent relation and the screen.

use crate::error::{UiError, UiResult};
use crate::geometry::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// How a transform derives its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformType {
    /// Explicit unscaled location and size.
    #[default]
    Absolute,
    /// Fractions of the parent's resolved geometry. Needs a parent.
    Relative,
}

/// A width:height constraint.
///
/// Stored reduced, so `16:9` and `32:18` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// No constraint.
    #[default]
    Unspecified,
    /// Width to height.
    Fixed {
        /// Width term.
        width: u32,
        /// Height term.
        height: u32,
    },
}

impl AspectRatio {
    /// Creates a reduced ratio. A zero term means no constraint.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::Unspecified;
        }
        let divisor = gcd(width, height);
        Self::Fixed {
            width: width / divisor,
            height: height / divisor,
        }
    }

    /// Width divided by height, if constrained.
    #[must_use]
    pub fn as_f32(self) -> Option<f32> {
        match self {
            Self::Unspecified => None,
            Self::Fixed { width, height } => Some(width as f32 / height as f32),
        }
    }

    /// Returns true if `size` already has this ratio (or there is none).
    #[must_use]
    pub fn matches(self, size: Point) -> bool {
        match self {
            Self::Unspecified => true,
            Self::Fixed { width, height } => {
                i64::from(size.x) * i64::from(height) == i64::from(size.y) * i64::from(width)
            }
        }
    }

    /// Shrinks one axis of `size` so that it has this ratio.
    ///
    /// Too short (width/height below the target) loses height, otherwise
    /// width is lost. The result is truncated and never larger than `size`
    /// on either axis.
    #[must_use]
    pub fn apply(self, size: Point) -> Point {
        let Self::Fixed { width, height } = self else {
            return size;
        };
        if self.matches(size) {
            return size;
        }

        let (w, h) = (i64::from(size.x), i64::from(size.y));
        let (rw, rh) = (i64::from(width), i64::from(height));

        // w / h < rw / rh, cross-multiplied to stay exact
        if w * rh < rw * h {
            Point::new(size.x, (w * rh / rw) as i32)
        } else {
            Point::new((h * rw / rh) as i32, size.y)
        }
    }
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Resolved geometry of a clean transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Rectangle in reference-resolution pixels.
    pub unscaled: Rect,
    /// Rectangle in current-resolution pixels.
    pub scaled: Rect,
}

/// Layout state of one UI node.
///
/// The authored absolute location and size are kept apart from the resolved
/// ones, so constraints and relative layout never overwrite what was set.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTransform {
    transform_type: TransformType,
    unscaled_location: Point,
    unscaled_size: Point,
    resolved_location: Point,
    resolved_size: Point,
    relative_offset: Vec2,
    relative_size: Vec2,
    min_size: Point,
    max_size: Point,
    ratio: AspectRatio,
    scaled_location: Point,
    scaled_size: Point,
    needs_recalculation: bool,
    recalculations: u64,
}

impl LayoutTransform {
    /// Default minimum size.
    pub const DEFAULT_MIN_SIZE: Point = Point::new(1, 1);
    /// Default maximum size (unbounded).
    pub const DEFAULT_MAX_SIZE: Point = Point::new(i32::MAX, i32::MAX);

    /// An absolute transform covering `size` from the origin.
    ///
    /// Nodes start with this, spanning the default screen size.
    #[must_use]
    pub fn spanning(size: Point) -> Self {
        Self {
            transform_type: TransformType::Absolute,
            unscaled_location: Point::ZERO,
            unscaled_size: size,
            resolved_location: Point::ZERO,
            resolved_size: Point::ZERO,
            relative_offset: Vec2::ZERO,
            relative_size: Vec2::ONE,
            min_size: Self::DEFAULT_MIN_SIZE,
            max_size: Self::DEFAULT_MAX_SIZE,
            ratio: AspectRatio::Unspecified,
            scaled_location: Point::ZERO,
            scaled_size: Point::ZERO,
            needs_recalculation: true,
            recalculations: 0,
        }
    }

    /// Positioning mode.
    #[must_use]
    pub const fn transform_type(&self) -> TransformType {
        self.transform_type
    }

    /// Offset as a fraction of the parent's size.
    #[must_use]
    pub const fn relative_offset(&self) -> Vec2 {
        self.relative_offset
    }

    /// Size as a fraction of the parent's size.
    #[must_use]
    pub const fn relative_size(&self) -> Vec2 {
        self.relative_size
    }

    /// Minimum unscaled size.
    #[must_use]
    pub const fn min_size(&self) -> Point {
        self.min_size
    }

    /// Maximum unscaled size.
    #[must_use]
    pub const fn max_size(&self) -> Point {
        self.max_size
    }

    /// Aspect-ratio constraint.
    #[must_use]
    pub const fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// True until the next recalculation.
    #[must_use]
    pub const fn needs_recalculation(&self) -> bool {
        self.needs_recalculation
    }

    /// How many times this transform has been recalculated.
    #[must_use]
    pub const fn recalculation_count(&self) -> u64 {
        self.recalculations
    }

    /// Resolved geometry, or `None` while dirty.
    #[must_use]
    pub fn resolved(&self) -> Option<Geometry> {
        (!self.needs_recalculation).then(|| self.geometry())
    }

    pub(crate) fn geometry(&self) -> Geometry {
        Geometry {
            unscaled: Rect::from_location_size(self.resolved_location, self.resolved_size),
            scaled: Rect::from_location_size(self.scaled_location, self.scaled_size),
        }
    }

    pub(crate) fn invalidate(&mut self) -> bool {
        let was_clean = !self.needs_recalculation;
        self.needs_recalculation = true;
        was_clean
    }

    /// Parent presence is checked by the tree.
    pub(crate) fn set_transform_type(&mut self, transform_type: TransformType) -> bool {
        if self.transform_type == transform_type {
            return false;
        }
        self.transform_type = transform_type;
        self.invalidate();
        true
    }

    pub(crate) fn set_relative_offset(&mut self, offset: Vec2) -> UiResult<bool> {
        if offset.has_negative() {
            return Err(UiError::NegativeValue {
                field: "relative offset",
                x: offset.x,
                y: offset.y,
            });
        }
        Ok(self.replace(|t| &mut t.relative_offset, offset))
    }

    pub(crate) fn set_relative_size(&mut self, size: Vec2) -> UiResult<bool> {
        if size.has_negative() {
            return Err(UiError::NegativeValue {
                field: "relative size",
                x: size.x,
                y: size.y,
            });
        }
        Ok(self.replace(|t| &mut t.relative_size, size))
    }

    pub(crate) fn set_min_size(&mut self, size: Point) -> UiResult<bool> {
        if size.has_negative() {
            return Err(UiError::negative_point("min size", size));
        }
        if !size.fits_within(self.max_size) {
            return Err(UiError::MaxBelowMin {
                min: size,
                max: self.max_size,
            });
        }
        Ok(self.replace(|t| &mut t.min_size, size))
    }

    pub(crate) fn set_max_size(&mut self, size: Point) -> UiResult<bool> {
        if size.has_negative() {
            return Err(UiError::negative_point("max size", size));
        }
        if !self.min_size.fits_within(size) {
            return Err(UiError::MaxBelowMin {
                min: self.min_size,
                max: size,
            });
        }
        Ok(self.replace(|t| &mut t.max_size, size))
    }

    pub(crate) fn set_ratio(&mut self, ratio: AspectRatio) -> bool {
        self.replace(|t| &mut t.ratio, ratio)
    }

    pub(crate) fn set_unscaled_location(&mut self, location: Point) -> UiResult<bool> {
        self.require_absolute("location")?;
        Ok(self.replace(|t| &mut t.unscaled_location, location))
    }

    pub(crate) fn set_unscaled_size(&mut self, size: Point) -> UiResult<bool> {
        self.require_absolute("size")?;
        if size.has_negative() {
            return Err(UiError::negative_point("size", size));
        }
        Ok(self.replace(|t| &mut t.unscaled_size, size))
    }

    pub(crate) fn set_scaled_location(&mut self, location: Point, scale: Vec2) -> UiResult<bool> {
        self.require_absolute("scaled location")?;
        self.set_unscaled_location(unscale(location, scale))
    }

    pub(crate) fn set_scaled_size(&mut self, size: Point, scale: Vec2) -> UiResult<bool> {
        self.require_absolute("scaled size")?;
        if size.has_negative() {
            return Err(UiError::negative_point("scaled size", size));
        }
        self.set_unscaled_size(unscale(size, scale))
    }

    /// Recomputes geometry from the authored location and size.
    ///
    /// The ratio is applied to the authored size in place. The min/max clamp
    /// only affects the resolved size.
    pub(crate) fn recalculate_absolute(&mut self, scale: Vec2) -> Geometry {
        self.unscaled_size = self.ratio.apply(self.unscaled_size);
        self.finish(self.unscaled_location, self.unscaled_size, scale)
    }

    /// Recomputes geometry as fractions of `parent`, the parent's resolved
    /// unscaled rectangle.
    ///
    /// Size and offset both scale the parent's full size, so the ratio has no
    /// effect on a relative transform.
    pub(crate) fn recalculate_relative(&mut self, parent: Rect, scale: Vec2) -> Geometry {
        let size = parent.size().scale(self.relative_size);
        let location = parent.location() + parent.size().scale(self.relative_offset);
        self.finish(location, size, scale)
    }

    fn finish(&mut self, location: Point, size: Point, scale: Vec2) -> Geometry {
        self.resolved_location = location;
        self.resolved_size = size.clamp(self.min_size, self.max_size);

        self.scaled_location = self.resolved_location.scale(scale);
        self.scaled_size = self.resolved_size.scale(scale);

        self.needs_recalculation = false;
        self.recalculations += 1;
        self.geometry()
    }

    fn require_absolute(&self, field: &'static str) -> UiResult<()> {
        match self.transform_type {
            TransformType::Absolute => Ok(()),
            TransformType::Relative => Err(UiError::NotAbsolute { field }),
        }
    }

    fn replace<T: PartialEq>(&mut self, field: impl FnOnce(&mut Self) -> &mut T, value: T) -> bool {
        let slot = field(self);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.invalidate();
        true
    }
}

/// Scaled pixels back to unscaled ones, rounded to the nearest pixel.
fn unscale(value: Point, scale: Vec2) -> Point {
    Point::new(
        (value.x as f32 / scale.x).round() as i32,
        (value.y as f32 / scale.y).round() as i32,
    )
}
