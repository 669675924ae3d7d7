//! Planar coordinates and the rectangular region agents are confined to.
//!
//! Coordinates are `f64`.  The reference scenario runs on a unit square with
//! an infection radius of 0.003, where single precision would leave only
//! about four significant digits for the proximity test.

use rand::Rng;

use crate::{CtError, CtResult};

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in region space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Use for threshold comparisons against a
    /// squared radius to avoid the `sqrt`.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Move `fraction` of the way from `self` toward `target`.
    ///
    /// For `fraction ∈ [0, 1]` the result is a convex combination of the two
    /// points, so it stays inside any rectangle containing both.
    #[inline]
    pub fn approach(self, target: Point, fraction: f64) -> Point {
        Point {
            x: self.x + (target.x - self.x) * fraction,
            y: self.y + (target.y - self.y) * fraction,
        }
    }

    /// `[x, y]` array form, as used by the `rstar` spatial index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

// ── RegionBounds ──────────────────────────────────────────────────────────────

/// Largest accepted width or height of a [`RegionBounds`].
pub const MAX_EXTENT: f64 = f64::MAX / 2.0;

/// Immutable axis-aligned rectangle defining the valid coordinate space.
///
/// Construct through [`RegionBounds::new`], which rejects zero-area,
/// inverted, and non-finite rectangles.  Fields are private so a validated
/// instance cannot be made degenerate afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds", into = "RawBounds"))]
pub struct RegionBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl RegionBounds {
    /// Width and height are capped at [`MAX_EXTENT`] as well, since uniform
    /// sampling rescales the extent and would overflow near `f64::MAX`.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> CtResult<Self> {
        let finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        let extent_ok = |lo: f64, hi: f64| hi > lo && hi - lo <= MAX_EXTENT;
        if !finite || !extent_ok(x_min, x_max) || !extent_ok(y_min, y_max) {
            return Err(CtError::DegenerateBounds { x_min, x_max, y_min, y_max });
        }
        Ok(Self { x_min, x_max, y_min, y_max })
    }

    /// `[0, 1] × [0, 1]`.
    pub const fn unit_square() -> Self {
        Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 }
    }

    #[inline] pub fn x_min(&self) -> f64 { self.x_min }
    #[inline] pub fn x_max(&self) -> f64 { self.x_max }
    #[inline] pub fn y_min(&self) -> f64 { self.y_min }
    #[inline] pub fn y_max(&self) -> f64 { self.y_max }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x_min + self.width() * 0.5,
            self.y_min + self.height() * 0.5,
        )
    }

    /// Closed-interval containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Nearest point inside the rectangle.  Absorbs floating-point drift at
    /// the edges; a point already inside is returned unchanged.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.x_min, self.x_max), p.y.clamp(self.y_min, self.y_max))
    }

    /// Map `p` from `from` to the point at the same relative position in
    /// `self`.  The centre of `from` lands on the centre of `self`.
    pub fn remap(&self, p: Point, from: &RegionBounds) -> Point {
        let fx = (p.x - from.x_min) / from.width();
        let fy = (p.y - from.y_min) / from.height();
        self.clamp(Point::new(
            self.x_min + fx * self.width(),
            self.y_min + fy * self.height(),
        ))
    }

    /// Sample a point uniformly at random inside the rectangle.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.gen_range(self.x_min..=self.x_max),
            rng.gen_range(self.y_min..=self.y_max),
        )
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::unit_square()
    }
}

/// Unvalidated wire form; deserialization funnels through [`RegionBounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for RegionBounds {
    type Error = CtError;
    fn try_from(raw: RawBounds) -> CtResult<Self> {
        RegionBounds::new(raw.x_min, raw.x_max, raw.y_min, raw.y_max)
    }
}

#[cfg(feature = "serde")]
impl From<RegionBounds> for RawBounds {
    fn from(b: RegionBounds) -> Self {
        RawBounds { x_min: b.x_min, x_max: b.x_max, y_min: b.y_min, y_max: b.y_max }
    }
}
