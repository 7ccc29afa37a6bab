//! Strongly-typed numeric primitives for textmap (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` in the layout math where a unit is meant
//! - World coordinates and label sizes share one document unit
//! - Validation happens once, at the edges, via `try_new`

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in document units (world coordinates, font sizes and measured
/// text extents all use this unit).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length (const-friendly, unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn units(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_new(val)?;
        if len.0 < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_non_negative(val)?;
        if len.0 == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(len)
        }
    }

    /// Get the minimum of two lengths
    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    /// Get the maximum of two lengths
    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Strictly positive and finite
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Length> {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl Default for BBox<Length> {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox<Length> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Length(f64::MAX), y: Length(f64::MAX) },
            max: Point { x: Length(f64::MIN), y: Length(f64::MIN) },
        }
    }

    /// Box spanning two corners given in any order
    pub fn from_corners(a: Point<Length>, b: Point<Length>) -> Self {
        let mut bb = Self::new();
        bb.expand_point(a);
        bb.expand_point(b);
        bb
    }

    /// Smallest box containing every point
    pub fn enclosing(points: &[Point<Length>]) -> Self {
        let mut bb = Self::new();
        for p in points {
            bb.expand_point(*p);
        }
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point<Length>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Closed-interval overlap test; touching edges count as intersecting
    pub fn intersects(&self, other: &BBox<Length>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Get the width as a typed Length
    pub fn width(&self) -> Length { self.max.x - self.min.x }

    /// Get the height as a typed Length
    pub fn height(&self) -> Length { self.max.y - self.min.y }

    /// Overlap of two boxes; empty when they are disjoint
    pub fn intersection(&self, other: &BBox<Length>) -> Self {
        if !self.intersects(other) {
            return Self::new();
        }
        BBox {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        }
    }
}

/// World-space coordinate of a feature vertex
pub type Coord = Point<Length>;

/// World-space bounding envelope
pub type Envelope = BBox<Length>;

/// sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const NAVY: Color = Color::rgb(0, 0, 128);
    pub const CRIMSON: Color = Color::rgb(220, 20, 60);
    pub const ORANGE_RED: Color = Color::rgb(255, 69, 0);
    pub const DARK_ORANGE: Color = Color::rgb(255, 140, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const DARK_CYAN: Color = Color::rgb(0, 139, 139);
    pub const DODGER_BLUE: Color = Color::rgb(30, 144, 255);
    pub const YELLOW_GREEN: Color = Color::rgb(154, 205, 50);
    pub const BURLY_WOOD: Color = Color::rgb(222, 184, 135);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);
    pub const SADDLE_BROWN: Color = Color::rgb(139, 69, 19);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
