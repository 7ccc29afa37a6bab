//! Default sizes and settings (all in document units)

use crate::types::Length;

/// Marker glyph appended to every label repetition
pub const SEPARATOR: char = '●';

/// Extra width added to a tile row, compensating for metrics that
/// under-measure at small sizes
pub const TILE_WIDTH_MARGIN: f64 = 1.1;
/// Rows are rotated by `chars(unit) / TILE_ROTATION_DIVISOR` code points
pub const TILE_ROTATION_DIVISOR: usize = 2;

// Base font sizes, multiplied by the render factor
pub const PATH_FONT_SIZE: f64 = 2.0;
pub const NARROW_ROAD_FONT_SIZE: f64 = 2.5;
pub const MEDIUM_WIDE_ROAD_FONT_SIZE: f64 = 3.0;
pub const WIDE_ROAD_FONT_SIZE: f64 = 3.0;
pub const RAIL_FONT_SIZE: f64 = 2.5;
pub const RIVER_FONT_SIZE: f64 = 5.5;
pub const AREA_FONT_SIZE: f64 = 2.5;

pub const ROAD_FONT: &str = "Roboto Medium";
pub const WATERWAY_FONT: &str = "PT Serif";
pub const AREA_FONT: &str = "PT Serif";

pub const HALO_STROKE_WIDTH: Length = Length::units(0.5);
pub const DEBUG_STROKE_WIDTH: Length = Length::units(0.5);

pub const FACTOR: f64 = 1.0;
pub const TRIM: Length = Length::ZERO;
pub const ADMIN_LEVEL: i64 = 8;
