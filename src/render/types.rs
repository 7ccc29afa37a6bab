//! Core types for label layout: styles, layout results and anchors

use glam::DVec2;

use crate::types::{Color, Length};

/// Everything the text metrics port needs to size a string
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: Length,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: Length) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

/// How a label is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font: FontSpec,
    pub color: Color,
    /// Draw a background-colored outline behind the text
    pub halo: bool,
}

impl LabelStyle {
    pub fn new(font: FontSpec, color: Color) -> Self {
        Self {
            font,
            color,
            halo: false,
        }
    }

    pub fn with_halo(mut self, halo: bool) -> Self {
        self.halo = halo;
        self
    }
}

/// Repeated label text long enough to cover a path
#[derive(Debug, Clone, PartialEq)]
pub struct FlowString {
    pub text: String,
    /// Number of units in `text`
    pub repeats: usize,
    /// Measured width of one unit
    pub unit_width: Length,
}

impl FlowString {
    /// Width covered by the flowed text under the uniform-spacing assumption
    pub fn width(&self) -> Length {
        self.unit_width * self.repeats as f64
    }
}

/// One row of a tiled label
#[derive(Debug, Clone, PartialEq)]
pub struct TileRow {
    pub text: String,
    /// Vertical distance from the block origin
    pub offset: Length,
}

/// Rows of staggered label text covering an area's bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct TileBlock {
    pub rows: Vec<TileRow>,
    pub row_height: Length,
    /// Measured width of one row under the uniform-spacing assumption
    pub row_width: Length,
}

impl TileBlock {
    /// Total height covered by all rows
    pub fn height(&self) -> Length {
        self.row_height * self.rows.len() as f64
    }
}

/// Output of either layout component
#[derive(Debug, Clone, PartialEq)]
pub enum LabelLayout {
    Flow(FlowString),
    Tile(TileBlock),
}

impl LabelLayout {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            LabelLayout::Flow(_) => "flow",
            LabelLayout::Tile(_) => "tile",
        }
    }
}

/// Where assembled label primitives are attached
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Bound to a path defined elsewhere in the document
    Path { path_id: String },
    /// Positioned from `origin` (device space) and clipped to a region
    Area { origin: DVec2, clip_id: String },
}

impl Anchor {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Anchor::Path { .. } => "path",
            Anchor::Area { .. } => "area",
        }
    }
}
