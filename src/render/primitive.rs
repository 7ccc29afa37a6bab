//! Render primitives and the sink they are pushed into

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::types::{Color, Length};

use super::types::FontSpec;

/// Common behavior of every primitive the pipeline emits
#[enum_dispatch]
pub trait Primitive {
    /// Whether the primitive is a definition (referenced by id, not drawn)
    fn is_definition(&self) -> bool;

    /// The SVG element for this primitive
    fn to_svg(&self) -> svg::node::element::Element;
}

/// Anything the render pipeline emits
#[enum_dispatch(Primitive)]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPrimitive {
    Path(PathPrimitive),
    ClipRegion(ClipRegion),
    PathText(PathTextRun),
    Text(TextRun),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Length,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Stroke {
    pub fn new(color: Color, width: Length) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }

    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

/// Polyline in device space
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub id: Option<String>,
    pub points: Vec<DVec2>,
    pub closed: bool,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    /// Emitted in `<defs>` so text can reference it
    pub definition: bool,
}

impl PathPrimitive {
    /// Unpainted path in `<defs>`, referenced by id
    pub fn definition(id: impl Into<String>, points: Vec<DVec2>) -> Self {
        Self {
            id: Some(id.into()),
            points,
            closed: false,
            fill: None,
            stroke: None,
            definition: true,
        }
    }

    /// Visible path in the body
    pub fn drawn(points: Vec<DVec2>) -> Self {
        Self {
            id: None,
            points,
            closed: false,
            fill: None,
            stroke: None,
            definition: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// Clip region definition, referenced by positioned text
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    pub id: String,
    pub outline: Vec<DVec2>,
}

/// Fill color plus optional outline of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub fill: Color,
    pub stroke: Option<Stroke>,
}

impl TextPaint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: color,
            stroke: None,
        }
    }
}

/// Text bound to a path defined elsewhere, stretched along its length
#[derive(Debug, Clone, PartialEq)]
pub struct PathTextRun {
    pub path_id: String,
    pub text: String,
    pub font: FontSpec,
    pub paint: TextPaint,
    pub start_offset: Length,
}

impl PathTextRun {
    /// Halo runs are the outlined pass drawn under the fill
    pub fn is_halo(&self) -> bool {
        self.paint.stroke.is_some()
    }
}

/// Text at an absolute device position, optionally clipped
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub position: DVec2,
    pub font: FontSpec,
    pub paint: TextPaint,
    pub clip_id: Option<String>,
}

/// Receives primitives in draw order. Single writer.
pub trait RenderSink {
    fn push(&mut self, primitive: RenderPrimitive);
}

impl RenderSink for Vec<RenderPrimitive> {
    fn push(&mut self, primitive: RenderPrimitive) {
        Vec::push(self, primitive);
    }
}
