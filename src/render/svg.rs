//! SVG generation

use glam::DVec2;
use svg::Node;
use svg::node::element::Element;

use crate::types::{Color, Envelope};

use super::geometry::canvas_size;
use super::primitive::{
    ClipRegion, LineCap, LineJoin, PathPrimitive, PathTextRun, Primitive, RenderPrimitive,
    RenderSink, Stroke, TextPaint, TextRun,
};
use super::types::FontSpec;

/// Build the `d` attribute for a polyline
pub fn path_data(points: &[DVec2], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&fmt_num(p.x));
        d.push(',');
        d.push_str(&fmt_num(p.y));
    }
    if closed && !points.is_empty() {
        d.push_str(" Z");
    }
    d
}

fn cap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
    }
}

fn join_name(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Bevel => "bevel",
    }
}

fn apply_stroke(el: &mut Element, stroke: &Stroke) {
    el.assign("stroke", stroke.color.to_string());
    el.assign("stroke-width", fmt_num(stroke.width.raw()));
    if stroke.cap != LineCap::Butt {
        el.assign("stroke-linecap", cap_name(stroke.cap));
    }
    if stroke.join != LineJoin::Miter {
        el.assign("stroke-linejoin", join_name(stroke.join));
    }
}

fn apply_font(el: &mut Element, font: &FontSpec) {
    el.assign("font-family", font.family.as_str());
    el.assign("font-size", fmt_num(font.size.raw()));
    if font.bold {
        el.assign("font-weight", "bold");
    }
    if font.italic {
        el.assign("font-style", "italic");
    }
}

fn apply_paint(el: &mut Element, paint: &TextPaint) {
    el.assign("fill", paint.fill.to_string());
    if let Some(stroke) = &paint.stroke {
        apply_stroke(el, stroke);
        el.assign("paint-order", "stroke");
    }
}

fn text_element(font: &FontSpec, paint: &TextPaint) -> Element {
    let mut el = Element::new("text");
    apply_font(&mut el, font);
    apply_paint(&mut el, paint);
    el
}

impl Primitive for PathPrimitive {
    fn is_definition(&self) -> bool {
        self.definition
    }

    fn to_svg(&self) -> Element {
        let mut el = Element::new("path");
        if let Some(id) = &self.id {
            el.assign("id", id.as_str());
        }
        el.assign("d", path_data(&self.points, self.closed));
        match self.fill {
            Some(color) => el.assign("fill", color.to_string()),
            None => el.assign("fill", "none"),
        }
        if let Some(stroke) = &self.stroke {
            apply_stroke(&mut el, stroke);
        }
        el
    }
}

impl Primitive for ClipRegion {
    fn is_definition(&self) -> bool {
        true
    }

    fn to_svg(&self) -> Element {
        let mut outline = Element::new("path");
        outline.assign("d", path_data(&self.outline, true));
        let mut el = Element::new("clipPath");
        el.assign("id", self.id.as_str());
        el.append(outline);
        el
    }
}

impl Primitive for PathTextRun {
    fn is_definition(&self) -> bool {
        false
    }

    fn to_svg(&self) -> Element {
        let mut text_path = Element::new("textPath");
        text_path.assign("href", format!("#{}", self.path_id));
        text_path.assign("startOffset", fmt_num(self.start_offset.raw()));
        text_path.assign("method", "stretch");
        text_path.assign("alignment-baseline", "middle");
        text_path.append(svg::node::Text::new(self.text.as_str()));

        let mut el = text_element(&self.font, &self.paint);
        el.append(text_path);
        el
    }
}

impl Primitive for TextRun {
    fn is_definition(&self) -> bool {
        false
    }

    fn to_svg(&self) -> Element {
        let mut el = text_element(&self.font, &self.paint);
        el.assign("x", fmt_num(self.position.x));
        el.assign("y", fmt_num(self.position.y));
        el.assign("alignment-baseline", "middle");
        el.assign("lengthAdjust", "spacing");
        if let Some(clip) = &self.clip_id {
            el.assign("clip-path", format!("url(#{clip})"));
        }
        el.append(svg::node::Text::new(self.text.as_str()));
        el
    }
}

/// Collects primitives into an SVG document: definitions go to `<defs>`,
/// everything else into the body in push order.
#[derive(Debug)]
pub struct SvgDocumentSink {
    width: i64,
    height: i64,
    background: Option<Color>,
    defs: Vec<Element>,
    body: Vec<Element>,
}

impl SvgDocumentSink {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            background: None,
            defs: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Document sized to the same canvas the device transform maps onto
    pub fn for_extent(extent: &Envelope) -> Self {
        let (width, height) = canvas_size(extent);
        Self::new(width, height)
    }

    /// Fill the whole canvas before anything else is drawn
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn len(&self) -> usize {
        self.defs.len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> svg::Document {
        let mut defs = Element::new("defs");
        for el in self.defs {
            defs.append(el);
        }

        let mut doc = svg::Document::new()
            .set("width", self.width.to_string())
            .set("height", self.height.to_string())
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .add(defs);

        if let Some(color) = self.background {
            let mut rect = Element::new("rect");
            rect.assign("width", "100%");
            rect.assign("height", "100%");
            rect.assign("fill", color.to_string());
            doc = doc.add(rect);
        }
        for el in self.body {
            doc = doc.add(el);
        }
        doc
    }

    pub fn into_string(self) -> String {
        self.finish().to_string()
    }
}

impl RenderSink for SvgDocumentSink {
    fn push(&mut self, primitive: RenderPrimitive) {
        let el = primitive.to_svg();
        if primitive.is_definition() {
            self.defs.push(el);
        } else {
            self.body.push(el);
        }
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
