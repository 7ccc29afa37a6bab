//! Label rendering for map features
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `types`: Layout results, styles and anchors
//! - `metrics`: The text metrics port and built-in measurers
//! - `geometry`: World to device transform and path trimming
//! - `flow`: Repeated labels along linear features
//! - `tile`: Staggered label rows over areas
//! - `assemble`: Halo and fill text primitives
//! - `style`: Classification tables
//! - `primitive`: Render primitives and sinks
//! - `context`: RenderContext for tracking state during a pass
//! - `svg`: SVG generation

pub mod assemble;
pub mod context;
pub mod defaults;
pub mod flow;
pub mod geometry;
pub mod metrics;
pub mod primitive;
pub mod style;
pub mod svg;
pub mod tile;
pub mod types;

// Re-export commonly used items
pub use context::{RenderContext, RenderSummary};
pub use types::*;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::ast::{MapSource, Setting};
use crate::errors::{LayoutError, RenderError};
use crate::feature::{AreaKind, Feature, Layer};
use crate::types::{Color, Length};

use assemble::assemble;
use metrics::{MemoizedMetrics, ProportionalMetrics, TextMetrics};
use primitive::{ClipRegion, PathPrimitive, RenderPrimitive, RenderSink, Stroke};
use style::{BuiltinClassifier, Classification, Classifier, LabelSpec};
use self::svg::SvgDocumentSink;
use tile::TileParams;

/// Options for a render pass. Map sources may override the first four.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Multiplier applied to every base font size
    pub factor: f64,
    /// Distance trimmed off both ends of linear features
    pub trim: Length,
    /// Draw red outlines for feature paths
    pub debug: bool,
    /// Administrative level to keep; `None` keeps every admin feature
    pub admin_level: Option<i64>,
    /// Glyph appended to every label repetition
    pub separator: char,
    pub tile: TileParams,
    /// Raised by the caller to stop the pass between features
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            factor: defaults::FACTOR,
            trim: defaults::TRIM,
            debug: false,
            admin_level: Some(defaults::ADMIN_LEVEL),
            separator: defaults::SEPARATOR,
            tile: TileParams::default(),
            cancel: None,
        }
    }
}

impl RenderOptions {
    pub fn apply(&mut self, setting: &Setting) {
        match *setting {
            Setting::Factor(v) => self.factor = v,
            Setting::Trim(v) => self.trim = v,
            Setting::Debug(v) => self.debug = v,
            Setting::AdminLevel(v) => self.admin_level = v,
        }
    }

    /// These options with `settings` applied in order
    pub fn with_settings(&self, settings: &[Setting]) -> Self {
        let mut options = self.clone();
        for setting in settings {
            options.apply(setting);
        }
        options
    }
}

/// A rendered document and the counts of its pass
#[derive(Debug, Clone)]
pub struct Rendered {
    pub svg: String,
    pub summary: RenderSummary,
}

/// Render a map to SVG with the built-in metrics and classification tables
pub fn render(map: &MapSource, options: &RenderOptions) -> Result<Rendered, RenderError> {
    let options = options.with_settings(&map.settings);
    let metrics = MemoizedMetrics::new(ProportionalMetrics::default());
    let classifier = BuiltinClassifier::new(options.factor);
    let mut sink = SvgDocumentSink::for_extent(&map.extent);
    let summary = render_into(map, &options, &metrics, &classifier, &mut sink)?;
    Ok(Rendered {
        svg: sink.into_string(),
        summary,
    })
}

/// A feature that passed the filter stage
struct Planned<'f> {
    feature: &'f Feature,
    spec: LabelSpec,
}

fn sort_by_order(planned: &mut [Planned<'_>]) {
    let order = |p: &Planned<'_>| p.feature.attrs().order.unwrap_or(0.0);
    planned.sort_by(|a, b| order(a).total_cmp(&order(b)));
}

/// Run the pipeline, pushing primitives into `sink`.
///
/// Features are filtered (extent, admin level, classification), ordered,
/// laid out and assembled. A feature whose layout fails is logged and
/// counted; the pass continues with the next one.
pub fn render_into(
    map: &MapSource,
    options: &RenderOptions,
    metrics: &dyn TextMetrics,
    classifier: &dyn Classifier,
    sink: &mut dyn RenderSink,
) -> Result<RenderSummary, RenderError> {
    let options = options.with_settings(&map.settings);
    let mut ctx = RenderContext::new(&map.extent, &options)?;

    let mut admin = Vec::new();
    let mut land = Vec::new();
    let mut waterways = Vec::new();
    let mut water = Vec::new();
    let mut lines = Vec::new();

    for feature in &map.features {
        if !feature.envelope().intersects(&ctx.extent) {
            crate::log::debug!(layer = %feature.layer(), kind = %feature.attrs().kind, "outside extent");
            ctx.summary.skipped += 1;
            continue;
        }
        if feature.layer() == Layer::Admin
            && options
                .admin_level
                .is_some_and(|level| feature.attrs().level != Some(level))
        {
            ctx.summary.skipped += 1;
            continue;
        }
        let spec = match classifier.classify(feature) {
            Classification::Styled(spec) => spec,
            Classification::Skip => {
                crate::log::debug!(layer = %feature.layer(), kind = %feature.attrs().kind, "unclassified");
                ctx.summary.skipped += 1;
                continue;
            }
        };
        let planned = Planned { feature, spec };
        match feature.layer() {
            Layer::Admin => admin.push(planned),
            Layer::LandUse => land.push(planned),
            Layer::Waterway => waterways.push(planned),
            Layer::WaterArea => water.push(planned),
            Layer::Road | Layer::Railway => lines.push(planned),
        }
    }

    sort_by_order(&mut land);
    sort_by_order(&mut lines);

    let passes = [admin, land, waterways, water, lines];
    for planned in passes.iter().flatten() {
        ctx.check_cancelled()?;

        let result = match planned.feature.layer().area_kind() {
            Some(kind) => draw_area(&mut ctx, planned, kind, metrics),
            None => draw_line(&mut ctx, planned, metrics),
        };
        match result {
            Ok(primitives) => {
                for primitive in primitives {
                    sink.push(primitive);
                }
                ctx.summary.drawn += 1;
            }
            Err(LayoutError::EmptyGeometry { count }) => {
                crate::log::debug!(layer = %planned.feature.layer(), count, "not enough coordinates");
                ctx.summary.skipped += 1;
            }
            Err(e) => {
                crate::log::warn!(
                    layer = %planned.feature.layer(),
                    kind = %planned.feature.attrs().kind,
                    error = %e,
                    "feature failed"
                );
                ctx.summary.failed += 1;
            }
        }
    }

    let summary = ctx.summary;
    crate::log::debug!(
        drawn = summary.drawn,
        skipped = summary.skipped,
        failed = summary.failed,
        "render pass complete"
    );
    Ok(summary)
}

fn debug_stroke() -> Stroke {
    Stroke::new(Color::RED, defaults::DEBUG_STROKE_WIDTH)
}

/// Referenced path, optional debug outline and a flowed label
fn draw_line(
    ctx: &mut RenderContext<'_>,
    planned: &Planned<'_>,
    metrics: &dyn TextMetrics,
) -> Result<Vec<RenderPrimitive>, LayoutError> {
    let Planned { feature, spec } = planned;
    let path = geometry::build_path(feature.coords(), &ctx.transform, ctx.options.trim)?;
    let flow = flow::flow_label(
        &spec.title,
        ctx.options.separator,
        &spec.style,
        path.length(),
        metrics,
    )?;

    let id = match feature.layer() {
        Layer::Waterway => ctx.waterway_id(),
        _ => ctx.road_id(),
    };
    let points = path.points();

    let mut out: Vec<RenderPrimitive> = Vec::new();
    if ctx.options.debug {
        out.push(
            PathPrimitive::drawn(points.clone())
                .with_id(format!("{id}Debug"))
                .stroke(debug_stroke())
                .into(),
        );
    }
    out.push(PathPrimitive::definition(id.clone(), points).into());
    out.extend(assemble(
        &LabelLayout::Flow(flow),
        &spec.style,
        &Anchor::Path { path_id: id },
    )?);
    Ok(out)
}

/// White background, clip region and tiled label rows
fn draw_area(
    ctx: &mut RenderContext<'_>,
    planned: &Planned<'_>,
    kind: AreaKind,
    metrics: &dyn TextMetrics,
) -> Result<Vec<RenderPrimitive>, LayoutError> {
    let Planned { feature, spec } = planned;
    let outline = geometry::build_path(feature.coords(), &ctx.transform, Length::ZERO)?.points();
    // Only the part of the area inside the extent gets tiled
    let envelope = feature.envelope().intersection(&ctx.extent);
    let block = tile::tile_label_with(
        &ctx.options.tile,
        &spec.title,
        ctx.options.separator,
        &spec.style,
        envelope.width(),
        envelope.height(),
        metrics,
    )?;

    let clip_id = ctx.clip_id(kind);
    let mut background = PathPrimitive::drawn(outline.clone())
        .closed()
        .fill(Color::WHITE);
    if ctx.options.debug {
        background = background.stroke(debug_stroke());
    }

    let mut out: Vec<RenderPrimitive> = vec![
        background.into(),
        ClipRegion {
            id: clip_id.clone(),
            outline,
        }
        .into(),
    ];
    out.extend(assemble(
        &LabelLayout::Tile(block),
        &spec.style,
        &Anchor::Area {
            origin: ctx.transform.top_left(&envelope),
            clip_id,
        },
    )?);
    Ok(out)
}
