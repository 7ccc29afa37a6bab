//! Label render assembler: layout + style + anchor into text primitives

use crate::errors::LayoutError;
use crate::types::{Color, Length};

use super::defaults;
use super::primitive::{LineCap, LineJoin, PathTextRun, RenderPrimitive, Stroke, TextPaint, TextRun};
use super::types::{Anchor, LabelLayout, LabelStyle};

/// Background color used for halos
pub const HALO_COLOR: Color = Color::WHITE;

/// Outline drawn behind halo text
pub fn halo_stroke() -> Stroke {
    Stroke::new(HALO_COLOR, defaults::HALO_STROKE_WIDTH)
        .cap(LineCap::Round)
        .join(LineJoin::Bevel)
}

/// Turn a layout into primitives.
///
/// Flow layouts need a path anchor and produce a halo run (when the style
/// asks for one) immediately followed by the fill run. Tile layouts need an
/// area anchor and produce one clipped run per row.
pub fn assemble(
    layout: &LabelLayout,
    style: &LabelStyle,
    anchor: &Anchor,
) -> Result<Vec<RenderPrimitive>, LayoutError> {
    match (layout, anchor) {
        (LabelLayout::Flow(flow), Anchor::Path { path_id }) => {
            let run = |paint| PathTextRun {
                path_id: path_id.clone(),
                text: flow.text.clone(),
                font: style.font.clone(),
                paint,
                start_offset: Length::ZERO,
            };
            let mut out: Vec<RenderPrimitive> = Vec::with_capacity(2);
            if style.halo {
                out.push(
                    run(TextPaint {
                        fill: HALO_COLOR,
                        stroke: Some(halo_stroke()),
                    })
                    .into(),
                );
            }
            out.push(run(TextPaint::fill(style.color)).into());
            Ok(out)
        }
        (LabelLayout::Tile(block), Anchor::Area { origin, clip_id }) => Ok(block
            .rows
            .iter()
            .map(|row| {
                TextRun {
                    text: row.text.clone(),
                    position: *origin + glam::dvec2(0.0, row.offset.raw()),
                    font: style.font.clone(),
                    paint: TextPaint::fill(style.color),
                    clip_id: Some(clip_id.clone()),
                }
                .into()
            })
            .collect()),
        _ => Err(LayoutError::AnchorMismatch {
            layout: layout.kind(),
            anchor: anchor.kind(),
        }),
    }
}
