//! Area tile layout: staggered rows of label text over a bounding box

use crate::errors::LayoutError;
use crate::types::Length;

use super::defaults;
use super::flow::{label_unit, measure_finite, measure_lenient};
use super::metrics::{TextExtent, TextMetrics};
use super::types::{LabelStyle, TileBlock, TileRow};

/// Tuning constants for [`tile_label_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileParams {
    /// Rows are built to at least `bounding width × width_margin`
    pub width_margin: f64,
    /// Consecutive rows shift by `chars(unit) / rotation_divisor` code points
    pub rotation_divisor: usize,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            width_margin: defaults::TILE_WIDTH_MARGIN,
            rotation_divisor: defaults::TILE_ROTATION_DIVISOR,
        }
    }
}

impl TileParams {
    /// Row-to-row shift for a given unit, in code points.
    ///
    /// Computed from the unit rather than the row, so the stagger depends
    /// only on the label and not on how wide the area is.
    pub fn rotation(&self, unit: &str) -> usize {
        match self.rotation_divisor {
            0 => 0,
            d => unit.chars().count() / d,
        }
    }
}

/// Cyclic left rotation of `s` by `k` code points
pub fn rotate_left(s: &str, k: usize) -> String {
    let n = s.chars().count();
    if n == 0 {
        return String::new();
    }
    let split = s
        .char_indices()
        .nth(k % n)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[split..]);
    out.push_str(&s[..split]);
    out
}

/// Tile with the default [`TileParams`]
pub fn tile_label(
    title: &str,
    separator: char,
    style: &LabelStyle,
    bounding_width: Length,
    bounding_height: Length,
    metrics: &dyn TextMetrics,
) -> Result<TileBlock, LayoutError> {
    tile_label_with(
        &TileParams::default(),
        title,
        separator,
        style,
        bounding_width,
        bounding_height,
        metrics,
    )
}

/// Build rows of repeated `title + separator` covering a bounding box.
///
/// Every row is at least `bounding_width × width_margin` wide, rows stack
/// by the unit's measured height until they cover `bounding_height`, and
/// each row is the previous one rotated left.
pub fn tile_label_with(
    params: &TileParams,
    title: &str,
    separator: char,
    style: &LabelStyle,
    bounding_width: Length,
    bounding_height: Length,
    metrics: &dyn TextMetrics,
) -> Result<TileBlock, LayoutError> {
    let target = |what, len: Length| {
        Length::try_new(len.raw()).map_err(|source| LayoutError::InvalidTarget { what, source })
    };
    let bw = target("bounding width", bounding_width)?;
    let bh = target("bounding height", bounding_height)?;
    let margin = Length::try_positive(params.width_margin).map_err(|source| {
        LayoutError::InvalidTarget {
            what: "width margin",
            source,
        }
    })?;

    let unit = label_unit(title, separator);
    let single = |unit: String, extent: TextExtent| TileBlock {
        rows: vec![TileRow {
            text: unit,
            offset: Length::ZERO,
        }],
        row_height: extent.height,
        row_width: extent.width,
    };

    if title.is_empty() || bw <= Length::ZERO || bh <= Length::ZERO {
        let extent = measure_lenient(metrics, &unit, style);
        return Ok(single(unit, extent));
    }
    let extent = measure_finite(metrics, &unit, style)?;
    if !extent.width.is_positive() || !extent.height.is_positive() {
        crate::log::debug!(
            unit = %unit,
            width = extent.width.raw(),
            height = extent.height.raw(),
            "tile: degenerate unit extent, emitting one row"
        );
        return Ok(single(unit, extent));
    }

    let min_width = bw * margin.raw();
    let mut row = String::new();
    let mut row_width = Length::ZERO;
    while row_width < min_width {
        row.push_str(&unit);
        row_width += extent.width;
    }

    let shift = params.rotation(&unit);
    let row_height = extent.height;
    let mut rows = Vec::new();
    let mut covered = Length::ZERO;
    loop {
        rows.push(TileRow {
            text: row.clone(),
            offset: row_height * rows.len() as f64,
        });
        covered += row_height;
        if covered >= bh {
            break;
        }
        row = rotate_left(&row, shift);
    }
    crate::log::trace!(unit = %unit, rows = rows.len(), shift, "tile");

    Ok(TileBlock {
        rows,
        row_height,
        row_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::metrics::{MonospaceMetrics, TextExtent};
    use crate::render::types::FontSpec;
    use crate::types::Color;

    struct Fixed(f64, f64);

    impl TextMetrics for Fixed {
        fn measure(&self, _content: &str, _font: &FontSpec) -> TextExtent {
            TextExtent::new(Length(self.0), Length(self.1))
        }
    }

    fn style() -> LabelStyle {
        LabelStyle::new(FontSpec::new("PT Serif", Length(2.5)), Color::LIGHT_GREEN)
    }

    fn rows_text(block: &TileBlock) -> String {
        block
            .rows
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn park_block_covers_bounding_box() {
        let block = tile_label(
            "парк",
            '●',
            &style(),
            Length(100.0),
            Length(40.0),
            &Fixed(30.0, 8.0),
        )
        .unwrap();

        // 4 units: 120 >= 110
        assert_eq!(block.row_width, Length(120.0));
        assert_eq!(block.rows.len(), 5);
        assert_eq!(block.rows[0].text, "парк●".repeat(4));
        let offsets: Vec<f64> = block.rows.iter().map(|r| r.offset.raw()).collect();
        assert_eq!(offsets, vec![0.0, 8.0, 16.0, 24.0, 32.0]);

        for pair in block.rows.windows(2) {
            assert_eq!(pair[1].text, rotate_left(&pair[0].text, 2));
            assert_ne!(pair[1].text, pair[0].text);
        }
    }

    #[test]
    fn rows_are_staggered() {
        let block = tile_label(
            "парк",
            '●',
            &style(),
            Length(25.0),
            Length(6.0),
            &Fixed(10.0, 2.0),
        )
        .unwrap();
        insta::assert_snapshot!(rows_text(&block), @r"
        парк●парк●парк●
        рк●парк●парк●па
        ●парк●парк●парк
        ");
    }

    #[test]
    fn coverage_holds_for_many_boxes() {
        let metrics = MonospaceMetrics {
            advance: 0.6,
            line_height: 1.2,
        };
        for (w, h) in [(1.0, 1.0), (17.0, 3.0), (100.0, 40.0), (640.0, 480.0)] {
            let block = tile_label("Южен парк", '●', &style(), Length(w), Length(h), &metrics)
                .unwrap();
            let min_width = w * TileParams::default().width_margin;
            assert!(block.row_width.raw() >= min_width, "{w}x{h}");
            assert!(block.height().raw() >= h, "{w}x{h}");
            // The last row was needed
            assert!(block.height().raw() - block.row_height.raw() < h, "{w}x{h}");
        }
    }

    #[test]
    fn rotation_uses_the_unit_not_the_row() {
        let params = TileParams::default();
        let block = tile_label_with(
            &params,
            "градина",
            '●',
            &style(),
            Length(200.0),
            Length(30.0),
            &Fixed(12.0, 10.0),
        )
        .unwrap();
        // "градина●" has 8 code points, so each row shifts by 4
        assert_eq!(params.rotation("градина●"), 4);
        assert_eq!(block.rows.len(), 3);
        assert_eq!(block.rows[2].text, rotate_left(&block.rows[0].text, 8));
    }

    #[test]
    fn custom_params_change_margin_and_shift() {
        let params = TileParams {
            width_margin: 2.0,
            rotation_divisor: 5,
        };
        let block = tile_label_with(
            &params,
            "парк",
            '●',
            &style(),
            Length(20.0),
            Length(4.0),
            &Fixed(10.0, 2.0),
        )
        .unwrap();
        assert_eq!(block.row_width, Length(40.0));
        assert_eq!(block.rows[1].text, rotate_left(&block.rows[0].text, 1));
    }

    #[test]
    fn zero_divisor_keeps_rows_aligned() {
        let params = TileParams {
            width_margin: 1.1,
            rotation_divisor: 0,
        };
        assert_eq!(params.rotation("парк●"), 0);
    }

    #[test]
    fn degenerate_bounds_give_single_row() {
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-5.0, -5.0)] {
            let block = tile_label("парк", '●', &style(), Length(w), Length(h), &Fixed(10.0, 2.0))
                .unwrap();
            assert_eq!(block.rows.len(), 1, "{w}x{h}");
            assert_eq!(block.rows[0].text, "парк●");
            assert_eq!(block.rows[0].offset, Length::ZERO);
        }
    }

    #[test]
    fn degenerate_metrics_give_single_row() {
        let block = tile_label("парк", '●', &style(), Length(50.0), Length(50.0), &Fixed(10.0, 0.0))
            .unwrap();
        assert_eq!(block.rows.len(), 1);
    }

    #[test]
    fn empty_title_skips_strict_measurement() {
        let block = tile_label("", '●', &style(), Length(50.0), Length(50.0), &Fixed(f64::NAN, 2.0))
            .unwrap();
        assert_eq!(block.rows.len(), 1);
        assert_eq!(block.rows[0].text, "●");
        assert_eq!(block.row_width, Length::ZERO);
        assert_eq!(block.row_height, Length(2.0));
    }

    #[test]
    fn non_finite_inputs_fail() {
        let err = tile_label(
            "парк",
            '●',
            &style(),
            Length(f64::NAN),
            Length(10.0),
            &Fixed(10.0, 2.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidTarget {
                what: "bounding width",
                ..
            }
        ));

        let err = tile_label(
            "парк",
            '●',
            &style(),
            Length(10.0),
            Length(10.0),
            &Fixed(f64::INFINITY, 2.0),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::NonFiniteMetrics { .. }));
    }

    #[test]
    fn rotating_half_twice_restores_even_length_strings() {
        for s in ["ab", "парк●парк●", "река●", "●●●●", "Витоша●Витоша●"] {
            let n = s.chars().count();
            if n % 2 != 0 {
                continue;
            }
            assert_eq!(rotate_left(&rotate_left(s, n / 2), n / 2), s);
        }
    }

    #[test]
    fn rotation_never_splits_code_points() {
        let s = "Перловска●";
        for k in 0..25 {
            let rotated = rotate_left(s, k);
            assert_eq!(rotated.chars().count(), 10);
            let mut a: Vec<char> = rotated.chars().collect();
            let mut b: Vec<char> = s.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
        assert_eq!(rotate_left(s, 3), "ловска●Пер");
        assert_eq!(rotate_left("", 3), "");
    }
}
