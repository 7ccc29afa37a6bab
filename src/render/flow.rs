//! Path flow layout: one repeated string covering a linear feature

use crate::errors::LayoutError;
use crate::types::Length;

use super::metrics::{TextExtent, TextMetrics};
use super::types::{FlowString, LabelStyle};

/// Label unit: the title followed by the separator glyph
pub fn label_unit(title: &str, separator: char) -> String {
    let mut unit = String::with_capacity(title.len() + separator.len_utf8());
    unit.push_str(title);
    unit.push(separator);
    unit
}

/// Measure `content`, rejecting NaN or infinite extents
pub(crate) fn measure_finite(
    metrics: &dyn TextMetrics,
    content: &str,
    style: &LabelStyle,
) -> Result<TextExtent, LayoutError> {
    let extent = metrics.measure(content, &style.font);
    if !extent.is_finite() {
        return Err(LayoutError::NonFiniteMetrics {
            content: content.to_string(),
            width: extent.width.raw(),
            height: extent.height.raw(),
        });
    }
    Ok(extent)
}

/// Measure for a result that does not depend on the extent; non-finite
/// components read as zero
pub(crate) fn measure_lenient(
    metrics: &dyn TextMetrics,
    content: &str,
    style: &LabelStyle,
) -> TextExtent {
    let extent = metrics.measure(content, &style.font);
    let finite_or_zero = |len: Length| if len.is_finite() { len } else { Length::ZERO };
    TextExtent::new(finite_or_zero(extent.width), finite_or_zero(extent.height))
}

/// Repeat `title + separator` until the text is at least `path_length` wide.
///
/// The unit is measured once and spacing is assumed uniform. An empty title,
/// a non-positive path length or a unit that measures non-positive all give
/// exactly one unit.
pub fn flow_label(
    title: &str,
    separator: char,
    style: &LabelStyle,
    path_length: Length,
    metrics: &dyn TextMetrics,
) -> Result<FlowString, LayoutError> {
    let path_length = Length::try_new(path_length.raw()).map_err(|source| {
        LayoutError::InvalidTarget {
            what: "path length",
            source,
        }
    })?;

    let unit = label_unit(title, separator);
    let single = |unit: String, unit_width: Length| FlowString {
        text: unit,
        repeats: 1,
        unit_width,
    };

    if title.is_empty() || path_length <= Length::ZERO {
        let unit_width = measure_lenient(metrics, &unit, style).width;
        return Ok(single(unit, unit_width));
    }
    let unit_width = measure_finite(metrics, &unit, style)?.width;
    if !unit_width.is_positive() {
        crate::log::debug!(
            unit = %unit,
            width = unit_width.raw(),
            "flow: degenerate unit width, emitting one unit"
        );
        return Ok(single(unit, unit_width));
    }

    let mut text = String::new();
    let mut repeats = 0;
    let mut width = Length::ZERO;
    while width < path_length {
        text.push_str(&unit);
        width += unit_width;
        repeats += 1;
    }
    crate::log::trace!(unit = %unit, repeats, path_length = path_length.raw(), "flow");

    Ok(FlowString {
        text,
        repeats,
        unit_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::metrics::MonospaceMetrics;
    use crate::render::types::FontSpec;
    use crate::types::Color;

    /// Every string measures the same
    struct Fixed(f64, f64);

    impl TextMetrics for Fixed {
        fn measure(&self, _content: &str, _font: &FontSpec) -> TextExtent {
            TextExtent::new(Length(self.0), Length(self.1))
        }
    }

    fn style() -> LabelStyle {
        LabelStyle::new(FontSpec::new("PT Serif", Length(5.5)), Color::NAVY).with_halo(true)
    }

    #[test]
    fn river_label_covers_path() {
        let flow = flow_label("река", '●', &style(), Length(50.0), &Fixed(6.0, 5.5)).unwrap();
        assert_eq!(flow.repeats, 9);
        assert_eq!(flow.text, "река●".repeat(9));
        assert_eq!(flow.width(), Length(54.0));
    }

    #[test]
    fn exact_multiple_stops_at_the_path_length() {
        let flow = flow_label("a", '●', &style(), Length(30.0), &Fixed(6.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 5);
    }

    #[test]
    fn coverage_holds_across_lengths() {
        let metrics = MonospaceMetrics {
            advance: 0.5,
            line_height: 1.0,
        };
        for len in [0.1, 1.0, 7.3, 42.0, 333.3, 1234.5] {
            let flow = flow_label("Искър", '●', &style(), Length(len), &metrics).unwrap();
            assert!(flow.width() >= Length(len), "length {len}");
            // One unit fewer would not have covered it
            assert!(flow.width() - flow.unit_width < Length(len), "length {len}");
        }
    }

    #[test]
    fn zero_path_length_gives_one_unit() {
        let flow = flow_label("река", '●', &style(), Length::ZERO, &Fixed(6.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
        assert_eq!(flow.text, "река●");

        let flow = flow_label("река", '●', &style(), Length(-3.0), &Fixed(6.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
    }

    #[test]
    fn empty_title_gives_one_unit() {
        let flow = flow_label("", '●', &style(), Length(100.0), &Fixed(6.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
        assert_eq!(flow.text, "●");
    }

    #[test]
    fn degenerate_width_recovers_with_one_unit() {
        let flow = flow_label("река", '●', &style(), Length(100.0), &Fixed(0.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
        let flow = flow_label("река", '●', &style(), Length(100.0), &Fixed(-2.0, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
    }

    #[test]
    fn non_finite_metrics_fail_the_feature() {
        let err = flow_label("река", '●', &style(), Length(10.0), &Fixed(f64::NAN, 1.0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::NonFiniteMetrics { .. }));
    }

    #[test]
    fn degenerate_inputs_are_not_measured_strictly() {
        let flow = flow_label("", '●', &style(), Length(100.0), &Fixed(f64::NAN, 1.0)).unwrap();
        assert_eq!(flow.text, "●");
        assert_eq!(flow.unit_width, Length::ZERO);

        let flow = flow_label("река", '●', &style(), Length::ZERO, &Fixed(f64::NAN, 1.0)).unwrap();
        assert_eq!(flow.repeats, 1);
    }

    #[test]
    fn non_finite_path_length_is_rejected() {
        let err = flow_label("река", '●', &style(), Length(f64::INFINITY), &Fixed(6.0, 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidTarget {
                what: "path length",
                ..
            }
        ));
    }
}
