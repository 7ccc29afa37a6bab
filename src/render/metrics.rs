//! Text metrics port and the built-in measurers
//!
//! Layout never inspects glyphs itself; it asks a [`TextMetrics`]
//! implementation for the extent of a candidate string and repeats it.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::types::Length;

use super::types::FontSpec;

/// Rendered bounding extent of a string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: Length,
    pub height: Length,
}

impl TextExtent {
    pub fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Measures rendered text. Implementations need not be reentrant; callers
/// measure from one thread at a time.
pub trait TextMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> TextExtent;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn measure(&self, content: &str, font: &FontSpec) -> TextExtent {
        (**self).measure(content, font)
    }
}

/// Proportional advance widths for printable ASCII, in hundredths of the
/// average character width.
#[rustfmt::skip]
pub const ADVANCE_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Advance for any code point outside printable ASCII
const WIDE_ADVANCE: u32 = 100;

/// Text length in hundredths of the average character width
pub fn proportional_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                ADVANCE_WIDTHS[(c as usize) - 0x20] as u32
            } else {
                WIDE_ADVANCE
            }
        })
        .sum()
}

/// Estimates extents from a per-glyph advance table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalMetrics {
    /// Average character width as a fraction of the font size
    pub char_width: f64,
    /// Line height as a fraction of the font size
    pub line_height: f64,
    /// Width multiplier for bold text
    pub bold_factor: f64,
}

impl Default for ProportionalMetrics {
    fn default() -> Self {
        Self {
            // 0.08in glyphs on a 0.14in line
            char_width: 0.08 / 0.14,
            line_height: 1.0,
            bold_factor: 1.1,
        }
    }
}

impl TextMetrics for ProportionalMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> TextExtent {
        let hundredths = proportional_length(content) as f64;
        let mut width = font.size * (hundredths * 0.01 * self.char_width);
        if font.bold {
            width = width * self.bold_factor;
        }
        TextExtent::new(width, font.size * self.line_height)
    }
}

/// Every code point advances by the same amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance as a fraction of the font size
    pub advance: f64,
    /// Line height as a fraction of the font size
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.0,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, content: &str, font: &FontSpec) -> TextExtent {
        let count = content.chars().count() as f64;
        TextExtent::new(
            font.size * (count * self.advance),
            font.size * self.line_height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    content: String,
    family: String,
    size_bits: u64,
    bold: bool,
    italic: bool,
}

impl MeasureKey {
    fn new(content: &str, font: &FontSpec) -> Self {
        Self {
            content: content.to_string(),
            family: font.family.clone(),
            size_bits: font.size.raw().to_bits(),
            bold: font.bold,
            italic: font.italic,
        }
    }
}

/// Caches another measurer's results per `(content, font)`.
///
/// Uses interior mutability, so it is `!Sync` and must stay on one thread.
#[derive(Debug, Default)]
pub struct MemoizedMetrics<M> {
    inner: M,
    cache: RefCell<HashMap<MeasureKey, TextExtent>>,
}

impl<M: TextMetrics> MemoizedMetrics<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct `(content, font)` pairs measured so far
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMetrics> TextMetrics for MemoizedMetrics<M> {
    fn measure(&self, content: &str, font: &FontSpec) -> TextExtent {
        let key = MeasureKey::new(content, font);
        if let Some(extent) = self.cache.borrow().get(&key) {
            return *extent;
        }
        let extent = self.inner.measure(content, font);
        self.cache.borrow_mut().insert(key, extent);
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn font(size: f64) -> FontSpec {
        FontSpec::new("PT Serif", Length(size))
    }

    #[test]
    fn proportional_length_uses_table_and_wide_fallback() {
        // 'A' = 102, 'i' = 47
        assert_eq!(proportional_length("Ai"), 149);
        // Cyrillic letters and the marker glyph take the wide advance
        assert_eq!(proportional_length("река●"), 500);
        assert_eq!(proportional_length(""), 0);
    }

    #[test]
    fn proportional_width_scales_with_size() {
        let m = ProportionalMetrics {
            char_width: 0.5,
            line_height: 1.2,
            bold_factor: 1.1,
        };
        let small = m.measure("река", &font(2.0));
        let large = m.measure("река", &font(4.0));
        assert_eq!(small.width, Length(4.0));
        assert_eq!(large.width, Length(8.0));
        assert!((small.height.raw() - 2.4).abs() < 1e-12);
    }

    #[test]
    fn bold_text_is_wider() {
        let m = ProportionalMetrics::default();
        let regular = m.measure("Витоша", &font(3.0));
        let bold = m.measure("Витоша", &font(3.0).bold(true));
        assert!(bold.width > regular.width);
        assert_eq!(bold.height, regular.height);
    }

    #[test]
    fn monospace_counts_code_points() {
        let m = MonospaceMetrics {
            advance: 1.0,
            line_height: 1.0,
        };
        let extent = m.measure("река●", &font(2.0));
        assert_eq!(extent.width, Length(10.0));
        assert_eq!(extent.height, Length(2.0));
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl TextMetrics for Counting {
        fn measure(&self, content: &str, font: &FontSpec) -> TextExtent {
            self.calls.set(self.calls.get() + 1);
            TextExtent::new(font.size * content.len() as f64, font.size)
        }
    }

    #[test]
    fn memoized_metrics_measures_each_key_once() {
        let m = MemoizedMetrics::new(Counting { calls: Cell::new(0) });
        let a = m.measure("парк●", &font(2.5));
        let b = m.measure("парк●", &font(2.5));
        assert_eq!(a, b);
        assert_eq!(m.cached(), 1);

        // A different size or weight is a different key
        m.measure("парк●", &font(3.0));
        m.measure("парк●", &font(2.5).bold(true));
        assert_eq!(m.cached(), 3);
        assert_eq!(m.into_inner().calls.get(), 3);
    }
}
