//! Embedded font metrics for the PDF builtin Helvetica faces.
//!
//! Widths are the standard AFM advance widths in 1/1000 of the font size,
//! covering the printable ASCII range. Characters outside the table fall
//! back to the digit width, which over-estimates for narrow glyphs and keeps
//! the shaper conservative.

/// Advance width fallback for characters outside the table, per mille.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for ' ' (0x20) through '~' (0x7E).
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ' ' (0x20) through '~' (0x7E).
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Font style selector for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

/// Measure the rendered width of `text` at `font_size` points.
pub fn text_width(text: &str, font_size: f32, style: FontStyle) -> f32 {
    let table = match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };

    let millis: u32 = text
        .chars()
        .map(|c| {
            let idx = c as u32;
            if (0x20..=0x7E).contains(&idx) {
                u32::from(table[(idx - 0x20) as usize])
            } else {
                u32::from(DEFAULT_WIDTH)
            }
        })
        .sum();

    millis as f32 / 1000.0 * font_size
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // 278/1000 * 10pt
        assert!((text_width(" ", 10.0, FontStyle::Regular) - 2.78).abs() < 1e-4);
    }

    #[test]
    fn test_width_is_additive() {
        let ab = text_width("ab", 12.0, FontStyle::Regular);
        let a = text_width("a", 12.0, FontStyle::Regular);
        let b = text_width("b", 12.0, FontStyle::Regular);
        assert!((ab - (a + b)).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_at_least_regular_for_letters() {
        let word = "Requirements";
        assert!(
            text_width(word, 12.0, FontStyle::Bold) >= text_width(word, 12.0, FontStyle::Regular)
        );
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let w = text_width("\u{00e9}", 10.0, FontStyle::Regular);
        assert!((w - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(text_width("", 12.0, FontStyle::Regular), 0.0);
    }
}
