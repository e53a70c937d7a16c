//! Text shaper: wraps a string into display lines for a given font size and
//! maximum width.
//!
//! Wrapping is greedy on word boundaries. A single word wider than the
//! maximum is hard-split so no produced line can ever exceed the limit.
//! Deterministic for the embedded metric table; no side effects.

use super::metrics::{text_width, FontStyle};

/// Wrap `text` into lines whose measured width at `font_size` never exceeds
/// `max_width` points. Empty or whitespace-only input yields no lines.
pub fn wrap(text: &str, font_size: f32, max_width: f32, style: FontStyle) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font_size, style) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, font_size, style) <= max_width {
            current = word.to_string();
        } else {
            current = split_long_word(word, font_size, max_width, style, &mut lines);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Hard-split an over-long word. Pushes full segments onto `lines` and
/// returns the trailing remainder.
fn split_long_word(
    word: &str,
    font_size: f32,
    max_width: f32,
    style: FontStyle,
    lines: &mut Vec<String>,
) -> String {
    let mut segment = String::new();
    for c in word.chars() {
        let mut candidate = segment.clone();
        candidate.push(c);
        if text_width(&candidate, font_size, style) > max_width && !segment.is_empty() {
            lines.push(std::mem::take(&mut segment));
        }
        segment.push(c);
    }
    segment
}

// ============================================================
// Tests
// ============================================================
