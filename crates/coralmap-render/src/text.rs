use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measures a single line of label text in pixels.
///
/// Layout only ever needs line-at-a-time metrics; wrapping happens above the
/// measurer in [`wrap_label_lines`]. Implementations must be deterministic:
/// the same text and style always measure the same.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-file-free measurer: display cells (via `unicode-width`) times a
/// per-cell fraction of the font size.
///
/// Real glyph advances differ from this estimate, and the rasterizer's font
/// fallback differs again; that variance is accepted. What matters is that
/// wrap breakpoints and box sizes are reproducible on any machine.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    /// Width of one display cell as a fraction of the font size. 0 means
    /// the 0.6 default.
    pub cell_width_factor: f64,
    /// Line height as a fraction of the font size. 0 means the 1.2 default.
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let cell_width_factor = if self.cell_width_factor == 0.0 {
            0.6
        } else {
            self.cell_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let cells = UnicodeWidthStr::width(text);
        TextMetrics {
            width: cells as f64 * font_size * cell_width_factor,
            height: font_size * line_height_factor,
        }
    }
}

/// Greedy word wrap against measured pixel width.
///
/// Words are whitespace-separated and never split: a single word wider than
/// `max_width_px` becomes its own overflowing line rather than being
/// hyphenated. Always returns at least one line.
pub fn wrap_label_lines(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, style).width <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![text.trim().to_string()]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::default()
    }

    // font_size 16 * 0.6 = 9.6px per ASCII cell.
    const CELL: f64 = 9.6;

    #[test]
    fn measure_scales_with_cells() {
        let m = DeterministicTextMeasurer::default();
        let metrics = m.measure("abcd", &style());
        assert!((metrics.width - 4.0 * CELL).abs() < 1e-9);
        assert!((metrics.height - 19.2).abs() < 1e-9);
    }

    #[test]
    fn wide_chars_count_double() {
        let m = DeterministicTextMeasurer::default();
        let narrow = m.measure("ab", &style()).width;
        let wide = m.measure("日本", &style()).width;
        assert!((wide - 2.0 * narrow).abs() < 1e-9);
    }

    #[test]
    fn wrap_packs_greedily() {
        let m = DeterministicTextMeasurer::default();
        // 10 cells fit per line.
        let lines = wrap_label_lines("aa bb cc dd", &m, &style(), 10.0 * CELL);
        assert_eq!(lines, ["aa bb cc", "dd"]);
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_label_lines("supercalifragilistic", &m, &style(), 5.0 * CELL);
        assert_eq!(lines, ["supercalifragilistic"]);
    }

    #[test]
    fn wrap_overlong_word_between_short_ones() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_label_lines("a incomprehensibilities b", &m, &style(), 6.0 * CELL);
        assert_eq!(lines, ["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn wrap_never_returns_zero_lines() {
        let m = DeterministicTextMeasurer::default();
        assert_eq!(wrap_label_lines("   ", &m, &style(), 100.0).len(), 1);
    }
}
