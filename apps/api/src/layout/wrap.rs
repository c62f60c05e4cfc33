//! Greedy word wrap against static font metrics.
//!
//! Explicit newlines are hard breaks. Within a line, words are packed left to
//! right until the next word (plus its leading space) would overflow.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// A single word wider than the line is emitted on a line of its own rather
/// than split. Blank input lines are dropped.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let max_width = max_width_pt / size_pt;
    let mut lines = Vec::new();

    for hard_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in hard_line.split_whitespace() {
            let word_w = metrics.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + metrics.space_width + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += metrics.space_width + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
