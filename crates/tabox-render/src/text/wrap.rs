//! Word and delimiter wrapping.

use super::clip::clip;
use super::width::display_width;
use crate::config::Justify;

/// Greedy word wrap.
///
/// Whitespace-delimited tokens accumulate into a line while the line, a
/// separating space, and the next token still fit in `width`. A token wider
/// than `width` gets a line of its own (the renderer clips cell lines to the
/// column width afterwards). Empty input yields exactly one empty line.
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in s.split_whitespace() {
        if line.is_empty() {
            line = word.to_string();
        } else if display_width(&line) + 1 + display_width(word) <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    lines.push(line);
    lines
}

/// Split on every literal occurrence of `delim`, one line per segment.
///
/// Each segment is independently clipped if it still exceeds `width`. The
/// delimiter is matched as a plain substring, never as a pattern.
pub fn wrap_by_delimiter(s: &str, width: usize, delim: &str) -> Vec<String> {
    if delim.is_empty() {
        return vec![clip(s, width, Justify::Left)];
    }
    s.split(delim)
        .map(|seg| clip(seg, width, Justify::Left))
        .collect()
}
