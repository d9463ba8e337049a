//! Width-aware clipping and padding.

use super::width::{display_width, tokens, Token};
use crate::config::Justify;

/// Clip a string so its display width is at most `width`.
///
/// The side that loses characters follows the column justification:
/// left-justified content clips from the end, right-justified content clips
/// from the start, centered content clips from both ends proportionally.
/// Escape sequences are always kept (so styling and resets survive) and a
/// wide character that would straddle the cut is dropped whole.
pub fn clip(s: &str, width: usize, justification: Justify) -> String {
    let toks = tokens(s);
    let total: usize = toks.iter().map(Token::width).sum();
    if total <= width {
        return s.to_string();
    }

    // Visible window [keep_from, keep_from + width) in display columns.
    let keep_from = match justification {
        Justify::Left => 0,
        Justify::Right => total - width,
        Justify::Center => (total - width) / 2,
    };
    let keep_to = keep_from + width;

    let mut out = String::new();
    let mut pos = 0usize;
    for tok in toks {
        match tok {
            Token::Escape(esc) => out.push_str(esc),
            Token::Char(c) => {
                let w = tok.width();
                if pos >= keep_from && pos + w <= keep_to {
                    out.push(c);
                }
                pos += w;
            }
        }
    }
    out
}

/// Pad `s` on the right to `width` display columns (left justification).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Pad `s` on the left to `width` display columns (right justification).
pub fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

/// Pad `s` on both sides to `width` display columns (centered).
pub fn pad_center(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Clip then pad to exactly `width`, honoring the justification.
pub fn fit(s: &str, width: usize, justification: Justify) -> String {
    let clipped = clip(s, width, justification);
    match justification {
        Justify::Left => pad_right(&clipped, width),
        Justify::Right => pad_left(&clipped, width),
        Justify::Center => pad_center(&clipped, width),
    }
}
