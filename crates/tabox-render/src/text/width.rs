//! ANSI-aware display width measurement.
//!
//! Width is counted in terminal cells: ANSI `ESC[...m` escape sequences are
//! skipped entirely, combining marks and zero-width characters count 0, and
//! codepoints on an explicit wide-range allow-list count 2. Everything else
//! counts 1.
//!
//! The wide ranges are deliberately an allow-list, not a full East-Asian-width
//! table: the legacy tool this engine replaces measured exactly these blocks,
//! and cell alignment has to match what it produced. The listed ranges cover
//! CJK ideographs, Hangul, fullwidth forms, and the emoji/pictograph blocks.

/// Wide (2-cell) codepoint ranges, inclusive.
const WIDE_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo
    (0x2600, 0x26FF),   // Miscellaneous Symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x2E80, 0x303E),   // CJK Radicals .. CJK Symbols and Punctuation
    (0x3041, 0x33FF),   // Hiragana .. CJK Compatibility
    (0x3400, 0x4DBF),   // CJK Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xA000, 0xA4CF),   // Yi Syllables
    (0xAC00, 0xD7A3),   // Hangul Syllables
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    (0xFE30, 0xFE4F),   // CJK Compatibility Forms
    (0xFF00, 0xFF60),   // Fullwidth Forms
    (0xFFE0, 0xFFE6),   // Fullwidth Signs
    (0x1F300, 0x1F5FF), // Miscellaneous Symbols and Pictographs
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F680, 0x1F6FF), // Transport and Map Symbols
    (0x1F900, 0x1F9FF), // Supplemental Symbols and Pictographs
    (0x1FA70, 0x1FAFF), // Symbols and Pictographs Extended-A
    (0x20000, 0x2FFFD), // CJK Extension B and beyond
    (0x30000, 0x3FFFD), // CJK Extension G
];

/// Zero-width codepoint ranges, inclusive (combining marks, joiners).
const ZERO_RANGES: &[(u32, u32)] = &[
    (0x0300, 0x036F), // Combining Diacritical Marks
    (0x1AB0, 0x1AFF), // Combining Diacritical Marks Extended
    (0x1DC0, 0x1DFF), // Combining Diacritical Marks Supplement
    (0x200B, 0x200F), // Zero-width space, joiners, direction marks
    (0x20D0, 0x20FF), // Combining Marks for Symbols
    (0xFE20, 0xFE2F), // Combining Half Marks
    (0xFEFF, 0xFEFF), // BOM / zero-width no-break space
];

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Display width of a single character in terminal cells.
pub fn char_width(c: char) -> usize {
    if in_ranges(c, ZERO_RANGES) {
        0
    } else if in_ranges(c, WIDE_RANGES) {
        2
    } else {
        1
    }
}

/// One lexed piece of a styled string: either a complete ANSI escape
/// sequence (width 0, never split) or a single visible character.
///
/// Clip and wrap operate on these tokens rather than raw bytes, so a
/// multi-byte codepoint or an escape sequence can never be cut in half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A complete `ESC[...m`-style escape sequence.
    Escape(&'a str),
    /// A single visible character.
    Char(char),
}

impl Token<'_> {
    /// Display width of this token.
    pub fn width(&self) -> usize {
        match self {
            Token::Escape(_) => 0,
            Token::Char(c) => char_width(*c),
        }
    }
}

/// Lex a string into escape-sequence and character tokens.
///
/// An escape sequence is `ESC [` followed by parameter bytes, terminated by
/// a final byte in `@`..=`~` (which is `m` for the SGR sequences the themes
/// emit). A bare ESC not followed by `[` is treated as a zero-width escape
/// of its own so it still never contributes to width.
pub fn tokens(s: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let bytes = s.as_bytes();
    let mut iter = s.char_indices().peekable();

    while let Some((start, c)) = iter.next() {
        if c == '\u{1b}' {
            if let Some(&(_, '[')) = iter.peek() {
                iter.next();
                let mut end = start + 2;
                for (i, fc) in iter.by_ref() {
                    end = i + fc.len_utf8();
                    if ('\u{40}'..='\u{7e}').contains(&fc) {
                        break;
                    }
                }
                // Guard against a truncated sequence at end of input.
                let end = end.min(bytes.len());
                out.push(Token::Escape(&s[start..end]));
            } else {
                out.push(Token::Escape(&s[start..start + 1]));
            }
        } else {
            out.push(Token::Char(c));
        }
    }
    out
}

/// Visible display width of a string, skipping ANSI escapes.
pub fn display_width(s: &str) -> usize {
    tokens(s).iter().map(Token::width).sum()
}
