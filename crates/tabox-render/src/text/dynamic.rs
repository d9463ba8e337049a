//! Color placeholders and dynamic `$(...)` text for titles and footers.
//!
//! Title and footer text may embed two kinds of placeholders:
//!
//! - `$(command)` regions, replaced with the captured stdout of running the
//!   command. The render core never spawns processes itself: resolution goes
//!   through a [`DynamicTextProvider`] injected by the caller. The CLI wires
//!   in a shell-backed provider; tests use [`NullProvider`].
//! - `{RED}`, `{BOLD}`, `{NC}`, ... color names, replaced with ANSI codes
//!   after command substitution (or stripped entirely when color is off).
//!
//! Data cells never go through this path.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Resolves a `$(...)` command string to its replacement text.
pub trait DynamicTextProvider {
    /// Resolve `command` to its output, with any trailing newline stripped.
    fn resolve(&self, command: &str) -> String;
}

/// Provider that resolves every command to the empty string.
///
/// Used in tests and anywhere subprocess execution is unwanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProvider;

impl DynamicTextProvider for NullProvider {
    fn resolve(&self, _command: &str) -> String {
        String::new()
    }
}

static COLOR_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("RED", "\u{1b}[0;31m"),
        ("GREEN", "\u{1b}[0;32m"),
        ("YELLOW", "\u{1b}[0;33m"),
        ("BLUE", "\u{1b}[0;34m"),
        ("MAGENTA", "\u{1b}[0;35m"),
        ("CYAN", "\u{1b}[0;36m"),
        ("WHITE", "\u{1b}[0;37m"),
        ("BOLD", "\u{1b}[1m"),
        ("NC", "\u{1b}[0m"),
    ])
});

/// Replace every `$(...)` region with the provider's resolution of its
/// contents. Parentheses nest; an unterminated region is left verbatim.
pub fn substitute_commands(s: &str, provider: &dyn DynamicTextProvider) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '$' && i + 1 < chars.len() && chars[i + 1] == '(' {
            let mut depth = 1;
            let mut j = i + 2;
            while j < chars.len() && depth > 0 {
                match chars[j] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
            if depth == 0 {
                let command: String = chars[i + 2..j - 1].iter().collect();
                let resolved = provider.resolve(&command);
                out.push_str(resolved.trim_end_matches('\n'));
                i = j;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Replace `{NAME}` color placeholders with ANSI codes, or strip them when
/// `color` is false. Unknown names are left verbatim.
pub fn substitute_colors(s: &str, color: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if COLOR_CODES.contains_key(&after[..close]) => {
                if color {
                    out.push_str(COLOR_CODES[&after[..close]]);
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Full title/footer substitution: commands first, then color placeholders.
pub fn substitute_dynamic(s: &str, provider: &dyn DynamicTextProvider, color: bool) -> String {
    substitute_colors(&substitute_commands(s, provider), color)
}
