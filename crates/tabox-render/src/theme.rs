//! Named color themes for rendered tables.
//!
//! A theme pairs a border glyph set with the [`console::Style`]s applied to
//! each rendered region. The set of themes is closed: the layout document
//! names one, and an unknown name is a layout error rather than a silent
//! fallback.

use console::Style;

use crate::error::RenderError;

/// The box-drawing characters used for borders.
///
/// All themes currently share the rounded set; the struct keeps glyph
/// choice out of the border-merging logic.
#[derive(Clone, Copy, Debug)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub tee_left: char,
    pub tee_right: char,
    pub tee_down: char,
    pub tee_up: char,
    pub cross: char,
}

/// Rounded-corner box drawing, the only glyph set in use.
pub const ROUNDED: BorderGlyphs = BorderGlyphs {
    horizontal: '─',
    vertical: '│',
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    tee_left: '├',
    tee_right: '┤',
    tee_down: '┬',
    tee_up: '┴',
    cross: '┼',
};

impl BorderGlyphs {
    /// The glyph whose arms point in exactly the given directions.
    ///
    /// Used when merging a box border into a table border: each cell of the
    /// merged row knows which directions it connects to, and the glyph
    /// follows from that alone. Arm sets that no box-drawing character
    /// covers (fewer than two arms) render as a plain horizontal.
    pub fn for_arms(&self, up: bool, down: bool, left: bool, right: bool) -> char {
        match (up, down, left, right) {
            (false, false, true, true) => self.horizontal,
            (true, true, false, false) => self.vertical,
            (false, true, false, true) => self.top_left,
            (false, true, true, false) => self.top_right,
            (true, false, false, true) => self.bottom_left,
            (true, false, true, false) => self.bottom_right,
            (true, true, false, true) => self.tee_left,
            (true, true, true, false) => self.tee_right,
            (false, true, true, true) => self.tee_down,
            (true, false, true, true) => self.tee_up,
            (true, true, true, true) => self.cross,
            _ => self.horizontal,
        }
    }
}

/// One named theme: glyphs plus per-region styles.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Theme name as it appears in the layout document.
    pub name: &'static str,
    pub glyphs: BorderGlyphs,
    /// Style for every border glyph.
    pub border: Style,
    /// Style for the header row text.
    pub header: Style,
    /// Style for title and footer box text.
    pub box_text: Style,
    /// Style for the summary row text.
    pub summary: Style,
}

impl Theme {
    /// Look up a theme by its layout-document name.
    pub fn by_name(name: &str) -> Result<Theme, RenderError> {
        match name {
            "Blue" => Ok(Theme {
                name: "Blue",
                glyphs: ROUNDED,
                border: Style::new().blue(),
                header: Style::new().white().bold(),
                box_text: Style::new().white().bold(),
                summary: Style::new().cyan().bold(),
            }),
            "Red" => Ok(Theme {
                name: "Red",
                glyphs: ROUNDED,
                border: Style::new().red(),
                header: Style::new().white().bold(),
                box_text: Style::new().white().bold(),
                summary: Style::new().yellow().bold(),
            }),
            other => Err(RenderError::Layout(format!("unknown theme \"{}\"", other))),
        }
    }

    /// Apply a style to text, honoring the color switch.
    ///
    /// Styling is forced rather than tty-detected so output is identical
    /// whether stdout is a terminal or a pipe; the switch is the only
    /// thing that turns color off.
    pub fn paint(style: &Style, text: &str, color: bool) -> String {
        if color {
            style.clone().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
