//! Title/footer boxes and border-row construction.
//!
//! A title or footer is a small box attached flush against the table's top
//! or bottom edge. The shared edge is a single merged row: every cell of it
//! carries a set of connection arms (up, down, left, right) contributed by
//! the table border and by the box border, and the union of the arms picks
//! the glyph. That one rule produces the corner, tee, and cross characters
//! for every overlap case, including a box wider than the table.

use crate::config::{BoxPosition, Justify};
use crate::layout::Layout;
use crate::text::{display_width, fit};
use crate::theme::BorderGlyphs;

/// Which table edge a border row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// A resolved title or footer box: placement plus its fitted text.
#[derive(Clone, Debug)]
pub struct BoxPlan {
    /// Offset of the box's left border from the table's left border.
    pub start: usize,
    /// Total box width, borders included.
    pub width: usize,
    /// Text line content, already fitted to the interior.
    pub text: String,
}

impl BoxPlan {
    /// Place a box against a table of the given width.
    ///
    /// A positioned box is clipped to the table; only an unpositioned box
    /// keeps its natural width and may overhang the right edge.
    pub fn place(text: &str, position: Option<BoxPosition>, table_width: usize) -> BoxPlan {
        // One border and one padding space per side.
        let natural = display_width(text) + 4;
        let (start, width) = match position {
            None => (0, natural),
            Some(BoxPosition::Full) => (0, table_width),
            Some(BoxPosition::Left) => (0, natural.min(table_width)),
            Some(BoxPosition::Right) => {
                let w = natural.min(table_width);
                (table_width - w, w)
            }
            Some(BoxPosition::Center) => {
                let w = natural.min(table_width);
                ((table_width - w) / 2, w)
            }
        };
        BoxPlan {
            start,
            width,
            text: fit(text, width.saturating_sub(4), Justify::Center),
        }
    }

    fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Arm set for one border cell.
#[derive(Clone, Copy, Debug, Default)]
struct Arms {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl Arms {
    fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// The border row along one table edge, merged with an attached box.
///
/// With no box this is the plain top or bottom border. With one, the box
/// sits above a `Top` edge or below a `Bottom` edge and its near border is
/// fused into the row.
pub fn edge_border(
    layout: &Layout,
    edge: Edge,
    boxed: Option<&BoxPlan>,
    glyphs: &BorderGlyphs,
) -> String {
    let table_width = layout.table_width;
    let row_width = table_width.max(boxed.map_or(0, |b| b.end()));
    let bars = layout.bar_offsets();

    let mut out = String::with_capacity(row_width * 3);
    for x in 0..row_width {
        let mut arms = Arms::default();

        if x < table_width {
            // The table body lies below a Top edge, above a Bottom edge.
            let into_table = edge == Edge::Top;
            arms.left = x > 0;
            arms.right = x < table_width - 1;
            if bars.contains(&x) {
                arms.up = !into_table;
                arms.down = into_table;
            }
        }

        if let Some(b) = boxed {
            if x >= b.start && x < b.end() {
                // The box sits on the far side of the edge from the body.
                let into_box = edge == Edge::Top;
                if x == b.start || x == b.end() - 1 {
                    arms.up = arms.up || into_box;
                    arms.down = arms.down || !into_box;
                }
                arms.left = arms.left || x > b.start;
                arms.right = arms.right || x < b.end() - 1;
            }
        }

        if arms.any() {
            out.push(glyphs.for_arms(arms.up, arms.down, arms.left, arms.right));
        } else {
            out.push(' ');
        }
    }
    out
}

/// The box's outer border row, the one not shared with the table.
pub fn box_cap(plan: &BoxPlan, edge: Edge, glyphs: &BorderGlyphs) -> String {
    let (open, close) = match edge {
        // Box above the table: its cap is a top border.
        Edge::Top => (glyphs.top_left, glyphs.top_right),
        Edge::Bottom => (glyphs.bottom_left, glyphs.bottom_right),
    };
    let mut out = String::with_capacity(plan.end() * 3);
    out.push_str(&" ".repeat(plan.start));
    out.push(open);
    for _ in 0..plan.width.saturating_sub(2) {
        out.push(glyphs.horizontal);
    }
    out.push(close);
    out
}

/// An interior separator row: both edges connect into table rows.
pub fn separator_row(layout: &Layout, glyphs: &BorderGlyphs) -> String {
    let bars = layout.bar_offsets();
    let mut out = String::with_capacity(layout.table_width * 3);
    for x in 0..layout.table_width {
        if bars.contains(&x) {
            let left = x > 0;
            let right = x < layout.table_width - 1;
            out.push(glyphs.for_arms(true, true, left, right));
        } else {
            out.push(glyphs.horizontal);
        }
    }
    out
}
