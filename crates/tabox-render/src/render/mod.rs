//! The rendering pipeline.
//!
//! [`render`] takes the two JSON documents and produces the finished table
//! as a single string: title box, header row, data rows (with wrap lines
//! and break separators), summary row, footer box. Nothing here writes to
//! stdout or spawns processes; dynamic `$(...)` text goes through the
//! caller-supplied [`DynamicTextProvider`].

mod boxes;

pub use boxes::{box_cap, edge_border, separator_row, BoxPlan, Edge};

use crate::config::{ColumnSpec, TableSpec, WrapMode};
use crate::data::{display_value, Dataset};
use crate::error::RenderError;
use crate::layout::Layout;
use crate::text::{fit, substitute_dynamic, wrap, wrap_by_delimiter, DynamicTextProvider};
use crate::theme::Theme;

/// Rendering switches, threaded explicitly through the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Emit a geometry report alongside the table (see [`Rendered::debug`]).
    pub debug: bool,
    /// Apply ANSI styling. Off strips theme styles and `{COLOR}` markers.
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            debug: false,
            color: true,
        }
    }
}

/// A finished render.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// The table text, one trailing newline per line.
    pub output: String,
    /// Non-fatal layout problems, for the caller's stderr.
    pub warnings: Vec<String>,
    /// Geometry report when [`Options::debug`] is set, empty otherwise.
    pub debug: String,
}

/// Render a table from its layout and data documents.
pub fn render(
    layout_json: &str,
    data_json: &str,
    provider: &dyn DynamicTextProvider,
    options: Options,
) -> Result<Rendered, RenderError> {
    let mut spec = TableSpec::from_json(layout_json)?;
    let warnings = spec.validate()?;
    let theme = Theme::by_name(&spec.theme)?;
    let dataset = Dataset::load(&spec, data_json)?;
    let layout = Layout::compute(&spec, &dataset);

    let mut lines = Vec::new();
    let glyphs = &theme.glyphs;
    let paint_border = |s: &str| Theme::paint(&theme.border, s, options.color);

    // Title box, then the merged (or plain) top border.
    let title = spec
        .title
        .as_deref()
        .map(|t| substitute_dynamic(t, provider, options.color));
    let title_plan = title
        .as_deref()
        .map(|t| BoxPlan::place(t, spec.title_position, layout.table_width));
    if let Some(plan) = &title_plan {
        lines.push(paint_border(&box_cap(plan, Edge::Top, glyphs)));
        lines.push(box_line(plan, &theme, options));
    }
    lines.push(paint_border(&edge_border(
        &layout,
        Edge::Top,
        title_plan.as_ref(),
        glyphs,
    )));

    // Header row and its separator.
    let headers: Vec<String> = layout
        .visible
        .iter()
        .enumerate()
        .map(|(pos, &i)| {
            fit(
                &spec.columns[i].header,
                layout.content_width(pos),
                crate::config::Justify::Center,
            )
        })
        .collect();
    lines.push(compose_row(&headers, &theme, &theme.header, options));
    lines.push(paint_border(&separator_row(&layout, glyphs)));

    // Data rows, with break separators between groups.
    let break_col = spec.break_column();
    let mut prev_break: Option<&str> = None;
    for row in &dataset.rows {
        if let Some(bc) = break_col {
            let current = row.values[bc].as_str();
            if let Some(prev) = prev_break {
                if prev != current {
                    lines.push(paint_border(&separator_row(&layout, glyphs)));
                }
            }
            prev_break = Some(current);
        }

        for physical in row_lines(&spec, &dataset, &layout, row) {
            let cells: Vec<String> = physical
                .iter()
                .enumerate()
                .map(|(pos, text)| {
                    let col = &spec.columns[layout.visible[pos]];
                    fit(text, layout.content_width(pos), col.justification)
                })
                .collect();
            lines.push(compose_row(&cells, &theme, &console::Style::new(), options));
        }
    }

    // Summary row, set off by a full separator.
    if spec.has_summary() {
        lines.push(paint_border(&separator_row(&layout, glyphs)));
        let cells: Vec<String> = layout
            .visible
            .iter()
            .enumerate()
            .map(|(pos, &i)| {
                let col = &spec.columns[i];
                fit(
                    &dataset.summaries[i].text(col),
                    layout.content_width(pos),
                    col.justification,
                )
            })
            .collect();
        lines.push(compose_row(&cells, &theme, &theme.summary, options));
    }

    // Bottom border, merged with the footer box when present.
    let footer = spec
        .footer
        .as_deref()
        .map(|t| substitute_dynamic(t, provider, options.color));
    let footer_plan = footer
        .as_deref()
        .map(|t| BoxPlan::place(t, spec.footer_position, layout.table_width));
    lines.push(paint_border(&edge_border(
        &layout,
        Edge::Bottom,
        footer_plan.as_ref(),
        glyphs,
    )));
    if let Some(plan) = &footer_plan {
        lines.push(box_line(plan, &theme, options));
        lines.push(paint_border(&box_cap(plan, Edge::Bottom, glyphs)));
    }

    let mut output = lines.join("\n");
    output.push('\n');

    let debug = if options.debug {
        debug_report(&spec, &layout, &dataset)
    } else {
        String::new()
    };

    Ok(Rendered {
        output,
        warnings,
        debug,
    })
}

/// The physical lines of one logical row: wrap columns may span several.
///
/// Every returned line has one entry per visible column; short columns
/// pad out with empty strings.
fn row_lines(
    spec: &TableSpec,
    dataset: &Dataset,
    layout: &Layout,
    row: &crate::data::Row,
) -> Vec<Vec<String>> {
    let per_column: Vec<Vec<String>> = layout
        .visible
        .iter()
        .enumerate()
        .map(|(pos, &i)| {
            let col = &spec.columns[i];
            let text = display_value(col, &row.values[i], &dataset.summaries[i]);
            cell_lines(col, &text, layout.content_width(pos))
        })
        .collect();

    let height = per_column.iter().map(Vec::len).max().unwrap_or(1);
    (0..height)
        .map(|line| {
            per_column
                .iter()
                .map(|cell| cell.get(line).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// One cell's text split per its overflow mode.
fn cell_lines(col: &ColumnSpec, text: &str, width: usize) -> Vec<String> {
    match col.wrap_mode {
        WrapMode::Clip => vec![text.to_string()],
        WrapMode::Wrap => match col.wrap_char.as_deref() {
            Some(delim) => wrap_by_delimiter(text, width, delim),
            None => wrap(text, width),
        },
    }
}

/// Join fitted cells into one bordered row.
fn compose_row(
    cells: &[String],
    theme: &Theme,
    text_style: &console::Style,
    options: Options,
) -> String {
    let bar = Theme::paint(&theme.border, &theme.glyphs.vertical.to_string(), options.color);
    let mut out = bar.clone();
    for cell in cells {
        out.push(' ');
        out.push_str(&Theme::paint(text_style, cell, options.color));
        out.push(' ');
        out.push_str(&bar);
    }
    out
}

/// Box text line: the box's vertical borders around its fitted text.
fn box_line(plan: &BoxPlan, theme: &Theme, options: Options) -> String {
    let bar = Theme::paint(&theme.border, &theme.glyphs.vertical.to_string(), options.color);
    format!(
        "{}{} {} {}",
        " ".repeat(plan.start),
        bar,
        Theme::paint(&theme.box_text, &plan.text, options.color),
        bar
    )
}

/// Human-readable geometry report for `--debug`.
fn debug_report(spec: &TableSpec, layout: &Layout, dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "table width: {} ({} rows, {} visible columns)\n",
        layout.table_width,
        dataset.rows.len(),
        layout.visible.len()
    ));
    for (pos, &i) in layout.visible.iter().enumerate() {
        let col = &spec.columns[i];
        out.push_str(&format!(
            "column {:2} \"{}\": width {} (content {}), type {:?}, summary {:?}\n",
            i,
            col.header,
            layout.widths[pos],
            layout.content_width(pos),
            col.data_type,
            col.summary
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::NullProvider;

    fn plain() -> Options {
        Options {
            debug: false,
            color: false,
        }
    }

    fn render_plain(layout: &str, data: &str) -> String {
        render(layout, data, &NullProvider, plain()).unwrap().output
    }

    #[test]
    fn minimal_table() {
        let out = render_plain(
            r#"{ "columns": [{"header": "Name", "key": "name", "width": 6}] }"#,
            r#"[{"name": "api"}]"#,
        );
        let expected = "\
╭──────╮
│ Name │
├──────┤
│ api  │
╰──────╯
";
        assert_eq!(out, expected);
    }

    #[test]
    fn headers_are_centered() {
        let out = render_plain(
            r#"{ "columns": [{"header": "N", "key": "n", "width": 7}] }"#,
            "[]",
        );
        assert!(out.contains("│   N   │"));
    }

    #[test]
    fn right_justified_cells_pad_left() {
        let out = render_plain(
            r#"{ "columns": [{"header": "N", "key": "n", "width": 6,
                             "justification": "right", "data_type": "int"}] }"#,
            r#"[{"n": "42"}]"#,
        );
        assert!(out.contains("│   42 │"));
    }

    #[test]
    fn break_column_inserts_separators_between_groups() {
        let out = render_plain(
            r#"{ "columns": [{"header": "G", "key": "g", "width": 3,
                             "break_on_change": true}] }"#,
            r#"[{"g": "a"}, {"g": "a"}, {"g": "b"}]"#,
        );
        // One header separator, one break separator, no trailing one.
        assert_eq!(out.matches("├───┤").count(), 2);
    }

    #[test]
    fn summary_row_follows_a_full_separator() {
        let out = render_plain(
            r#"{ "columns": [{"header": "C", "key": "c", "width": 8,
                             "data_type": "kcpu", "summary": "sum",
                             "justification": "right"}] }"#,
            r#"[{"c": "500m"}, {"c": "1"}]"#,
        );
        let expected = "\
╭────────╮
│   C    │
├────────┤
│   500m │
│ 1,000m │
├────────┤
│ 1,500m │
╰────────╯
";
        assert_eq!(out, expected);
    }

    #[test]
    fn wrap_column_spans_physical_lines() {
        let out = render_plain(
            r#"{ "columns": [
                {"header": "A", "key": "a", "width": 3},
                {"header": "Msg", "key": "m", "width": 5, "wrap_mode": "wrap"}
            ] }"#,
            r#"[{"a": "x", "m": "one two"}]"#,
        );
        assert!(out.contains("│ x │ one │"));
        assert!(out.contains("│   │ two │"));
    }

    #[test]
    fn float_cells_share_the_column_precision() {
        // The widest observed precision (3 places) applies to every
        // rendered value in the column, not just the one that set it.
        let out = render_plain(
            r#"{ "columns": [{"header": "F", "key": "f", "data_type": "float",
                             "justification": "right"}] }"#,
            r#"[{"f": "1.5"}, {"f": "2.125"}, {"f": "3"}]"#,
        );
        assert!(out.contains("│ 1.500 │"), "got: {out}");
        assert!(out.contains("│ 2.125 │"));
        assert!(out.contains("│ 3.000 │"));
    }

    #[test]
    fn title_box_merges_into_the_top_border() {
        let out = render_plain(
            r#"{ "title": "T", "title_position": "full",
                "columns": [{"header": "Name", "key": "name", "width": 6}] }"#,
            "[]",
        );
        let expected = "\
╭──────╮
│  T   │
├──────┤
│ Name │
├──────┤
╰──────╯
";
        assert_eq!(out, expected);
    }

    #[test]
    fn footer_box_hangs_below_the_bottom_border() {
        let out = render_plain(
            r#"{ "footer": "F", "footer_position": "full",
                "columns": [{"header": "Name", "key": "name", "width": 6}] }"#,
            "[]",
        );
        assert!(out.ends_with(
            "├──────┤\n\
             │  F   │\n\
             ╰──────╯\n"
        ));
    }

    #[test]
    fn color_off_output_contains_no_escapes() {
        let out = render_plain(
            r#"{ "title": "{RED}hot{NC}", "title_position": "full",
                "columns": [{"header": "N", "key": "n"}] }"#,
            r#"[{"n": "v"}]"#,
        );
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn color_on_paints_borders() {
        let r = render(
            r#"{ "columns": [{"header": "N", "key": "n"}] }"#,
            "[]",
            &NullProvider,
            Options {
                debug: false,
                color: true,
            },
        )
        .unwrap();
        assert!(r.output.contains("\u{1b}["));
    }

    #[test]
    fn unknown_theme_fails() {
        let err = render(
            r#"{ "theme": "Mauve", "columns": [{"header": "N", "key": "n"}] }"#,
            "[]",
            &NullProvider,
            plain(),
        );
        assert!(matches!(err, Err(RenderError::Layout(_))));
    }

    #[test]
    fn debug_report_lists_column_geometry() {
        let r = render(
            r#"{ "columns": [{"header": "N", "key": "n", "width": 9}] }"#,
            "[]",
            &NullProvider,
            Options {
                debug: true,
                color: false,
            },
        )
        .unwrap();
        assert!(r.debug.contains("width 9 (content 7)"));
    }

    #[test]
    fn every_line_has_equal_display_width() {
        let out = render_plain(
            r#"{ "title": "Pods", "columns": [
                {"header": "Name", "key": "name"},
                {"header": "CPU", "key": "cpu", "data_type": "kcpu",
                 "summary": "sum", "justification": "right"}
            ] }"#,
            r#"[{"name": "api", "cpu": "500m"}, {"name": "db", "cpu": "1"}]"#,
        );
        let widths: Vec<usize> = out
            .lines()
            .map(crate::text::display_width)
            .collect();
        let max = *widths.iter().max().unwrap();
        // Border and content rows all span the table; only box rows may
        // be narrower (an indented cap) or equal.
        for (line, w) in out.lines().zip(&widths) {
            assert!(*w <= max, "line wider than the table: {:?}", line);
        }
        assert!(widths.iter().filter(|&&w| w == max).count() >= 5);
    }
}
