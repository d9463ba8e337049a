//! Column width resolution and table geometry.
//!
//! Every width here counts terminal cells, not bytes or chars, and every
//! column width includes one space of padding on each side. An explicit
//! `width` in the layout document is authoritative; width 0 means the
//! column is measured from its header, its formatted cell values (capped
//! at `string_limit`), and its summary cell.

use crate::config::{ColumnSpec, TableSpec};
use crate::data::{display_value, ColumnSummary, Dataset};
use crate::text::display_width;

/// Resolved geometry for one table.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Indices into the spec's column list, visible columns only.
    pub visible: Vec<usize>,
    /// Resolved width per visible column, padding included.
    pub widths: Vec<usize>,
    /// Total rendered width, outer borders included.
    pub table_width: usize,
}

impl Layout {
    /// Measure the dataset and resolve all column widths.
    pub fn compute(spec: &TableSpec, dataset: &Dataset) -> Self {
        let visible = spec.visible_indices();
        let widths: Vec<usize> = visible
            .iter()
            .map(|&i| column_width(&spec.columns[i], dataset, i))
            .collect();

        // Borders left and right, plus one separator bar between each
        // adjacent pair of columns.
        let table_width = widths.iter().sum::<usize>() + visible.len().saturating_sub(1) + 2;

        Layout {
            visible,
            widths,
            table_width,
        }
    }

    /// Content cells available inside the visible column at `pos`.
    pub fn content_width(&self, pos: usize) -> usize {
        self.widths[pos].saturating_sub(2)
    }

    /// Offsets of every vertical bar in a row: the left border, one bar
    /// after each column, the last doubling as the right border.
    pub fn bar_offsets(&self) -> Vec<usize> {
        let mut offsets = vec![0];
        let mut x = 0;
        for &w in &self.widths {
            x += w + 1;
            offsets.push(x);
        }
        offsets
    }
}

fn column_width(col: &ColumnSpec, dataset: &Dataset, index: usize) -> usize {
    if col.width > 0 {
        return col.width;
    }

    let mut content = display_width(&col.header);
    for row in &dataset.rows {
        content = content.max(cell_width(col, &row.values[index], &dataset.summaries[index]));
    }
    content = content.max(display_width(&dataset.summaries[index].text(col)));
    content + 2
}

/// Measured width of one formatted cell, honoring `string_limit`.
///
/// A wrap column never measures wider than its limit either; lines are
/// produced at render time against the resolved width.
fn cell_width(col: &ColumnSpec, raw: &str, summary: &ColumnSummary) -> usize {
    let text = display_value(col, raw, summary);
    let w = display_width(&text);
    if col.string_limit > 0 {
        w.min(col.string_limit)
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(columns: &str, data: &str) -> (TableSpec, Dataset, Layout) {
        let json = format!(r#"{{ "columns": {} }}"#, columns);
        let spec = TableSpec::from_json(&json).unwrap();
        let dataset = Dataset::load(&spec, data).unwrap();
        let layout = Layout::compute(&spec, &dataset);
        (spec, dataset, layout)
    }

    #[test]
    fn auto_width_covers_header_and_cells() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "Name", "key": "name"}]"#,
            r#"[{"name": "a-much-longer-value"}]"#,
        );
        // 19 content cells plus padding.
        assert_eq!(layout.widths, vec![21]);
    }

    #[test]
    fn header_sets_the_floor() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "Status", "key": "s"}]"#,
            r#"[{"s": "ok"}]"#,
        );
        assert_eq!(layout.widths, vec![8]);
    }

    #[test]
    fn explicit_width_is_authoritative() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "Name", "key": "name", "width": 6}]"#,
            r#"[{"name": "a-much-longer-value"}]"#,
        );
        assert_eq!(layout.widths, vec![6]);
        assert_eq!(layout.content_width(0), 4);
    }

    #[test]
    fn string_limit_caps_measurement() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "N", "key": "n", "string_limit": 5}]"#,
            r#"[{"n": "a-much-longer-value"}]"#,
        );
        assert_eq!(layout.widths, vec![7]);
    }

    #[test]
    fn wide_header_overrides_string_limit() {
        // The cap only bounds what cell values contribute; a wider header
        // still wins, and content later clips at the resolved width.
        let (_, _, layout) = layout_for(
            r#"[{"header": "A-Wide-Header", "key": "n", "string_limit": 3}]"#,
            r#"[{"n": "a-much-longer-value"}]"#,
        );
        assert_eq!(layout.widths, vec![15]);
        assert_eq!(layout.content_width(0), 13);
    }

    #[test]
    fn summary_cell_counts_toward_width() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "C", "key": "c", "data_type": "kcpu", "summary": "sum"}]"#,
            r#"[{"c": "900m"}, {"c": "900m"}]"#,
        );
        // Summary "1,800m" is the widest content at 6 cells.
        assert_eq!(layout.widths, vec![8]);
    }

    #[test]
    fn hidden_columns_take_no_space() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "A", "key": "a"},
                {"header": "Hidden", "key": "h", "visible": false},
                {"header": "B", "key": "b"}]"#,
            r#"[{"a": "x", "h": "very-long-hidden-value", "b": "y"}]"#,
        );
        assert_eq!(layout.visible, vec![0, 2]);
        assert_eq!(layout.widths, vec![3, 3]);
    }

    #[test]
    fn table_width_sums_columns_bars_and_borders() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "A", "key": "a", "width": 5},
                {"header": "B", "key": "b", "width": 7}]"#,
            "[]",
        );
        // 5 + 7 columns, 1 inner bar, 2 borders.
        assert_eq!(layout.table_width, 15);
        assert_eq!(layout.bar_offsets(), vec![0, 6, 14]);
    }

    #[test]
    fn escape_sequences_do_not_widen_columns() {
        let (_, _, layout) = layout_for(
            r#"[{"header": "A", "key": "a"}]"#,
            r#"[{"a": "\u001b[31mred\u001b[0m"}]"#,
        );
        assert_eq!(layout.widths, vec![5]);
    }
}
