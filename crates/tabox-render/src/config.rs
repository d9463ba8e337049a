//! Layout document model.
//!
//! The layout document is the first of the two JSON inputs: it declares the
//! theme, optional title/footer boxes, the ordered column list, and optional
//! sort rules. Parsing is plain serde; validation is a separate pass so the
//! caller can distinguish fatal problems (zero columns, empty header) from
//! recoverable ones (too many columns, which warns and truncates).

use serde::{Deserialize, Serialize};

use crate::datatype::DataType;
use crate::error::RenderError;

/// Hard cap on the number of columns; extras warn and are dropped.
pub const MAX_COLUMNS: usize = 32;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Left-align (pad on the right).
    #[default]
    Left,
    /// Right-align (pad on the left).
    Right,
    /// Center (pad on both sides).
    Center,
}

/// Display policy for a missing or zero value.
///
/// Null and zero policies are independent: a genuinely missing field and a
/// present-but-zero field can render differently in the same column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuePolicy {
    /// Render as an empty cell.
    #[default]
    Blank,
    /// Render a literal `0`.
    Zero,
    /// Render the word `Missing`.
    Missing,
}

impl ValuePolicy {
    /// The substitute display text for this policy.
    pub fn text(self) -> &'static str {
        match self {
            ValuePolicy::Blank => "",
            ValuePolicy::Zero => "0",
            ValuePolicy::Missing => "Missing",
        }
    }
}

/// How a column handles content wider than its width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Hard cut at the column width.
    #[default]
    Clip,
    /// Wrap to multiple lines (word wrap, or delimiter wrap when the
    /// column sets `wrap_char`).
    Wrap,
}

/// Aggregate computed for a column's summary-row cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    /// No summary for this column.
    #[default]
    None,
    /// Running total. Suppressed when it is exactly zero.
    Sum,
    /// Smallest contributing value. Suppressed when zero or absent.
    Min,
    /// Largest contributing value. Suppressed when zero or absent.
    Max,
    /// Mean of contributing values. Suppressed when zero or absent.
    Avg,
    /// Count of non-null values. Always rendered.
    Count,
    /// Count of distinct values. Always rendered.
    Unique,
    /// Count of blank cells. Always rendered.
    Blanks,
    /// Count of non-blank cells. Always rendered.
    Nonblanks,
}

/// Placement of a title or footer box along the table edge.
///
/// A positioned box is always clipped to the table width; only a box with
/// no position at all may overhang a narrower table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxPosition {
    /// Flush with the table's left edge.
    Left,
    /// Flush with the table's right edge.
    Right,
    /// Centered on the table.
    Center,
    /// Exactly as wide as the table.
    Full,
}

/// Sort direction for one sort rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// One multi-key sort rule. Lower `priority` sorts first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SortRule {
    /// Column key to sort by.
    pub key: String,
    /// Direction, ascending by default.
    #[serde(default)]
    pub direction: SortDirection,
    /// Rule ordering; lower applies first.
    #[serde(default)]
    pub priority: i64,
}

/// Configuration for one displayed column.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column header text. Must be non-empty.
    pub header: String,
    /// Lookup name into each input record. Exactly one per column.
    pub key: String,
    /// Cell justification.
    #[serde(default)]
    pub justification: Justify,
    /// Declared data type.
    #[serde(default)]
    pub data_type: DataType,
    /// Policy for a missing/null field.
    #[serde(default)]
    pub null_display: ValuePolicy,
    /// Policy for a present-but-zero field.
    #[serde(default)]
    pub zero_display: ValuePolicy,
    /// Optional printf-style numeric format.
    #[serde(default)]
    pub format: Option<String>,
    /// Summary-row aggregate.
    #[serde(default)]
    pub summary: SummaryKind,
    /// Emit a group separator when this column's value changes between
    /// consecutive rows. At most one column may set this.
    #[serde(default)]
    pub break_on_change: bool,
    /// Cap on how many cells this column's values contribute to auto-width
    /// measurement. 0 = unlimited. When the header or another cell still
    /// resolves the column wider, clip/wrap happens at that resolved width,
    /// not at this cap.
    #[serde(default)]
    pub string_limit: usize,
    /// Overflow handling.
    #[serde(default)]
    pub wrap_mode: WrapMode,
    /// Delimiter for delimiter-mode wrapping; word wrap when absent.
    #[serde(default)]
    pub wrap_char: Option<String>,
    /// Explicit column width (content plus one space of padding per side).
    /// 0 = auto-computed from content; a positive value is authoritative
    /// and never recomputed.
    #[serde(default)]
    pub width: usize,
    /// Whether the column is rendered.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// The parsed layout document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableSpec {
    /// Theme name. Closed set; see [`crate::theme::Theme::by_name`].
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Optional title box text (may contain `$(...)` and `{COLOR}`).
    #[serde(default)]
    pub title: Option<String>,
    /// Title placement; absent means unpositioned (may overhang).
    #[serde(default)]
    pub title_position: Option<BoxPosition>,
    /// Optional footer box text.
    #[serde(default)]
    pub footer: Option<String>,
    /// Footer placement.
    #[serde(default)]
    pub footer_position: Option<BoxPosition>,
    /// Ordered column list.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    /// Optional multi-key sort rules.
    #[serde(default)]
    pub sort: Vec<SortRule>,
}

fn default_theme() -> String {
    "Blue".to_string()
}

impl TableSpec {
    /// Parse a layout document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the spec, truncating past the column cap.
    ///
    /// Returns non-fatal warnings for the caller to surface on stderr;
    /// structural problems are fatal [`RenderError::Layout`]s.
    pub fn validate(&mut self) -> Result<Vec<String>, RenderError> {
        let mut warnings = Vec::new();

        if self.columns.is_empty() {
            return Err(RenderError::Layout("no columns defined".into()));
        }
        if self.columns.len() > MAX_COLUMNS {
            warnings.push(format!(
                "{} columns defined, keeping the first {}",
                self.columns.len(),
                MAX_COLUMNS
            ));
            self.columns.truncate(MAX_COLUMNS);
        }

        for (i, col) in self.columns.iter().enumerate() {
            if col.header.is_empty() {
                return Err(RenderError::Layout(format!("column {} has an empty header", i)));
            }
            if col.key.is_empty() {
                return Err(RenderError::Layout(format!(
                    "column \"{}\" has an empty key",
                    col.header
                )));
            }
        }

        let breaks = self.columns.iter().filter(|c| c.break_on_change).count();
        if breaks > 1 {
            return Err(RenderError::Layout(format!(
                "{} columns set break_on_change, at most one is allowed",
                breaks
            )));
        }

        Ok(warnings)
    }

    /// Indices of visible columns, in declaration order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the break-on-change column, if any.
    pub fn break_column(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.break_on_change)
    }

    /// Whether any visible column configures a summary aggregate.
    pub fn has_summary(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.visible && c.summary != SummaryKind::None)
    }
}
