//! Row loading and per-column summary statistics.
//!
//! The data document is a JSON array of objects. Each record is flattened
//! into a positional [`Row`] of raw strings, one per column, by looking up
//! each column's `key`; a JSON null or absent key becomes the null sentinel.
//! Summaries accumulate as a single ordered fold while rows load; rows are
//! immutable afterwards (sorting reorders, never rewrites).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::Value;

use crate::config::{ColumnSpec, SortDirection, SummaryKind, TableSpec};
use crate::datatype::{decimals_in, group_number, DataType, NULL_SENTINEL};
use crate::error::RenderError;

/// One input record, as raw strings positionally aligned with the spec's
/// column list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Raw values, one per column (including hidden columns).
    pub values: Vec<String>,
}

/// Incrementally accumulated statistics for one column.
#[derive(Clone, Debug, Default)]
pub struct ColumnSummary {
    /// Running total over valid numeric values, in the type's base unit.
    pub sum: f64,
    /// Count of valid numeric contributors (for `avg`).
    pub numeric_count: usize,
    /// Smallest contributor. Only meaningful when `initialized`.
    pub min: f64,
    /// Largest contributor. Only meaningful when `initialized`.
    pub max: f64,
    /// Whether min/max have seen a value; 0 is a valid minimum, so a flag
    /// is required rather than a sentinel.
    pub initialized: bool,
    /// Count of non-null values.
    pub count: usize,
    /// Distinct non-null raw values.
    pub unique: BTreeSet<String>,
    /// Count of blank cells (empty, null, or numerically zero).
    pub blanks: usize,
    /// Count of non-blank cells.
    pub nonblanks: usize,
    /// Largest decimal-place count observed (float columns).
    pub max_decimals: usize,
}

impl ColumnSummary {
    /// Fold one raw value into the summary.
    fn accumulate(&mut self, col: &ColumnSpec, raw: &str) {
        let dt = col.data_type;
        let valid = dt.validate(raw);

        if raw != NULL_SENTINEL {
            self.count += 1;
            self.unique.insert(raw.to_string());
        }

        // Blank: empty, null, or numerically zero for numeric types.
        if !valid || dt.is_zero(raw) {
            self.blanks += 1;
        } else {
            self.nonblanks += 1;
        }

        if let Some(v) = dt.numeric_value(raw) {
            self.sum += v;
            self.numeric_count += 1;
            if self.initialized {
                self.min = self.min.min(v);
                self.max = self.max.max(v);
            } else {
                self.min = v;
                self.max = v;
                self.initialized = true;
            }
            if dt == DataType::Float {
                self.max_decimals = self.max_decimals.max(decimals_in(raw));
            }
        }
    }
}

/// The loaded data document: rows plus per-column summaries.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Rows in render order.
    pub rows: Vec<Row>,
    /// One summary per column, aligned with the spec's column list.
    pub summaries: Vec<ColumnSummary>,
}

impl Dataset {
    /// Load the data document, fold summaries, and apply the spec's sort
    /// rules.
    pub fn load(spec: &TableSpec, json: &str) -> Result<Self, RenderError> {
        let root: Value = serde_json::from_str(json)?;
        let records = root
            .as_array()
            .ok_or_else(|| RenderError::Data("data root is not an array".into()))?;

        let mut summaries: Vec<ColumnSummary> =
            spec.columns.iter().map(|_| ColumnSummary::default()).collect();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let values: Vec<String> = spec
                .columns
                .iter()
                .map(|col| raw_field(record, &col.key))
                .collect();
            for (col, (summary, raw)) in spec
                .columns
                .iter()
                .zip(summaries.iter_mut().zip(values.iter()))
            {
                summary.accumulate(col, raw);
            }
            rows.push(Row { values });
        }

        let mut dataset = Dataset { rows, summaries };
        dataset.sort(spec);
        Ok(dataset)
    }

    /// Stable multi-key sort per the spec's sort rules.
    ///
    /// Rules apply in `priority` order. Numeric columns compare by their
    /// aggregation value with invalid values ordered last; text columns
    /// compare lexically. `Vec::sort_by` is stable, so ties keep input
    /// order.
    fn sort(&mut self, spec: &TableSpec) {
        if spec.sort.is_empty() {
            return;
        }

        let mut rules: Vec<_> = spec
            .sort
            .iter()
            .filter_map(|rule| {
                spec.columns
                    .iter()
                    .position(|c| c.key == rule.key)
                    .map(|idx| (idx, rule.direction, rule.priority))
            })
            .collect();
        rules.sort_by_key(|&(_, _, priority)| priority);

        self.rows.sort_by(|a, b| {
            for &(idx, direction, _) in &rules {
                let dt = spec.columns[idx].data_type;
                let ord = compare_values(dt, &a.values[idx], &b.values[idx]);
                let ord = match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
    }
}

/// Compare two raw values under a column's data type.
fn compare_values(dt: DataType, a: &str, b: &str) -> Ordering {
    if dt.is_numeric() {
        match (dt.numeric_value(a), dt.numeric_value(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    } else {
        a.cmp(b)
    }
}

/// Extract one field as a raw string: null/absent becomes the sentinel,
/// numbers and booleans are stringified.
fn raw_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => NULL_SENTINEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl ColumnSummary {
    /// Text for this column's summary-row cell.
    ///
    /// Sum, min, max, and avg are suppressed (empty cell) when no value
    /// contributed or the aggregate is exactly zero; the counting kinds
    /// always render, zero included.
    pub fn text(&self, col: &ColumnSpec) -> String {
        let dt = col.data_type;
        match col.summary {
            SummaryKind::None => String::new(),
            SummaryKind::Sum => suppress_zero(dt, self.sum, self.max_decimals),
            SummaryKind::Min if self.initialized => {
                suppress_zero(dt, self.min, self.max_decimals)
            }
            SummaryKind::Max if self.initialized => {
                suppress_zero(dt, self.max, self.max_decimals)
            }
            SummaryKind::Avg if self.numeric_count > 0 => {
                suppress_zero(dt, self.sum / self.numeric_count as f64, self.max_decimals)
            }
            SummaryKind::Min | SummaryKind::Max | SummaryKind::Avg => String::new(),
            SummaryKind::Count => group_number(self.count as f64, 0),
            SummaryKind::Unique => group_number(self.unique.len() as f64, 0),
            SummaryKind::Blanks => group_number(self.blanks as f64, 0),
            SummaryKind::Nonblanks => group_number(self.nonblanks as f64, 0),
        }
    }
}

fn suppress_zero(dt: DataType, value: f64, decimals: usize) -> String {
    if value == 0.0 {
        String::new()
    } else {
        dt.format_aggregate(value, decimals)
    }
}

/// Display text for one cell, before clip/wrap.
///
/// A value failing validation takes the null display policy; a valid zero
/// takes the zero display policy; otherwise the type formats it.
pub fn display_value(col: &ColumnSpec, raw: &str, summary: &ColumnSummary) -> String {
    let dt = col.data_type;
    if !dt.validate(raw) {
        return col.null_display.text().to_string();
    }
    if dt.is_zero(raw) {
        return col.zero_display.text().to_string();
    }
    dt.format(raw, col.format.as_deref(), summary.max_decimals)
}
