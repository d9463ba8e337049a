//! Per-column data-type validation and formatting.
//!
//! Each declared column type knows how to validate a raw string value and
//! how to format it for display. The two Kubernetes quantity types normalize
//! for aggregation: CPU to millicores, memory to the display base unit (M)
//! under the legacy fixed convention `K/Ki ÷1000, M/Mi ×1, G/Gi ×1000`.
//! That convention is intentionally not a true binary/decimal conversion;
//! downstream dashboards depend on the numbers it produces.

use serde::{Deserialize, Serialize};

/// Raw-value sentinel for a missing or JSON-null field.
pub const NULL_SENTINEL: &str = "null";

/// Declared display type of a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text, passed through and clipped/wrapped per column policy.
    #[default]
    Text,
    /// Integer with thousands grouping.
    Int,
    /// Grouped number, integer or decimal.
    Num,
    /// Decimal rendered at the column's observed precision.
    Float,
    /// Kubernetes CPU quantity: `500m` or bare cores.
    Kcpu,
    /// Kubernetes memory quantity: digits + `K|M|G|Ki|Mi|Gi`.
    Kmem,
}

impl DataType {
    /// Whether this type aggregates numerically.
    pub fn is_numeric(self) -> bool {
        !matches!(self, DataType::Text)
    }

    /// Validate a raw value against this type.
    ///
    /// The null sentinel fails validation for every type; the caller then
    /// applies the column's null display policy.
    pub fn validate(self, raw: &str) -> bool {
        if raw == NULL_SENTINEL {
            return false;
        }
        match self {
            DataType::Text => true,
            DataType::Int => is_integer(raw),
            DataType::Num | DataType::Float => is_decimal(raw),
            DataType::Kcpu => match raw.strip_suffix('m') {
                Some(millis) => is_unsigned_integer(millis),
                // Kubernetes quantities are non-negative.
                None => is_unsigned_decimal(raw),
            },
            DataType::Kmem => strip_kmem_suffix(raw)
                .map(|(digits, _)| is_unsigned_integer(digits))
                .unwrap_or(false),
        }
    }

    /// Numeric value used for aggregation, in this type's base unit
    /// (millicores for kcpu, M for kmem, the plain value otherwise).
    pub fn numeric_value(self, raw: &str) -> Option<f64> {
        if !self.validate(raw) {
            return None;
        }
        match self {
            DataType::Text => None,
            DataType::Int | DataType::Num | DataType::Float => raw.parse().ok(),
            DataType::Kcpu => match raw.strip_suffix('m') {
                Some(millis) => millis.parse().ok(),
                None => raw.parse::<f64>().ok().map(|cores| cores * 1000.0),
            },
            DataType::Kmem => {
                let (digits, factor) = strip_kmem_suffix(raw)?;
                digits.parse::<f64>().ok().map(|v| v * factor)
            }
        }
    }

    /// Whether a (valid) raw value is this type's zero sentinel.
    pub fn is_zero(self, raw: &str) -> bool {
        match self {
            DataType::Text => raw.is_empty(),
            _ => self.numeric_value(raw) == Some(0.0),
        }
    }

    /// Format a valid raw value for display.
    ///
    /// `format` is the column's optional printf-style numeric format;
    /// `decimals` is the column-wide precision (only meaningful for float).
    pub fn format(self, raw: &str, format: Option<&str>, decimals: usize) -> String {
        match self {
            DataType::Text => raw.to_string(),
            DataType::Int | DataType::Num => {
                let Some(value) = self.numeric_value(raw) else {
                    return raw.to_string();
                };
                match format {
                    Some(f) => apply_format(f, value),
                    None => group_number(value, decimals_in(raw)),
                }
            }
            DataType::Float => {
                let Some(value) = self.numeric_value(raw) else {
                    return raw.to_string();
                };
                match format {
                    Some(f) => apply_format(f, value),
                    None => group_number(value, decimals),
                }
            }
            DataType::Kcpu => match self.numeric_value(raw) {
                Some(millis) => format!("{}m", group_number(millis.round(), 0)),
                None => raw.to_string(),
            },
            DataType::Kmem => match self.numeric_value(raw) {
                Some(base) => format!("{}M", group_number(base.round(), 0)),
                None => raw.to_string(),
            },
        }
    }

    /// Format an aggregated value (already in the base unit) for the
    /// summary row.
    pub fn format_aggregate(self, value: f64, decimals: usize) -> String {
        match self {
            DataType::Text => String::new(),
            DataType::Int | DataType::Num => group_number(value.round(), 0),
            DataType::Float => group_number(value, decimals),
            DataType::Kcpu => format!("{}m", group_number(value.round(), 0)),
            DataType::Kmem => format!("{}M", group_number(value.round(), 0)),
        }
    }
}

/// Count of digits after the decimal point in a raw numeric string.
pub fn decimals_in(raw: &str) -> usize {
    raw.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}

fn is_unsigned_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(s: &str) -> bool {
    is_unsigned_integer(s.strip_prefix('-').unwrap_or(s))
}

fn is_decimal(s: &str) -> bool {
    is_unsigned_decimal(s.strip_prefix('-').unwrap_or(s))
}

fn is_unsigned_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int, frac)) => is_unsigned_integer(int) && is_unsigned_integer(frac),
        None => is_unsigned_integer(s),
    }
}

/// Split a kmem quantity into its digits and the legacy unit factor.
/// Binary suffixes must be checked before their single-letter prefixes.
fn strip_kmem_suffix(raw: &str) -> Option<(&str, f64)> {
    for (suffix, factor) in [
        ("Ki", 0.001),
        ("Mi", 1.0),
        ("Gi", 1000.0),
        ("K", 0.001),
        ("M", 1.0),
        ("G", 1000.0),
    ] {
        if let Some(digits) = raw.strip_suffix(suffix) {
            return Some((digits, factor));
        }
    }
    None
}

/// Render a number with thousands separators in the integer part and a
/// fixed count of decimal places.
pub fn group_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Apply a printf-style numeric format string.
///
/// Supported directives: `%d` (rounded integer), `%.Nf` (fixed decimals),
/// `%f` (six decimals, printf default), `%%` (literal percent). Any other
/// text passes through verbatim.
pub fn apply_format(format: &str, value: f64) -> String {
    let mut out = String::new();
    let chars: Vec<char> = format.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        if i + 1 < chars.len() && chars[i + 1] == '%' {
            out.push('%');
            i += 2;
        } else if i + 1 < chars.len() && chars[i + 1] == 'd' {
            out.push_str(&format!("{}", value.round() as i64));
            i += 2;
        } else if i + 1 < chars.len() && chars[i + 1] == 'f' {
            out.push_str(&format!("{:.6}", value));
            i += 2;
        } else if i + 1 < chars.len() && chars[i + 1] == '.' {
            // %.Nf
            let mut j = i + 2;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j < chars.len() && chars[j] == 'f' && j > i + 2 {
                let n: usize = chars[i + 2..j].iter().collect::<String>().parse().unwrap_or(0);
                out.push_str(&format!("{:.*}", n, value));
                i = j + 1;
            } else {
                out.push(chars[i]);
                i += 1;
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
