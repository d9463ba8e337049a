//! Error types for table rendering.
//!
//! [`RenderError`] is the primary error type for all rendering operations.
//! Per-cell type mismatches are deliberately NOT errors: they are recovered
//! locally by the column's null/zero display policy. Everything here is
//! fatal-by-construction: a caller that sees a `RenderError` should print it
//! to stderr and exit non-zero without writing anything to stdout.

use thiserror::Error;

/// Error type for layout parsing, data loading, and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Layout document is structurally invalid (zero columns, empty header,
    /// empty key, duplicate break column, unknown theme).
    #[error("layout error: {0}")]
    Layout(String),

    /// Data document is structurally invalid (root not an array).
    #[error("data error: {0}")]
    Data(String),

    /// I/O error reading an input document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in either input document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_error_display() {
        let err = RenderError::Layout("no columns defined".into());
        assert_eq!(err.to_string(), "layout error: no columns defined");
    }

    #[test]
    fn json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: RenderError = parse_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
