//! Terminal table rendering from a pair of JSON documents.
//!
//! A *layout* document describes the table: theme, optional title and
//! footer boxes, the column list (type, justification, width, wrap and
//! summary behavior), and sort rules. A *data* document is a JSON array of
//! records. [`render`] turns the pair into an ANSI-styled, box-drawn table.
//!
//! ```no_run
//! use tabox_render::{render, NullProvider, Options};
//!
//! let layout = r#"{ "columns": [{"header": "Name", "key": "name"}] }"#;
//! let data = r#"[{"name": "api"}, {"name": "db"}]"#;
//! let table = render(layout, data, &NullProvider, Options::default())?;
//! print!("{}", table.output);
//! # Ok::<(), tabox_render::RenderError>(())
//! ```
//!
//! Width arithmetic is ANSI-aware throughout: escape sequences occupy zero
//! terminal cells and survive clipping intact, and East Asian wide
//! characters count as two cells. Dynamic `$(...)` segments in title and
//! footer text resolve through a caller-supplied [`DynamicTextProvider`];
//! the crate itself never runs commands.

pub mod config;
pub mod data;
pub mod datatype;
pub mod error;
pub mod layout;
pub mod render;
pub mod text;
pub mod theme;

pub use config::{
    BoxPosition, ColumnSpec, Justify, SortDirection, SortRule, SummaryKind, TableSpec, ValuePolicy,
    WrapMode,
};
pub use data::{ColumnSummary, Dataset, Row};
pub use datatype::DataType;
pub use error::RenderError;
pub use layout::Layout;
pub use render::{render, Options, Rendered};
pub use text::{display_width, DynamicTextProvider, NullProvider};
pub use theme::Theme;
