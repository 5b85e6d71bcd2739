//! Generic table renderer
//!
//! A [`TableSchema`] describes the columns; rows are vectors of
//! [`CellValue`] in column order. A [`Table`] binds the two to a paging
//! mode and renders a terminal grid or CSV.
//!
//! Two paging modes exist and are never mixed:
//! - [`Paging::Client`]: the full set is in memory and a [`Pager`] slices it
//! - [`Paging::Server`]: rows are one server page, shown as given

mod cell;
mod pager;
mod render;
mod schema;

pub use cell::CellValue;
pub use pager::{range_label, Pager, PagerError, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
pub use render::{Paging, RenderError, Row, Table, EMPTY_MESSAGE};
pub use schema::{Align, CellRenderer, Column, ColumnKind, TableSchema};
