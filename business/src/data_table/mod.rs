//! Column model, search and pagination behind every table in the console.
//!
//! The widget in `safari-ui` only draws what [`TableView::slice`] returns; all
//! filtering and page arithmetic lives here so it can be tested without egui.

mod column;
mod value;
mod view;

use std::sync::atomic::{AtomicU64, Ordering};

pub use column::{Accessor, ActionKind, Cell, CellRenderer, Column, RowAction, TableRow, Tone};
pub use value::CellValue;
pub use view::{
    PageSize, PageSlice, TableView, clamp_page, filter_rows, page_after_resize, page_window,
    total_pages,
};

static REVISION: AtomicU64 = AtomicU64::new(0);

/// Fresh data revision. Every fetched or locally edited row list gets one, so a
/// table re-filters even when the new rows equal the old ones.
pub fn next_revision() -> u64 {
    REVISION.fetch_add(1, Ordering::Relaxed) + 1
}
