//! Client-side data grid model
//!
//! Filtering, sorting and pagination over any collection whose rows expose
//! named fields. The `DataTable` component only renders what
//! [`GridState::view`] hands it, so everything here is testable without a
//! renderer.

pub mod column;
pub mod value;
pub mod view;

pub use column::{CellContent, Column, render_cell};
pub use value::CellValue;
pub use view::{
    DEFAULT_PAGE_SIZE, GridState, GridView, PageSlice, SortDirection, SortSpec, filter_rows, paginate,
    sort_rows,
};

/// A row the grid can display.
pub trait GridRow: Clone + PartialEq + 'static {
    /// Every field key, in display order. Search looks at all of them.
    const FIELDS: &'static [&'static str];

    /// Value of the field named `key`; unknown keys yield [`CellValue::Empty`].
    fn field(&self, key: &str) -> CellValue;

    /// Stable identity used as the render key.
    fn row_key(&self) -> String;
}
