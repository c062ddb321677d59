use std::fmt;
use std::rc::Rc;

use super::GridRow;
use crate::components::status_badge::Tone;

/// How a cell is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Text(String),
    Badge { label: String, tone: Tone },
    Muted(String),
}

impl CellContent {
    pub fn text(value: impl Into<String>) -> Self {
        CellContent::Text(value.into())
    }

    pub fn muted(value: impl Into<String>) -> Self {
        CellContent::Muted(value.into())
    }

    /// Badge whose tone follows the status `key` (e.g. `checked_in`) while
    /// showing a display `label`.
    pub fn status(key: &str, label: impl Into<String>) -> Self {
        CellContent::Badge {
            label: label.into(),
            tone: Tone::for_label(key),
        }
    }

    /// The visible text, whatever the presentation.
    pub fn as_text(&self) -> &str {
        match self {
            CellContent::Text(text) | CellContent::Muted(text) => text,
            CellContent::Badge { label, .. } => label,
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

pub type Formatter<R> = Rc<dyn Fn(&R) -> CellContent>;

/// One grid column bound to the row type `R`.
#[derive(Clone)]
pub struct Column<R> {
    pub key: &'static str,
    pub label: String,
    pub sortable: bool,
    formatter: Option<Formatter<R>>,
}

impl<R: GridRow> Column<R> {
    /// Sortable column rendering the field's string form.
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            sortable: true,
            formatter: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Renders the cell from the whole row instead of the raw field.
    pub fn format(mut self, formatter: impl Fn(&R) -> CellContent + 'static) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }
}

impl<R> PartialEq for Column<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.label == other.label
            && self.sortable == other.sortable
            && match (&self.formatter, &other.formatter) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Content of the cell at (`row`, `column`).
///
/// The formatter wins when present; otherwise the field's string form is
/// shown, and a missing field renders as an empty string.
pub fn render_cell<R: GridRow>(column: &Column<R>, row: &R) -> CellContent {
    match &column.formatter {
        Some(formatter) => formatter(row),
        None => CellContent::Text(row.field(column.key).to_string()),
    }
}
