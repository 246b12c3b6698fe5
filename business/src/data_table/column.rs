use std::fmt;

use ustr::Ustr;

use super::CellValue;

/// Field-key lookup for rows shown in a table.
///
/// Unknown keys resolve to [`CellValue::Empty`].
pub trait TableRow {
    fn field(&self, key: &str) -> CellValue;
}

/// Dotted paths walk nested objects: `"userId.name"`.
impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        key.split('.')
            .try_fold(self, |value, segment| value.get(segment))
            .map(CellValue::from)
            .unwrap_or_default()
    }
}

pub enum Accessor<R> {
    Key(&'static str),
    Derive(fn(&R) -> CellValue),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<R> {}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    View,
    Edit,
    Toggle,
    Delete,
}

/// A button inside a row. Clicking it is reported back to the page, which decides
/// what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    pub row_id: Ustr,
    pub label: String,
}

impl RowAction {
    pub fn new(kind: ActionKind, row_id: Ustr, label: impl Into<String>) -> Self {
        Self {
            kind,
            row_id,
            label: label.into(),
        }
    }
}

/// Display form of a cell after the column renderer ran.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { text: String, tone: Tone },
    Actions(Vec<RowAction>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self::Badge {
            text: text.into(),
            tone,
        }
    }
}

pub type CellRenderer<R> = fn(&CellValue, &R) -> Cell;

pub struct Column<R> {
    /// Label and identity.
    pub header: &'static str,
    pub accessor: Accessor<R>,
    pub cell: Option<CellRenderer<R>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            accessor: self.accessor,
            cell: self.cell,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("cell", &self.cell.is_some())
            .finish()
    }
}

impl<R> Column<R> {
    pub fn key(header: &'static str, key: &'static str) -> Self {
        Self {
            header,
            accessor: Accessor::Key(key),
            cell: None,
        }
    }

    pub fn derive(header: &'static str, derive: fn(&R) -> CellValue) -> Self {
        Self {
            header,
            accessor: Accessor::Derive(derive),
            cell: None,
        }
    }

    pub fn with_cell(mut self, cell: CellRenderer<R>) -> Self {
        self.cell = Some(cell);
        self
    }
}

impl<R: TableRow> Column<R> {
    pub fn resolve(&self, row: &R) -> CellValue {
        match self.accessor {
            Accessor::Key(key) => row.field(key),
            Accessor::Derive(derive) => derive(row),
        }
    }

    pub fn render(&self, row: &R) -> Cell {
        let value = self.resolve(row);
        match self.cell {
            Some(cell) => cell(&value, row),
            None => Cell::Text(value.to_string()),
        }
    }
}
