//! Grid model for directive tables.

use serde::{Deserialize, Serialize};

/// A table rebuilt from a `(:table:)` directive region.
///
/// Column headers run along the top, every row carries its own header in
/// the leftmost column. The top-left corner cell is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveTable {
    /// Column headers in declaration order
    pub column_headers: Vec<String>,

    /// Data rows in declaration order
    pub rows: Vec<GridRow>,
}

impl DirectiveTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns including the row header column.
    pub fn column_count(&self) -> usize {
        let widest_row = self
            .rows
            .iter()
            .map(|row| row.cells.len() + 1)
            .max()
            .unwrap_or(0);
        (self.column_headers.len() + 1).max(widest_row)
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header row cells: an empty corner followed by the column headers,
    /// padded to the column count.
    pub fn header_cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(self.column_count());
        cells.push("");
        cells.extend(self.column_headers.iter().map(String::as_str));
        pad(cells, self.column_count())
    }

    /// Cells of a data row: its header followed by its cells, padded to the
    /// column count.
    pub fn row_cells<'a>(&self, row: &'a GridRow) -> Vec<&'a str> {
        let mut cells = Vec::with_capacity(self.column_count());
        cells.push(row.header.as_str());
        cells.extend(row.cells.iter().map(String::as_str));
        pad(cells, self.column_count())
    }
}

fn pad(mut cells: Vec<&str>, width: usize) -> Vec<&str> {
    while cells.len() < width {
        cells.push("");
    }
    cells
}

/// A data row with its row header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// Row header (leftmost, bolded on output)
    pub header: String,

    /// Data cells
    pub cells: Vec<String>,
}

impl GridRow {
    /// Create a row with a header and no cells.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            cells: Vec::new(),
        }
    }

    /// A row with neither header nor cells is never part of a table.
    pub fn is_blank(&self) -> bool {
        self.header.is_empty() && self.cells.is_empty()
    }
}
