//! Directive table parser.
//!
//! PmWiki serializes a table as a flat stream of `(:head:)` and `(:cell:)`
//! lines: first every column header, then for each row a row header followed
//! by its cells. The first row has no header directive of its own; its header
//! is written as the last column header. [`TableBuilder`] undoes that by
//! moving the last column header onto the first row when the first cell
//! shows up.

use crate::model::{DirectiveTable, GridRow};

/// One recognized line of a directive table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableToken {
    /// `(:head:)` or `(:headnr:)`
    Header(String),
    /// `(:cell:)` or `(:cellnr:)`
    Cell(String),
}

impl TableToken {
    /// Recognize a single trimmed line. Anything other than a header or cell
    /// directive yields `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        if line.starts_with("(:head") {
            directive_content(line).map(TableToken::Header)
        } else if line.starts_with("(:cell") {
            directive_content(line).map(TableToken::Cell)
        } else {
            None
        }
    }
}

/// Text following the directive's closing `:)`.
fn directive_content(line: &str) -> Option<String> {
    let (_, content) = line.split_once(":)")?;
    Some(content.trim().to_string())
}

/// Split a table body into tokens. Encoded `%0a` line breaks count as real
/// ones; blank and unknown lines are dropped.
pub fn tokenize(body: &str) -> Vec<TableToken> {
    body.replace("%0a", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(TableToken::from_line)
        .collect()
}

/// Finite-state builder turning the token stream into a grid.
#[derive(Debug, Default)]
pub struct TableBuilder {
    column_headers: Vec<String>,
    rows: Vec<GridRow>,
    current: GridRow,
    seen_first_cell: bool,
}

impl TableBuilder {
    /// Create a builder in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token.
    pub fn push(&mut self, token: TableToken) {
        match token {
            TableToken::Header(content) if !self.seen_first_cell => {
                self.column_headers.push(content);
            }
            TableToken::Header(content) => {
                self.finish_row();
                self.current = GridRow::new(content);
            }
            TableToken::Cell(content) => {
                if !self.seen_first_cell {
                    self.seen_first_cell = true;
                    if let Some(header) = self.column_headers.pop() {
                        log::trace!("Column header {:?} becomes the first row header", header);
                        self.current.header = header;
                    }
                }
                self.current.cells.push(content);
            }
        }
    }

    /// Whether a cell has been seen, i.e. column headers are closed.
    pub fn in_body(&self) -> bool {
        self.seen_first_cell
    }

    fn finish_row(&mut self) {
        let row = std::mem::take(&mut self.current);
        if !row.is_blank() {
            self.rows.push(row);
        }
    }

    /// Close any open row and return the grid.
    pub fn finish(mut self) -> DirectiveTable {
        self.finish_row();
        DirectiveTable {
            column_headers: self.column_headers,
            rows: self.rows,
        }
    }
}

/// Parse a table body into a grid. Returns `None` when the body holds no
/// header or cell directive at all.
pub fn parse_table(body: &str) -> Option<DirectiveTable> {
    let tokens = tokenize(body);
    if tokens.is_empty() {
        return None;
    }
    log::trace!("Directive table with {} tokens", tokens.len());

    let mut builder = TableBuilder::new();
    for token in tokens {
        builder.push(token);
    }
    Some(builder.finish())
}
