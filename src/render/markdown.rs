//! Grid table rendering.

use crate::model::DirectiveTable;

/// Render a directive table as a Markdown grid.
///
/// The grid opens with an all-blank header row and a dash separator, since
/// the column headers form an ordinary row with an empty corner cell.
pub fn render_grid_table(table: &DirectiveTable) -> String {
    let col_count = table.column_count();
    let mut lines = Vec::with_capacity(table.row_count() + 3);

    lines.push(blank_row(col_count));
    lines.push(separator_row(col_count));

    let header: Vec<String> = table.header_cells().into_iter().map(bold).collect();
    lines.push(table_row(&header));

    for row in &table.rows {
        let cells: Vec<String> = table
            .row_cells(row)
            .into_iter()
            .enumerate()
            .map(|(i, cell)| if i == 0 { bold(cell) } else { cell.trim().to_string() })
            .collect();
        lines.push(table_row(&cells));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Render a `||border=N` table.
///
/// `prefix` is the text found before the border attribute on its line, and
/// `rows` the raw `||a||b||` lines. The column count comes from the first
/// row; shorter rows are padded.
pub fn render_pipe_table(prefix: &str, rows: &[&str]) -> String {
    let parsed: Vec<Vec<&str>> = rows.iter().map(|row| split_pipe_row(row)).collect();
    let col_count = parsed.first().map(Vec::len).unwrap_or(0);

    let mut lines = Vec::with_capacity(parsed.len() + 3);
    if !prefix.trim().is_empty() {
        lines.push(format!("{} ", prefix.trim_end()));
    }
    lines.push(blank_row(col_count));
    lines.push(separator_row(col_count));

    for cells in parsed {
        let mut cells: Vec<String> = cells.into_iter().map(|c| c.trim().to_string()).collect();
        while cells.len() < col_count {
            cells.push(String::new());
        }
        lines.push(table_row(&cells));
    }

    lines.join("\n")
}

fn split_pipe_row(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix("||").unwrap_or(row);
    let row = row.strip_suffix("||").unwrap_or(row);
    row.split("||").collect()
}

fn bold(cell: &str) -> String {
    let cell = cell.trim();
    if cell.is_empty() {
        String::new()
    } else {
        format!("**{}**", cell)
    }
}

fn blank_row(col_count: usize) -> String {
    format!("|{}|", vec!["   "; col_count].join("|"))
}

fn separator_row(col_count: usize) -> String {
    format!("|{}|", vec!["---"; col_count].join("|"))
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
