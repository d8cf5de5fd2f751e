//! Table reconstruction stages.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::parser::parse_table;
use crate::render::{render_grid_table, render_pipe_table};

static DIRECTIVE_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\(:table[^:]*:\)(.*?)\(:tableend:\)").unwrap());

static PIPE_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(.*?)\|\|border=\d+[ \t]*\n((?:\|\|.*\|\|[ \t]*(?:\n|$))+)").unwrap()
});

/// Replace every `(:table:) ... (:tableend:)` region with a grid table.
/// Regions without any header or cell directive vanish.
pub fn convert_directive_tables(text: &str) -> String {
    DIRECTIVE_TABLE
        .replace_all(text, |caps: &Captures| {
            parse_table(&caps[1])
                .map(|table| render_grid_table(&table))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Replace every `||border=N` block with a grid table. Needs real newlines,
/// so it runs after line-break normalization.
pub fn convert_pipe_tables(text: &str) -> String {
    PIPE_TABLE
        .replace_all(text, |caps: &Captures| {
            let content = &caps[2];
            let rows: Vec<&str> = content
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .collect();

            let mut table = render_pipe_table(&caps[1], &rows);
            if content.ends_with('\n') {
                table.push('\n');
            }
            table
        })
        .into_owned()
}
