//! Structural roles of converted Markdown lines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[*+-]\s|\d+\.\s)").expect("list item regex"));
static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-{3,}$").expect("horizontal rule regex"));

/// What a single line of converted output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineRole {
    /// Empty or whitespace only
    Empty,
    /// `#` heading
    Heading,
    /// Bullet or numbered list item
    ListItem,
    /// Anything containing a pipe
    TableRow,
    /// Horizontal rule or front matter fence
    Rule,
    /// Fenced or indented code
    Code,
    /// Block quote
    Quote,
    /// A line that is a single HTML element
    Html,
    /// Running text
    Plain,
}

impl LineRole {
    /// Classify one line. Total: anything unrecognized is `Plain`.
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineRole::Empty;
        }
        if trimmed.starts_with('#') {
            return LineRole::Heading;
        }
        if is_list_item(line) {
            return LineRole::ListItem;
        }
        if trimmed.contains('|') {
            return LineRole::TableRow;
        }
        if HORIZONTAL_RULE.is_match(trimmed) {
            return LineRole::Rule;
        }
        if trimmed.starts_with("```") || line.starts_with("    ") {
            return LineRole::Code;
        }
        if trimmed.starts_with('>') {
            return LineRole::Quote;
        }
        if trimmed.starts_with('<') && trimmed.ends_with('>') {
            return LineRole::Html;
        }
        if trimmed.starts_with("---") {
            return LineRole::Rule;
        }
        LineRole::Plain
    }

    /// Running text is the only role that takes part in reflow.
    pub fn is_plain(self) -> bool {
        self == LineRole::Plain
    }
}

/// `* item`, `- item`, `+ item` or `1. item`, optionally indented.
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}
