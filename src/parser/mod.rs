//! Parsing of page records and directive tables.

mod directive;
mod record;

pub use directive::{parse_table, tokenize, TableBuilder, TableToken};
pub use record::RecordParser;
