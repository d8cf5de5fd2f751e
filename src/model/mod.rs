//! Model types for page records and conversion intermediates.
//!
//! Records carry metadata and raw wiki text from the extraction side to the
//! writer; the grid table and line roles are the intermediate structures the
//! conversion pipeline reasons about.

mod line;
mod record;
mod table;

pub use line::{is_list_item, LineRole};
pub use record::{PageMetadata, PageRecord};
pub use table::{DirectiveTable, GridRow};
