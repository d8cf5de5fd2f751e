//! Rendering of converted pages: tables, post-processing, output files.

mod cleanup;
mod json;
mod markdown;
mod options;
mod page;

pub use cleanup::{
    add_paragraph_breaks, should_add_line_break, trim_leading_whitespace, CleanupOptions,
    CleanupPipeline, CleanupPreset, LINE_BREAK,
};
pub use json::{to_json, JsonFormat};
pub use markdown::{render_grid_table, render_pipe_table};
pub use options::WriteOptions;
pub use page::{output_path, render_page, write_page};

pub(crate) use page::{compose_page, write_rendered};
