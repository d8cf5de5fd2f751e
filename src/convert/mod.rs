//! Conversion of PmWiki page bodies to Markdown.
//!
//! The conversion is a fixed sequence of [`Stage`]s run by a stateless
//! [`ConversionPipeline`]. Three stages carry real parsing state: directive
//! table reconstruction, emphasis pairing and paragraph reflow. The rest are
//! context-free substitutions.
//!
//! # Example
//!
//! ```
//! use pmwiki2md::convert::{to_markdown, ConvertOptions};
//!
//! let markdown = to_markdown("!Title%0aThis is'''bold'''", &ConvertOptions::default());
//! assert_eq!(markdown, "# Title\nThis is __bold__");
//! ```

mod emphasis;
mod options;
mod pipeline;
pub mod rules;
mod tables;

pub use emphasis::{resolve, resolve_emphasis, Emphasis};
pub use options::ConvertOptions;
pub use pipeline::{ConversionPipeline, Stage};
pub use tables::{convert_directive_tables, convert_pipe_tables};

/// Convert a page body to Markdown.
///
/// Never fails: every stage is total over arbitrary input.
pub fn to_markdown(text: &str, options: &ConvertOptions) -> String {
    ConversionPipeline::new().run(text, options)
}
