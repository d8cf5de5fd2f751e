//! # pmwiki2md
//!
//! Migration of PmWiki page records to Markdown.
//!
//! This library reads the `key=value` page records PmWiki keeps in its
//! `wiki.d` directory, converts the page markup to Markdown and writes one
//! file per page into per-site directories.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pmwiki2md::{parse_file, render, ConvertOptions, WriteOptions};
//!
//! fn main() -> pmwiki2md::Result<()> {
//!     // Read a page record
//!     let record = parse_file("wiki.d/Main.HomePage")?;
//!
//!     // Convert and write it to out/Main/HomePage.md
//!     let path = render::write_page(
//!         "out".as_ref(),
//!         &record,
//!         &ConvertOptions::default(),
//!         &WriteOptions::default(),
//!     )?;
//!     println!("{}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Directive tables**: `(:table:)` head/cell streams rebuilt as grid tables
//! - **Emphasis pairing**: unbalanced, multi-line `'''` and `''` spans
//! - **Paragraph reflow**: `<br>` markers for visually broken paragraphs
//! - **Front matter**: title, site, author and timestamps as YAML
//! - **Parallel processing**: Uses Rayon for whole directories

pub mod batch;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{convert_directory, convert_file, BatchReport};
pub use convert::{to_markdown, ConversionPipeline, ConvertOptions, Stage};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_page_record, PageFormat};
pub use error::{Error, Result};
pub use model::{DirectiveTable, GridRow, LineRole, PageMetadata, PageRecord};
pub use parser::RecordParser;
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, WriteOptions};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a page record file.
///
/// # Example
///
/// ```no_run
/// use pmwiki2md::parse_file;
///
/// let record = parse_file("wiki.d/Main.HomePage").unwrap();
/// println!("{} / {}", record.metadata.site, record.metadata.page);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PageRecord> {
    RecordParser::open(path)?.parse()
}

/// Parse a page record from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<PageRecord> {
    RecordParser::from_bytes(data)?.parse()
}

/// Parse a page record from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<PageRecord> {
    RecordParser::from_reader(reader)?.parse()
}

/// Parse page record text. The version header is not required.
///
/// # Example
///
/// ```
/// use pmwiki2md::parse_record;
///
/// let record = parse_record("name=Main.HomePage\ntext=!Welcome\n").unwrap();
/// assert_eq!(record.metadata.site, "Main");
/// assert_eq!(record.body, "!Welcome");
/// ```
pub fn parse_record(text: &str) -> Result<PageRecord> {
    RecordParser::from_text(text).parse()
}

/// Convert a page record file to a Markdown body (no front matter).
pub fn file_to_markdown<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<String> {
    let record = parse_file(path)?;
    Ok(to_markdown(&record.body, options))
}

/// Builder for parsing and converting page records.
///
/// # Example
///
/// ```no_run
/// use pmwiki2md::WikiConverter;
///
/// let markdown = WikiConverter::new()
///     .prefer_webp()
///     .without_frontmatter()
///     .parse("wiki.d/Main.HomePage")?
///     .to_markdown();
/// # Ok::<(), pmwiki2md::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WikiConverter {
    convert_options: ConvertOptions,
    write_options: WriteOptions,
}

impl WikiConverter {
    /// Create a new converter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite raster image references to webp.
    pub fn prefer_webp(mut self) -> Self {
        self.convert_options = self.convert_options.with_webp_images(true);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.convert_options = self.convert_options.with_cleanup_preset(preset);
        self
    }

    /// Set conversion options.
    pub fn with_convert_options(mut self, options: ConvertOptions) -> Self {
        self.convert_options = options;
        self
    }

    /// Omit front matter from rendered pages.
    pub fn without_frontmatter(mut self) -> Self {
        self.write_options = self.write_options.with_frontmatter(false);
        self
    }

    /// Set the output file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.write_options = self.write_options.with_extension(extension);
        self
    }

    /// Parse and convert a page record file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<ConvertedPage> {
        let record = parse_file(path)?;
        Ok(self.convert(record))
    }

    /// Parse and convert a page record from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<ConvertedPage> {
        let record = parse_bytes(data)?;
        Ok(self.convert(record))
    }

    /// Convert an already parsed record.
    pub fn convert(self, record: PageRecord) -> ConvertedPage {
        let markdown = to_markdown(&record.body, &self.convert_options);
        ConvertedPage {
            record,
            markdown,
            write_options: self.write_options,
        }
    }

    /// Convert a whole directory of page records.
    pub fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport> {
        batch::convert_directory(
            input_dir,
            output_dir,
            &self.convert_options,
            &self.write_options,
        )
    }
}

/// A converted page.
#[derive(Debug, Clone)]
pub struct ConvertedPage {
    /// The source record
    pub record: PageRecord,
    /// Converted Markdown body
    markdown: String,
    write_options: WriteOptions,
}

impl ConvertedPage {
    /// Converted body without front matter.
    pub fn to_markdown(&self) -> String {
        self.markdown.clone()
    }

    /// Full page as written to disk.
    pub fn to_page(&self) -> String {
        render::compose_page(&self.record.metadata, &self.markdown, &self.write_options)
    }

    /// Page metadata as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.record.metadata, format)
    }

    /// Write the page below `root`, returning the written path.
    pub fn write_to<P: AsRef<Path>>(&self, root: P) -> Result<PathBuf> {
        render::write_rendered(
            root.as_ref(),
            &self.record.metadata,
            &self.to_page(),
            &self.write_options,
        )
    }

    /// Get the page metadata.
    pub fn metadata(&self) -> &PageMetadata {
        &self.record.metadata
    }
}
