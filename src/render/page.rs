//! Page rendering and writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::{to_markdown, ConvertOptions};
use crate::error::Result;
use crate::model::{PageMetadata, PageRecord};

use super::WriteOptions;

/// Render a full output page: frontmatter (if enabled) followed by the
/// converted body and a trailing newline.
pub fn render_page(
    record: &PageRecord,
    options: &ConvertOptions,
    write_options: &WriteOptions,
) -> String {
    let body = to_markdown(&record.body, options);
    compose_page(&record.metadata, &body, write_options)
}

/// Assemble an already converted body with its frontmatter.
pub(crate) fn compose_page(
    metadata: &PageMetadata,
    body: &str,
    write_options: &WriteOptions,
) -> String {
    let mut output = String::with_capacity(body.len() + 256);
    if write_options.include_frontmatter {
        output.push_str(&metadata.to_yaml_frontmatter());
        output.push('\n');
    }
    output.push_str(body.trim_end_matches('\n'));
    output.push('\n');
    output
}

/// Location of a page under `root`: `root/<site>/<page>.<ext>`.
///
/// The site directory is omitted when the page has no group.
pub fn output_path(root: &Path, metadata: &PageMetadata, write_options: &WriteOptions) -> PathBuf {
    let mut path = root.to_path_buf();
    let site = sanitize_component(&metadata.site);
    if !site.is_empty() {
        path.push(site);
    }

    let page = sanitize_component(&metadata.page);
    let page = if page.is_empty() { "untitled".to_string() } else { page };
    path.push(format!("{}.{}", page, write_options.extension));
    path
}

/// Render a page and write it below `root`, creating directories as needed.
/// Returns the written path.
pub fn write_page(
    root: &Path,
    record: &PageRecord,
    options: &ConvertOptions,
    write_options: &WriteOptions,
) -> Result<PathBuf> {
    let content = render_page(record, options, write_options);
    write_rendered(root, &record.metadata, &content, write_options)
}

pub(crate) fn write_rendered(
    root: &Path,
    metadata: &PageMetadata,
    content: &str,
    write_options: &WriteOptions,
) -> Result<PathBuf> {
    let path = output_path(root, metadata, write_options);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}

/// Replace path separators so a name stays a single path component.
fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "." | ".." => cleaned.replace('.', "-"),
        _ => cleaned,
    }
}
