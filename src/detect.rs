//! PmWiki page record detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Page record format information, taken from the `version=` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFormat {
    /// PmWiki version that wrote the record (e.g., "2.2.130")
    pub version: String,
    /// Whether field values are urlencoded (`urlencoded=1`)
    pub urlencoded: bool,
}

impl std::fmt::Display for PageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PmWiki {}", self.version)
    }
}

/// Every page record starts with this prefix.
const RECORD_MAGIC: &[u8] = b"version=pmwiki-";
/// Bytes read from a file when sniffing its header line.
const HEADER_PROBE_LEN: u64 = 256;

/// Detect the record format from a file path.
///
/// # Example
/// ```no_run
/// use pmwiki2md::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("wiki.d/Main.HomePage").unwrap();
/// println!("Written by {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PageFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN as usize);
    BufReader::new(file)
        .take(HEADER_PROBE_LEN)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the record format from the leading bytes of a record.
///
/// # Returns
/// * `Ok(PageFormat)` if the data starts with a PmWiki version header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PageFormat> {
    if !data.starts_with(RECORD_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let line_end = data
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(data.len());
    let header = String::from_utf8_lossy(&data[RECORD_MAGIC.len()..line_end]);

    let mut words = header.split_whitespace();
    let version = words.next().unwrap_or_default().to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnknownFormat);
    }
    let urlencoded = words.any(|w| w == "urlencoded=1");

    Ok(PageFormat {
        version,
        urlencoded,
    })
}

/// Versions look like `2.2.130` or `2.3.0-beta`.
fn is_valid_version(version: &str) -> bool {
    version
        .split('.')
        .next()
        .map(|major| !major.is_empty() && major.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Check if a file is a PmWiki page record.
pub fn is_page_record<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start like a PmWiki page record.
pub fn is_page_record_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
