//! Page record parser.
//!
//! A record is a sequence of `key=value` lines. Only the current revision's
//! fields are of interest; history entries (`diff:...`, `author:...`) have
//! their own keys and are never confused with them.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{PageMetadata, PageRecord};

/// Page record parser.
pub struct RecordParser {
    fields: HashMap<String, String>,
    fallback_name: Option<String>,
}

impl RecordParser {
    /// Open a record file.
    ///
    /// The file name doubles as the page name when the record lacks a
    /// `name=` field, which is how PmWiki names its `wiki.d` files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut parser = Self::from_bytes(&data)?;
        parser.fallback_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string());
        Ok(parser)
    }

    /// Parse a record from bytes. The bytes must start with a version header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::InvalidRecord(format!("record is not valid UTF-8: {}", e)))?;
        Ok(Self::from_text(text))
    }

    /// Parse a record from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse record text without checking the version header.
    pub fn from_text(text: &str) -> Self {
        let mut fields = HashMap::new();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            fields
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self {
            fields,
            fallback_name: None,
        }
    }

    /// Get a raw field value.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Build the page record.
    pub fn parse(&self) -> Result<PageRecord> {
        let name = self
            .field("name")
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback_name.clone())
            .ok_or_else(|| Error::InvalidRecord("missing name field".into()))?;

        let body = self
            .field("text")
            .ok_or_else(|| Error::NoContent(name.clone()))?;

        let mut metadata = PageMetadata::from_name(&name);
        if let Some(title) = self.field("title").filter(|t| !t.trim().is_empty()) {
            metadata.title = title.trim().to_string();
        }
        metadata.author = self
            .field("author")
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        metadata.created = self.timestamp("ctime")?;
        metadata.updated = self.timestamp("time")?;

        log::debug!(
            "Parsed record {} ({} bytes of body)",
            metadata.name,
            body.len()
        );

        Ok(PageRecord::new(metadata, body))
    }

    fn timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.field(key).map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let seconds: i64 = raw
            .parse()
            .map_err(|_| Error::InvalidTimestamp(format!("{}={}", key, raw)))?;
        DateTime::from_timestamp(seconds, 0)
            .map(Some)
            .ok_or_else(|| Error::InvalidTimestamp(format!("{}={}", key, raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "version=pmwiki-2.2.130 ordered=1 urlencoded=1
author=Abel
charset=UTF-8
ctime=1600000000
name=MyrinSankarit.Alvan-Orm
rev=12
text=!Alvan Orm%0a'''HP''' 75/99
time=1700000000
author:1700000000=Abel
diff:1700000000:1600000000:=old text
";

    #[test]
    fn test_parse_record() {
        let record = RecordParser::from_bytes(RECORD.as_bytes())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(record.metadata.site, "MyrinSankarit");
        assert_eq!(record.metadata.page, "Alvan-Orm");
        assert_eq!(record.metadata.author.as_deref(), Some("Abel"));
        assert_eq!(record.body, "!Alvan Orm%0a'''HP''' 75/99");
        assert_eq!(
            record.metadata.created.unwrap().timestamp(),
            1_600_000_000
        );
        assert_eq!(
            record.metadata.updated.unwrap().timestamp(),
            1_700_000_000
        );
    }

    #[test]
    fn test_history_lines_do_not_shadow_fields() {
        let parser = RecordParser::from_text(RECORD);
        assert_eq!(parser.field("author"), Some("Abel"));
        assert_eq!(parser.field("diff:1700000000:1600000000:"), Some("old text"));
    }

    #[test]
    fn test_missing_text_is_no_content() {
        let parser = RecordParser::from_text("version=pmwiki-2.2.0\nname=Main.Empty\n");
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, Error::NoContent(ref name) if name == "Main.Empty"));
    }

    #[test]
    fn test_missing_name() {
        let parser = RecordParser::from_text("version=pmwiki-2.2.0\ntext=hello\n");
        assert!(matches!(parser.parse(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_invalid_timestamp() {
        let parser =
            RecordParser::from_text("name=Main.A\ntext=x\nctime=yesterday\n");
        assert!(matches!(parser.parse(), Err(Error::InvalidTimestamp(_))));
    }

    #[test]
    fn test_explicit_title() {
        let parser = RecordParser::from_text("name=Main.A\ntitle=Front Page\ntext=x\n");
        let record = parser.parse().unwrap();
        assert_eq!(record.metadata.title, "Front Page");
    }

    #[test]
    fn test_from_bytes_rejects_unknown_format() {
        let result = RecordParser::from_bytes(b"name=Main.A\ntext=x\n");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
