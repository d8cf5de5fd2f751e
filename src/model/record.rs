//! Page record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A PmWiki page record: metadata plus the raw page body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page metadata (name, site, author, timestamps)
    pub metadata: PageMetadata,

    /// Raw page body from the `text=` field, still in wiki markup
    pub body: String,
}

impl PageRecord {
    /// Create a record from metadata and body.
    pub fn new(metadata: PageMetadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Check if the page body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Page metadata used to name and annotate output files.
///
/// The conversion pipeline never looks at this; it only travels alongside
/// the body to the writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Full page name as stored in the record (e.g., "Main.HomePage")
    pub name: String,

    /// Wiki group, used as the per-site output directory
    pub site: String,

    /// Page name without the group
    pub page: String,

    /// Display title
    pub title: String,

    /// Last author
    pub author: Option<String>,

    /// Creation time (`ctime`)
    pub created: Option<DateTime<Utc>>,

    /// Last modification time (`time`)
    pub updated: Option<DateTime<Utc>>,
}

impl PageMetadata {
    /// Create metadata from a full `Group.Page` name.
    ///
    /// The title defaults to the page part of the name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let (site, page) = match name.split_once('.') {
            Some((site, page)) => (site.to_string(), page.to_string()),
            None => (String::new(), name.clone()),
        };
        Self {
            title: page.clone(),
            name,
            site,
            page,
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("title: \"{}\"", escape_yaml(&self.title)));
        lines.push(format!("site: \"{}\"", escape_yaml(&self.site)));
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref updated) = self.updated {
            lines.push(format!("updated: {}", updated.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_name_with_group() {
        let metadata = PageMetadata::from_name("MyrinSankarit.Alvan-Orm");
        assert_eq!(metadata.site, "MyrinSankarit");
        assert_eq!(metadata.page, "Alvan-Orm");
        assert_eq!(metadata.title, "Alvan-Orm");
    }

    #[test]
    fn test_from_name_without_group() {
        let metadata = PageMetadata::from_name("Orphan");
        assert_eq!(metadata.site, "");
        assert_eq!(metadata.page, "Orphan");
    }

    #[test]
    fn test_metadata_frontmatter() {
        let mut metadata = PageMetadata::from_name("Main.HomePage");
        metadata.title = "Home \"Page\"".to_string();
        metadata.author = Some("Abel".to_string());
        metadata.updated = Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap());

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Home \\\"Page\\\"\""));
        assert!(yaml.contains("site: \"Main\""));
        assert!(yaml.contains("author: \"Abel\""));
        assert!(yaml.contains("updated: 2023-11-14T22:13:20+00:00"));
        assert!(!yaml.contains("created:"));
        assert!(yaml.ends_with("---\n"));
    }

    #[test]
    fn test_record_is_empty() {
        let record = PageRecord::new(PageMetadata::from_name("Main.Blank"), "  \n");
        assert!(record.is_empty());
    }
}
