//! JSON rendering for page metadata and records.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a record, its metadata or a converted page to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageMetadata, PageRecord};

    #[test]
    fn test_to_json_pretty() {
        let mut metadata = PageMetadata::from_name("Main.HomePage");
        metadata.author = Some("Abel".to_string());
        let record = PageRecord::new(metadata, "Hello");

        let json = to_json(&record, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"site\""));
        assert!(json.contains("HomePage"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let metadata = PageMetadata::from_name("Main.HomePage");
        let json = to_json(&metadata, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"author\":null"));
    }
}
