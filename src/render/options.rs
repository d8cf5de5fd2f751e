//! Output options for written pages.

/// Options for writing converted pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Include YAML frontmatter with page metadata
    pub include_frontmatter: bool,

    /// File extension of written pages, without the dot
    pub extension: String,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or omit the YAML frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the output file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: true,
            extension: "md".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_options_builder() {
        let options = WriteOptions::new()
            .with_frontmatter(false)
            .with_extension(".markdown");

        assert!(!options.include_frontmatter);
        assert_eq!(options.extension, "markdown");
    }

    #[test]
    fn test_write_options_defaults() {
        let options = WriteOptions::default();
        assert!(options.include_frontmatter);
        assert_eq!(options.extension, "md");
    }
}
