//! Conversion options.

use crate::render::{CleanupOptions, CleanupPreset};

/// Options threaded unchanged through every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Rewrite png/jpg/jpeg/gif image references to `.webp`
    pub prefer_webp_images: bool,

    /// Normalization and post-processing steps
    pub cleanup: CleanupOptions,
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable webp image references.
    pub fn with_webp_images(mut self, prefer: bool) -> Self {
        self.prefer_webp_images = prefer;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Enable or disable Unicode NFC normalization of the input.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.cleanup.normalize_unicode = normalize;
        self
    }

    /// Enable or disable paragraph line-break insertion.
    pub fn with_paragraph_breaks(mut self, enabled: bool) -> Self {
        self.cleanup.paragraph_breaks = enabled;
        self
    }
}
