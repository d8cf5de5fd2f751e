//! Post-processing pipeline: Unicode normalization, leading whitespace trim
//! and paragraph reflow.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{is_list_item, LineRole};

/// Marker appended to a line that continues a visually broken paragraph.
pub const LINE_BREAK: &str = "<br>";

static KEEP_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\s*\||\s*```|\s{4})").unwrap());

static TERMINAL_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?:]$").unwrap());

static DEFINITION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:__.*?__|\*\*.*?\*\*)\s*:").unwrap());

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC + leading whitespace trim + paragraph reflow
    #[default]
    Standard,
}

/// Options for normalization and post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form before conversion
    pub normalize_unicode: bool,

    /// Strip leading whitespace from lines whose indentation carries no meaning
    pub trim_leading_whitespace: bool,

    /// Mark continuation lines of broken paragraphs with `<br>`
    pub paragraph_breaks: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            trim_leading_whitespace: false,
            paragraph_breaks: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            trim_leading_whitespace: true,
            paragraph_breaks: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Post-processing pipeline applied to the converted document.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Normalize raw input before conversion.
    pub fn normalize(&self, text: &str) -> String {
        if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        }
    }

    /// Process converted text: whitespace trim, then reflow.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.trim_leading_whitespace {
            result = trim_leading_whitespace(&result);
        }

        if self.options.paragraph_breaks {
            result = add_paragraph_breaks(&result);
        }

        result
    }
}

/// Left-trim every line except list items, table rows, code fences and lines
/// indented by four or more whitespace characters.
pub fn trim_leading_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if is_list_item(line) || KEEP_INDENT.is_match(line) {
                line
            } else {
                line.trim_start()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append a line-break marker to every line that continues into the next one
/// as part of the same paragraph.
pub fn add_paragraph_breaks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut output = Vec::with_capacity(lines.len());
    let mut marked = 0usize;

    for (i, line) in lines.iter().enumerate() {
        if should_add_line_break(line, lines.get(i + 1).copied()) {
            output.push(mark_line_break(line));
            marked += 1;
        } else {
            output.push((*line).to_string());
        }
    }

    log::trace!("Reflow marked {} of {} lines", marked, lines.len());
    output.join("\n")
}

/// Decide whether `current` needs a break marker before `next`.
pub fn should_add_line_break(current: &str, next: Option<&str>) -> bool {
    let Some(next) = next else {
        return false;
    };

    if current.trim().is_empty() || next.trim().is_empty() {
        return false;
    }

    if current.ends_with('\\') || current.ends_with(LINE_BREAK) {
        return false;
    }

    if !LineRole::classify(current).is_plain() || !LineRole::classify(next).is_plain() {
        return false;
    }

    let trimmed = current.trim();
    if TERMINAL_PUNCTUATION.is_match(trimmed) && !is_definition_line(trimmed) {
        return false;
    }

    true
}

/// `__Term__:` or `**Term**:` style lines.
fn is_definition_line(trimmed: &str) -> bool {
    DEFINITION_LINE.is_match(trimmed)
}

/// Two or more trailing ASCII spaces are a forced break and give way to the
/// marker. Any other trailing whitespace is kept.
fn mark_line_break(line: &str) -> String {
    let content = line.trim_end_matches(' ');
    if line.len() - content.len() >= 2 {
        format!("{}{}", content, LINE_BREAK)
    } else {
        format!("{}{}", line, LINE_BREAK)
    }
}
