//! Fixed-order conversion pipeline.

use crate::render::CleanupPipeline;

use super::emphasis::resolve_emphasis;
use super::rules;
use super::tables::{convert_directive_tables, convert_pipe_tables};
use super::ConvertOptions;

/// A single conversion stage.
///
/// Every stage consumes the whole output of the previous one. Order matters:
/// tables are rebuilt before emphasis so directive syntax is never read as a
/// delimiter, line breaks are decoded before emphasis so span trimming sees
/// real lines, and post-processing runs last on the final line shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NormalizeUnicode,
    DirectiveTables,
    LineBreaks,
    PipeTables,
    SectionMarkers,
    WikiStyles,
    DecodeEscapes,
    Emphasis,
    SmallText,
    UserTags,
    WikiLinks,
    Lists,
    Headings,
    BoldMarkup,
    ImageLinks,
    HorizontalRules,
    BlockQuotes,
    RevealedEmphasis,
    PostProcess,
}

impl Stage {
    /// All stages in execution order.
    pub const ORDER: [Stage; 19] = [
        Stage::NormalizeUnicode,
        Stage::DirectiveTables,
        Stage::LineBreaks,
        Stage::PipeTables,
        Stage::SectionMarkers,
        Stage::WikiStyles,
        Stage::DecodeEscapes,
        Stage::Emphasis,
        Stage::SmallText,
        Stage::UserTags,
        Stage::WikiLinks,
        Stage::Lists,
        Stage::Headings,
        Stage::BoldMarkup,
        Stage::ImageLinks,
        Stage::HorizontalRules,
        Stage::BlockQuotes,
        Stage::RevealedEmphasis,
        Stage::PostProcess,
    ];

    /// Stage name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Stage::NormalizeUnicode => "normalize-unicode",
            Stage::DirectiveTables => "directive-tables",
            Stage::LineBreaks => "line-breaks",
            Stage::PipeTables => "pipe-tables",
            Stage::SectionMarkers => "section-markers",
            Stage::WikiStyles => "wiki-styles",
            Stage::DecodeEscapes => "decode-escapes",
            Stage::Emphasis => "emphasis",
            Stage::SmallText => "small-text",
            Stage::UserTags => "user-tags",
            Stage::WikiLinks => "wikilinks",
            Stage::Lists => "lists",
            Stage::Headings => "headings",
            Stage::BoldMarkup => "bold-markup",
            Stage::ImageLinks => "image-links",
            Stage::HorizontalRules => "horizontal-rules",
            Stage::BlockQuotes => "block-quotes",
            Stage::RevealedEmphasis => "revealed-emphasis",
            Stage::PostProcess => "post-process",
        }
    }

    /// Run this stage over a full document.
    pub fn apply(self, text: &str, options: &ConvertOptions) -> String {
        match self {
            Stage::NormalizeUnicode => CleanupPipeline::new(options.cleanup.clone()).normalize(text),
            Stage::DirectiveTables => convert_directive_tables(text),
            Stage::LineBreaks => rules::convert_line_breaks(text),
            Stage::PipeTables => convert_pipe_tables(text),
            Stage::SectionMarkers => rules::clean_section_markers(text),
            Stage::WikiStyles => rules::strip_wiki_styles(text),
            Stage::DecodeEscapes => rules::decode_escapes(text),
            Stage::Emphasis | Stage::RevealedEmphasis => resolve_emphasis(text),
            Stage::SmallText => rules::convert_small_text(text),
            Stage::UserTags => rules::convert_user_tags(text),
            Stage::WikiLinks => rules::convert_wikilinks(text),
            Stage::Lists => rules::convert_lists(text),
            Stage::Headings => rules::convert_headings(text),
            Stage::BoldMarkup => rules::convert_bold_markup(text),
            Stage::ImageLinks => rules::convert_image_links(text, options),
            Stage::HorizontalRules => rules::convert_horizontal_rules(text),
            Stage::BlockQuotes => rules::convert_block_quotes(text),
            Stage::PostProcess => CleanupPipeline::new(options.cleanup.clone()).process(text),
        }
    }
}

/// Stateless conversion pipeline.
///
/// Holds nothing between documents; one instance can be shared across
/// threads and reused for any number of conversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionPipeline;

impl ConversionPipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Convert a page body to Markdown.
    pub fn run(&self, text: &str, options: &ConvertOptions) -> String {
        Stage::ORDER
            .iter()
            .fold(text.to_string(), |document, stage| {
                let next = stage.apply(&document, options);
                log::debug!("Stage {}: {} -> {} bytes", stage.name(), document.len(), next.len());
                next
            })
    }

    /// Run the pipeline up to and including `last`. Useful to inspect an
    /// intermediate result.
    pub fn run_until(&self, text: &str, options: &ConvertOptions, last: Stage) -> String {
        let mut document = text.to_string();
        for stage in Stage::ORDER {
            document = stage.apply(&document, options);
            if stage == last {
                break;
            }
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_load_bearing() {
        let position = |stage: Stage| Stage::ORDER.iter().position(|s| *s == stage).unwrap();
        assert!(position(Stage::DirectiveTables) < position(Stage::Emphasis));
        assert!(position(Stage::LineBreaks) < position(Stage::Emphasis));
        assert!(position(Stage::LineBreaks) < position(Stage::PipeTables));
        assert!(position(Stage::Lists) < position(Stage::BoldMarkup));
        assert!(position(Stage::SectionMarkers) < position(Stage::DecodeEscapes));
        assert!(position(Stage::WikiStyles) < position(Stage::DecodeEscapes));
        assert_eq!(Stage::ORDER.last(), Some(&Stage::PostProcess));
    }

    #[test]
    fn test_run_until() {
        let pipeline = ConversionPipeline::new();
        let text = pipeline.run_until("a%0a'''b'''", &ConvertOptions::default(), Stage::LineBreaks);
        assert_eq!(text, "a\n'''b'''");
    }

    #[test]
    fn test_escapes_decoded_after_styles() {
        let pipeline = ConversionPipeline::new();
        let text = pipeline.run_until(
            "%25red%25Hot%25%25 50%25 %3cb>",
            &ConvertOptions::default(),
            Stage::DecodeEscapes,
        );
        assert_eq!(text, "Hot 50% <b>");
    }

    #[test]
    fn test_pipeline_is_reusable() {
        let pipeline = ConversionPipeline::new();
        let options = ConvertOptions::default();
        let first = pipeline.run("!Title%0aText", &options);
        let second = pipeline.run("!Title%0aText", &options);
        assert_eq!(first, second);
        assert_eq!(first, "# Title\nText");
    }

    #[test]
    fn test_emphasis_inside_wikilink_label() {
        let options = ConvertOptions::default();
        let result = ConversionPipeline::new().run("[[Page | '''Bold''' link]]", &options);
        assert_eq!(result, "[__Bold__ link](Page)");
    }
}
