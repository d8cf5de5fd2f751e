//! Context-free substitutions.
//!
//! Each rule is a pure `&str -> String` function over the whole document.
//! None of them carries state across lines except list spacing and
//! horizontal rules, which look at the neighbouring line only.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::ConvertOptions;

static INDENTED_SECTION_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\n\s+)\n>>.*?%3c%3c\n").unwrap());
static SECTION_MARKER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n>>.*?%3c%3c\n").unwrap());
static SECTION_MARKER_AT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n>>%3c%3c$").unwrap());
static SECTION_MARKER_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r">>.*?%3c%3c").unwrap());

static STYLE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"%25(.*?)%25(.*?)%25%25").unwrap());
static STYLE_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"%25(.*?)%25").unwrap());
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(:.*?:\)").unwrap());

static SMALL_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[-(.*?)-\]").unwrap());
static BOLD_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[\+(.*?)\+\]").unwrap());

static USER_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[~(.*?)\]\]").unwrap());
static USER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"~(\S*)").unwrap());
static WIKILINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\*{1,4})[ \t]*").unwrap());
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,4})[ \t]*").unwrap());
static MARKDOWN_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\*|1\.) .+").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(!{1,4})[ \t]*").unwrap());

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\(?)(https?://[^\s()]+?)\.((?i:png|jpe?g|gif|webp|svg))\b").unwrap()
});
static ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Attach:(\S+?)\.(?i:png|jpe?g|gif)\b").unwrap());

static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3,}$").unwrap());
static BLOCK_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^->[ \t]*").unwrap());

/// Alt text of converted image links.
pub const IMAGE_ALT_TEXT: &str = "a converted image link";

/// Decode encoded line breaks. `\\%0a` is a forced break and keeps two
/// trailing spaces on its line.
pub fn convert_line_breaks(text: &str) -> String {
    text.replace("\\\\%0a", "  \n").replace("%0a", "\n")
}

/// Remove `>>name%3c%3c` section markers.
pub fn clean_section_markers(text: &str) -> String {
    let result = INDENTED_SECTION_OPEN.replace_all(text, "\n${1}\n");
    let result = SECTION_MARKER_LINE.replace_all(&result, "\n");
    let result = SECTION_MARKER_AT_END.replace_all(&result, "");
    SECTION_MARKER_INLINE.replace_all(&result, "").into_owned()
}

/// Strip `%25...%25` wiki styles (keeping the styled text) and `(:...:)`
/// directives.
pub fn strip_wiki_styles(text: &str) -> String {
    let result = STYLE_SPAN.replace_all(text, "${2}");
    let result = STYLE_MARK.replace_all(&result, "");
    DIRECTIVE.replace_all(&result, "").into_owned()
}

/// Decode the `%3c` and `%25` escapes of urlencoded records. `%3c` goes
/// first so an escaped percent sign is never read as the start of another
/// escape.
pub fn decode_escapes(text: &str) -> String {
    text.replace("%3c", "<").replace("%25", "%")
}

/// `[-text-]` → small-text span.
pub fn convert_small_text(text: &str) -> String {
    SMALL_TEXT
        .replace_all(text, r#"<span class="text-small">${1}</span>"#)
        .into_owned()
}

/// `[+text+]` → `**text**`.
pub fn convert_bold_markup(text: &str) -> String {
    BOLD_MARKUP.replace_all(text, "**${1}**").into_owned()
}

/// `[[~name]]` and `~name` → `@name`.
pub fn convert_user_tags(text: &str) -> String {
    let result = USER_LINK.replace_all(text, "@${1}");
    USER_TAG.replace_all(&result, "@${1}").into_owned()
}

/// `[[Page Name]]` → `[Page Name](PageName)`, `[[Page | Text]]` → `[Text](Page)`.
pub fn convert_wikilinks(text: &str) -> String {
    WIKILINK
        .replace_all(text, |caps: &Captures| {
            let inner = &caps[1];
            let (target, label) = match inner.split_once('|') {
                Some((target, label)) => (target, label),
                None => (inner, inner),
            };
            let target: String = target.chars().filter(|c| !c.is_whitespace()).collect();
            format!("[{}]({})", label.trim(), target)
        })
        .into_owned()
}

/// Convert `*` and `#` list markers, then separate each list from a directly
/// following paragraph line with a blank line.
pub fn convert_lists(text: &str) -> String {
    let result = BULLET.replace_all(text, |caps: &Captures| {
        format!("{}* ", "  ".repeat(caps[1].len() - 1))
    });
    let result = NUMBERED.replace_all(&result, |caps: &Captures| {
        format!("{}1. ", "  ".repeat(caps[1].len() - 1))
    });

    let lines: Vec<&str> = result.split('\n').collect();
    let mut output = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        output.push(*line);
        if let Some(next) = lines.get(i + 1) {
            if MARKDOWN_LIST_ITEM.is_match(line)
                && !next.trim().is_empty()
                && !MARKDOWN_LIST_ITEM.is_match(next)
            {
                output.push("");
            }
        }
    }
    output.join("\n")
}

/// `!` to `!!!!` at line start → `#` to `####`.
pub fn convert_headings(text: &str) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| format!("{} ", "#".repeat(caps[1].len())))
        .into_owned()
}

/// Wrap bare image URLs in Markdown image syntax, optionally switching
/// raster images (and `Attach:` references) to webp.
pub fn convert_image_links(text: &str, options: &ConvertOptions) -> String {
    let result = IMAGE_URL.replace_all(text, |caps: &Captures| {
        if !caps[1].is_empty() {
            return caps[0].to_string();
        }
        let extension = image_extension(&caps[3], options);
        format!("![{}]({}.{})", IMAGE_ALT_TEXT, &caps[2], extension)
    });

    if !options.prefer_webp_images {
        return result.into_owned();
    }
    ATTACHMENT
        .replace_all(&result, "Attach:${1}.webp")
        .into_owned()
}

fn image_extension<'a>(extension: &'a str, options: &ConvertOptions) -> &'a str {
    let raster = matches!(
        extension.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "gif"
    );
    if options.prefer_webp_images && raster {
        "webp"
    } else {
        extension
    }
}

/// Normalize `----` lines to `---` with a blank line on either side.
pub fn convert_horizontal_rules(text: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut after_rule = false;

    for line in text.split('\n') {
        if HORIZONTAL_RULE.is_match(line.trim()) {
            if output.last().is_some_and(|prev| !prev.trim().is_empty()) {
                output.push("");
            }
            output.push("---");
            after_rule = true;
            continue;
        }
        if after_rule && !line.trim().is_empty() {
            output.push("");
        }
        after_rule = false;
        output.push(line);
    }
    output.join("\n")
}

/// `->` at line start → `> `.
pub fn convert_block_quotes(text: &str) -> String {
    BLOCK_QUOTE.replace_all(text, "> ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks() {
        assert_eq!(convert_line_breaks("a%0ab"), "a\nb");
        assert_eq!(convert_line_breaks("a\\\\%0ab"), "a  \nb");
    }

    #[test]
    fn test_section_markers() {
        let text = "First section\n>>aika%3c%3c\nContent 1\n>>%3c%3c\n\nSecond section";
        assert_eq!(
            clean_section_markers(text),
            "First section\nContent 1\n\nSecond section"
        );
    }

    #[test]
    fn test_section_marker_after_indented_line() {
        let text = "Some regular content\n    \n>>aika%3c%3c\n:Rating 1";
        assert_eq!(
            clean_section_markers(text),
            "Some regular content\n\n    \n:Rating 1"
        );
    }

    #[test]
    fn test_section_marker_at_end() {
        assert_eq!(clean_section_markers("Text\n>>%3c%3c"), "Text");
        assert_eq!(clean_section_markers("a >>x%3c%3c b"), "a  b");
    }

    #[test]
    fn test_strip_wiki_styles() {
        assert_eq!(
            strip_wiki_styles("%25rfloat width=234px%25ramalama and some more%25%25 text"),
            "ramalama and some more text"
        );
        assert_eq!(strip_wiki_styles("This is %25bold%25 text %25%25"), "This is  text ");
        assert_eq!(strip_wiki_styles("%25red%25warning"), "warning");
        assert_eq!(strip_wiki_styles("(:title Page:)Body(:nl:)"), "Body");
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_escapes("HP %3c 10, 50%25 chance"), "HP < 10, 50% chance");
        assert_eq!(decode_escapes("%253c"), "%3c");
        assert_eq!(decode_escapes("plain"), "plain");
    }

    #[test]
    fn test_small_text() {
        assert_eq!(
            convert_small_text("[-tiny\ntext-]"),
            "<span class=\"text-small\">tiny\ntext</span>"
        );
    }

    #[test]
    fn test_bold_markup() {
        assert_eq!(convert_bold_markup("[+Big+] deal"), "**Big** deal");
    }

    #[test]
    fn test_user_tags() {
        assert_eq!(convert_user_tags("by [[~Abel]]"), "by @Abel");
        assert_eq!(convert_user_tags("signed ~Abel"), "signed @Abel");
    }

    #[test]
    fn test_wikilinks() {
        assert_eq!(convert_wikilinks("[[Page Name]]"), "[Page Name](PageName)");
        assert_eq!(
            convert_wikilinks("see [[PageName | Link Text]]"),
            "see [Link Text](PageName)"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(convert_lists("*one\n**two"), "* one\n  * two");
        assert_eq!(convert_lists("# first\n## second"), "1. first\n  1. second");
    }

    #[test]
    fn test_list_followed_by_paragraph_gets_blank_line() {
        assert_eq!(convert_lists("* a\n* b\nText"), "* a\n* b\n\nText");
        assert_eq!(convert_lists("* a\n\nText"), "* a\n\nText");
    }

    #[test]
    fn test_headings() {
        assert_eq!(convert_headings("!Title\n!!! Sub"), "# Title\n### Sub");
        assert_eq!(convert_headings("Hello! there"), "Hello! there");
    }

    #[test]
    fn test_image_links() {
        let options = ConvertOptions::default();
        assert_eq!(
            convert_image_links("http://images.example.com/a/Pseudodragon.JPG", &options),
            "![a converted image link](http://images.example.com/a/Pseudodragon.JPG)"
        );
        assert_eq!(
            convert_image_links("see http://example.com here", &options),
            "see http://example.com here"
        );
    }

    #[test]
    fn test_image_links_inside_markdown_link_untouched() {
        let options = ConvertOptions::default();
        let text = "[pic](http://example.com/a.png)";
        assert_eq!(convert_image_links(text, &options), text);
    }

    #[test]
    fn test_image_links_webp() {
        let options = ConvertOptions::new().with_webp_images(true);
        assert_eq!(
            convert_image_links("https://x.org/a.jpeg", &options),
            "![a converted image link](https://x.org/a.webp)"
        );
        assert_eq!(
            convert_image_links("https://x.org/logo.svg", &options),
            "![a converted image link](https://x.org/logo.svg)"
        );
        assert_eq!(
            convert_image_links("Attach:map.PNG", &options),
            "Attach:map.webp"
        );
    }

    #[test]
    fn test_attachments_untouched_without_webp() {
        let options = ConvertOptions::default();
        assert_eq!(convert_image_links("Attach:map.png", &options), "Attach:map.png");
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(
            convert_horizontal_rules("Some content\n----\nMore"),
            "Some content\n\n---\n\nMore"
        );
        assert_eq!(convert_horizontal_rules("a\n\n---\n\nb"), "a\n\n---\n\nb");
    }

    #[test]
    fn test_block_quotes() {
        assert_eq!(convert_block_quotes("->quoted\n-> spaced"), "> quoted\n> spaced");
    }
}
