//! Inline emphasis resolution.
//!
//! PmWiki marks strong text with `'''` and light emphasis with `''`. Authors
//! are sloppy with the surrounding whitespace (`is'''bold'''`, `'''bold '''and`)
//! and spans run across lines, so each delimiter is rewritten to a Markdown
//! marker while the whitespace around it is normalized:
//!
//! - an opening marker gets one space before it when text precedes it, and
//!   none when it starts the text;
//! - a closing marker gets exactly one space after it;
//! - whitespace on the inner side of either marker is removed.
//!
//! Only spaces and tabs are ever trimmed, so line structure survives a span
//! that crosses a newline. An unmatched opener is left open; that is not an
//! error.

/// Emphasis kind, each resolved in its own pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// `'''text'''` → `__text__`
    Strong,
    /// `''text''` → `_text_`
    Light,
}

impl Emphasis {
    /// Wiki delimiter for this kind.
    pub fn delimiter(self) -> &'static str {
        match self {
            Emphasis::Strong => "'''",
            Emphasis::Light => "''",
        }
    }

    /// Markdown marker replacing the delimiter.
    pub fn marker(self) -> &'static str {
        match self {
            Emphasis::Strong => "__",
            Emphasis::Light => "_",
        }
    }
}

/// Resolve strong emphasis, then light emphasis on the result.
pub fn resolve_emphasis(text: &str) -> String {
    let strong = resolve(text, Emphasis::Strong);
    resolve(&strong, Emphasis::Light)
}

/// Resolve a single emphasis kind.
///
/// The text is cut at every delimiter; delimiters alternate between opening
/// and closing a span. Every segment that follows a delimiter loses its
/// leading whitespace and every segment that precedes one loses its trailing
/// whitespace. Once any delimiter was found, trailing whitespace at the very
/// end of the text is dropped as well.
pub fn resolve(text: &str, kind: Emphasis) -> String {
    let segments: Vec<&str> = text.split(kind.delimiter()).collect();
    if segments.len() == 1 {
        return text.to_string();
    }

    let last = segments.len() - 1;
    let mut output = String::with_capacity(text.len() + segments.len());
    let mut inside = false;

    for (index, segment) in segments.iter().enumerate() {
        let before = if index < last {
            trim_end_horizontal(segment)
        } else {
            segment
        };
        let piece = if index > 0 {
            trim_start_horizontal(before)
        } else {
            before
        };
        output.push_str(piece);

        if index == last {
            break;
        }

        if inside {
            output.push_str(kind.marker());
            output.push(' ');
        } else {
            if !before.is_empty() {
                output.push(' ');
            }
            output.push_str(kind.marker());
        }
        inside = !inside;
    }

    let kept = trim_end_horizontal(&output).len();
    output.truncate(kept);
    output
}

fn is_horizontal(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn trim_end_horizontal(s: &str) -> &str {
    s.trim_end_matches(is_horizontal)
}

fn trim_start_horizontal(s: &str) -> &str {
    s.trim_start_matches(is_horizontal)
}
