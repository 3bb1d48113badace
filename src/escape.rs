//! HTML escaping that preserves ANSI color spans and indentation.
//!
//! Log text arrives with raw ANSI escape sequences from the evaluation
//! harness. The escaper turns the known color codes into `<span>` tags with
//! CSS classes, escapes everything else for safe embedding in markup, and
//! rewrites leading whitespace so indentation survives HTML rendering.

use regex::Regex;

/// The closed color palette the evaluation harness emits.
///
/// Deliberately not a general ANSI interpreter: sequences outside this set
/// (plus the reset code) pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl AnsiColor {
    pub const ALL: [AnsiColor; 4] = [
        AnsiColor::Blue,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
    ];

    fn sequence(self) -> &'static str {
        match self {
            AnsiColor::Blue => "\u{1b}[34m",
            AnsiColor::Red => "\u{1b}[31m",
            AnsiColor::Green => "\u{1b}[32m",
            AnsiColor::Yellow => "\u{1b}[33m",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            AnsiColor::Blue => "ansi-blue",
            AnsiColor::Red => "ansi-red",
            AnsiColor::Green => "ansi-green",
            AnsiColor::Yellow => "ansi-yellow",
        }
    }
}

const ANSI_RESET: &str = "\u{1b}[0m";
const SPAN_CLOSE_TOKEN: &str = "___SPAN_CLOSE___";

/// Escapes a raw log string to HTML-safe output while preserving ANSI colors.
///
/// Total: never fails, empty input maps to the empty string. The step order
/// matters — the span tags inserted for colors must be shielded from the
/// entity escaping, and only leading runs of spaces become `&nbsp;` so
/// normal text still wraps.
pub fn escape(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let colorized = ansi_to_html(raw);
    let (protected, span_tags) = protect_span_tags(&colorized);
    let escaped = escape_body(&protected);
    let restored = restore_span_tags(&escaped, &span_tags);
    convert_whitespace(&restored)
}

/// Converts the fixed ANSI palette to `<span>` tags with CSS classes.
pub fn ansi_to_html(text: &str) -> String {
    let mut out = text.to_string();
    for color in AnsiColor::ALL {
        out = out.replace(
            color.sequence(),
            &format!("<span class='{}'>", color.css_class()),
        );
    }
    out.replace(ANSI_RESET, "</span>")
}

/// Swaps every span tag for a placeholder that survives entity escaping.
/// Open tags are indexed so simultaneous colors restore in order; close
/// tags are content-free and share one token.
fn protect_span_tags(input: &str) -> (String, Vec<String>) {
    let open_tag = Regex::new("<span[^>]*>").unwrap();
    let mut tags = Vec::new();
    let protected = open_tag
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let token = format!("___SPAN_OPEN_{}___", tags.len());
            tags.push(caps[0].to_string());
            token
        })
        .replace("</span>", SPAN_CLOSE_TOKEN);
    (protected, tags)
}

fn restore_span_tags(input: &str, tags: &[String]) -> String {
    let mut out = input.to_string();
    for (i, tag) in tags.iter().enumerate() {
        out = out.replace(&format!("___SPAN_OPEN_{i}___"), tag);
    }
    out.replace(SPAN_CLOSE_TOKEN, "</span>")
}

/// Escapes the characters unsafe in markup body text. Ampersand first, so
/// the entities produced for `<` and `>` are not themselves re-escaped.
fn escape_body(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\t', "&nbsp;&nbsp;&nbsp;&nbsp;")
}

/// Rewrites leading runs of spaces as `&nbsp;` one-for-one, then turns
/// newlines into `<br>`.
fn convert_whitespace(input: &str) -> String {
    let leading_spaces = Regex::new(r"(?m)^( +)").unwrap();
    leading_spaces
        .replace_all(input, |caps: &regex::Captures<'_>| {
            caps[1].replace(' ', "&nbsp;")
        })
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_maps_to_empty_output() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn body_characters_are_escaped() {
        assert_eq!(escape("a&b<c>d"), "a&amp;b&lt;c&gt;d");
    }

    #[test]
    fn ampersand_is_escaped_before_angle_brackets() {
        // A pre-existing entity must not end up double-escaped into
        // something containing a literal '<'.
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn tab_becomes_four_nbsp() {
        assert_eq!(escape("\tx"), "&nbsp;&nbsp;&nbsp;&nbsp;x");
    }

    #[test]
    fn known_ansi_codes_become_spans() {
        let out = escape("\u{1b}[31merror\u{1b}[0m");
        assert_eq!(out, "<span class='ansi-red'>error</span>");
    }

    #[test]
    fn all_palette_colors_map_to_their_class() {
        for (color, class) in [
            (AnsiColor::Blue, "ansi-blue"),
            (AnsiColor::Red, "ansi-red"),
            (AnsiColor::Green, "ansi-green"),
            (AnsiColor::Yellow, "ansi-yellow"),
        ] {
            let raw = format!("{}x{}", color.sequence(), ANSI_RESET);
            assert_eq!(escape(&raw), format!("<span class='{class}'>x</span>"));
        }
    }

    #[test]
    fn unknown_ansi_codes_pass_through_escaped() {
        // Bold (ESC[1m) is outside the palette; the escape byte survives
        // literally, only the unsafe characters around it are escaped.
        let out = escape("\u{1b}[1mbold<");
        assert_eq!(out, "\u{1b}[1mbold&lt;");
    }

    #[test]
    fn span_content_is_still_entity_escaped() {
        let out = escape("\u{1b}[32m<ok>\u{1b}[0m");
        assert_eq!(out, "<span class='ansi-green'>&lt;ok&gt;</span>");
    }

    #[test]
    fn multiple_colors_restore_in_order() {
        let raw = format!(
            "{}a{} {}b{}",
            AnsiColor::Blue.sequence(),
            ANSI_RESET,
            AnsiColor::Yellow.sequence(),
            ANSI_RESET
        );
        assert_eq!(
            escape(&raw),
            "<span class='ansi-blue'>a</span> <span class='ansi-yellow'>b</span>"
        );
    }

    #[test]
    fn leading_spaces_become_nbsp_interior_spaces_survive() {
        assert_eq!(escape("  a b"), "&nbsp;&nbsp;a b");
    }

    #[test]
    fn indentation_is_preserved_per_line() {
        assert_eq!(escape("x\n   y z"), "x<br>&nbsp;&nbsp;&nbsp;y z");
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(escape("a\nb\n"), "a<br>b<br>");
    }

    proptest! {
        #[test]
        fn escaping_is_deterministic(s in ".*") {
            prop_assert_eq!(escape(&s), escape(&s));
        }

        #[test]
        fn color_spans_always_balance(chunks in proptest::collection::vec(
            prop_oneof![
                Just("\u{1b}[31m".to_string()),
                Just("\u{1b}[34m".to_string()),
                Just("\u{1b}[0m".to_string()),
                "[a-z <>&]{0,8}",
            ],
            0..12,
        )) {
            // Every open tag the escaper emits comes from a palette code and
            // every close from a reset, so counts must match the input codes.
            let raw: String = chunks.concat();
            let out = escape(&raw);
            let opens = out.matches("<span class='").count();
            let closes = out.matches("</span>").count();
            let raw_opens = raw.matches("\u{1b}[31m").count() + raw.matches("\u{1b}[34m").count();
            let raw_closes = raw.matches("\u{1b}[0m").count();
            prop_assert_eq!(opens, raw_opens);
            prop_assert_eq!(closes, raw_closes);
        }
    }
}
