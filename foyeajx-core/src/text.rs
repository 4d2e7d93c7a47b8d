//! Plain-text extraction from note markup.

use regex::Regex;
use std::sync::OnceLock;

/// Reduce rich-text markup to the text a reader would see.
///
/// Line breaks and block closers become newlines, every other tag is dropped,
/// and the handful of entities the editor emits are decoded.
pub fn to_plain_text(html: &str) -> String {
    static RE_BREAK: OnceLock<Regex> = OnceLock::new();
    static RE_BLOCK_END: OnceLock<Regex> = OnceLock::new();
    static RE_TAG: OnceLock<Regex> = OnceLock::new();

    let re_break = RE_BREAK.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
    let re_block_end =
        RE_BLOCK_END.get_or_init(|| Regex::new(r"(?i)</(p|div|li|h[1-6])\s*>").unwrap());
    let re_tag = RE_TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());

    let text = re_break.replace_all(html, "\n");
    let text = re_block_end.replace_all(&text, "\n");
    let text = re_tag.replace_all(&text, "");

    // &amp; last so "&amp;lt;" stays "&lt;"
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        assert_eq!(to_plain_text("<b>bold</b> and <i>it</i>"), "bold and it");
    }

    #[test]
    fn blocks_and_breaks_become_newlines() {
        assert_eq!(to_plain_text("<div>one</div><div>two<br>three</div>"), "one\ntwo\nthree");
    }

    #[test]
    fn decodes_entities_once() {
        assert_eq!(to_plain_text("a &amp;lt; b&nbsp;&gt; c"), "a &lt; b > c");
    }
}
