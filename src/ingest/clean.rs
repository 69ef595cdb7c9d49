// src/ingest/clean.rs
use once_cell::sync::OnceCell;
use regex::Regex;

/// Strip markup from a feed text field.
///
/// 1) every `<...>` tag becomes a single space
/// 2) HTML entities are decoded (unknown ones stay as written)
/// 3) outer whitespace is trimmed; interior spacing is kept as-is
pub fn clean_text(s: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("static tag regex"));

    let no_tags = re_tags.replace_all(s, " ");
    html_escape::decode_html_entities(&no_tags).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_become_spaces_and_entities_decode() {
        assert_eq!(
            clean_text("<b>OpenAI</b> &amp; friends"),
            "OpenAI  & friends"
        );
    }

    #[test]
    fn unknown_entities_are_left_alone() {
        assert_eq!(clean_text("a &notanentity; b"), "a &notanentity; b");
    }

    #[test]
    fn numeric_entities_decode() {
        assert_eq!(clean_text("it&#39;s &#x201C;here&#x201D;"), "it's \u{201C}here\u{201D}");
    }

    #[test]
    fn markup_only_collapses_to_empty() {
        assert_eq!(clean_text("<p></p>  <br/>"), "");
    }
}
