//! Plain-text extraction from storefront HTML fragments.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>").expect("valid script/style regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"));

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Decodes the handful of entities storefronts actually emit.
pub(crate) fn decode_html(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&oslash;", "ø")
        .replace("&Oslash;", "Ø")
        .replace("&aelig;", "æ")
        .replace("&AElig;", "Æ")
        .replace("&aring;", "å")
        .replace("&Aring;", "Å")
        .replace("&eacute;", "é")
        .replace("&#8211;", "–")
        .replace("&ndash;", "–")
        .replace("&amp;", "&")
}

/// Drops scripts, styles and tags, decodes entities and collapses whitespace.
pub(crate) fn strip_html(fragment: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(fragment, " ");
    let without_tags = TAG_RE.replace_all(&without_scripts, " ");
    let decoded = decode_html(&without_tags);
    WS_RE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            strip_html("<p>Crown <b>Zenith</b></p>\n<ul><li>10 boosters</li></ul>"),
            "Crown Zenith 10 boosters"
        );
    }

    #[test]
    fn drops_script_and_style_bodies() {
        let html = "<style>.x{color:red}</style>Pris<script>var p = '1,00 DKK';</script> 499,95 DKK";
        assert_eq!(strip_html(html), "Pris 499,95 DKK");
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(decode_html("S&amp;V 151 &ndash; P&aring; lager"), "S&V 151 – På lager");
        assert_eq!(decode_html("Pok&eacute;mon&nbsp;TCG"), "Pokémon TCG");
    }

    #[test]
    fn amp_is_decoded_last() {
        assert_eq!(decode_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn empty_input() {
        assert_eq!(strip_html(""), "");
    }
}
