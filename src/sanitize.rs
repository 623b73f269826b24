use htmlentity::entity::{ICodedDataTrait, decode};
use once_cell::sync::Lazy;
use regex::Regex;

/// Tags dropped from the content; whatever they enclose is kept and scanned.
pub const REMOVABLE_TAGS: &[&str] = &[
    "div", "span", "font", "html", "body", "head", "meta", "title", "link", "script", "style",
];

/// Attribute names stripped from every tag. A trailing `-` matches the whole prefix family.
pub const STRIPPED_ATTRIBUTES: &[&str] = &["style", "class", "id", "data-"];

/// Literal rewrites applied before any pattern runs.
pub const TAG_SYNONYMS: &[(&str, &str)] = &[
    ("<strong>", "<b>"),
    ("</strong>", "</b>"),
    ("<em>", "<i>"),
    ("</em>", "</i>"),
];

static RE_REMOVABLE: Lazy<Regex> = Lazy::new(|| {
    let names = REMOVABLE_TAGS.join("|");
    Regex::new(&format!(r"(?is)</?(?:{names})[^>]*>")).unwrap()
});

static RE_ATTRIBUTES: Lazy<Regex> = Lazy::new(|| {
    let names = STRIPPED_ATTRIBUTES
        .iter()
        .map(|name| match name.strip_suffix('-') {
            Some(prefix) => format!("{prefix}-[^=]+"),
            None => (*name).to_string(),
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r#"(?is)\s+(?:{names})="[^"]*""#)).unwrap()
});

static RE_TAG_WITH_ATTRIBUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?\w+)[^>]*>").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br>").unwrap());
static RE_SPACED_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n *").unwrap());

/// Normalize raw rich-text input down to the markup subset the extractor understands.
///
/// Blank input comes back untouched.
pub fn sanitize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return raw.to_string();
    }

    let mut html = raw.to_string();
    for (from, to) in TAG_SYNONYMS {
        html = html.replace(from, to);
    }

    let html = RE_REMOVABLE.replace_all(&html, "");
    let html = RE_ATTRIBUTES.replace_all(&html, "");

    html.trim().to_string()
}

/// Reduce a block's inner markup to its text, keeping bare inline tags for the
/// formatting pass.
///
/// `<br>` variants become newlines; every other whitespace run collapses to
/// one space.
pub fn strip(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return String::new();
    }

    let decoded = decode_entities(fragment);
    let text = RE_REMOVABLE.replace_all(&decoded, "");
    // `<br />` and `<br/>` collapse to `<br>` here
    let text = RE_TAG_WITH_ATTRIBUTES.replace_all(&text, "<$1>");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    let text = RE_LINE_BREAK.replace_all(&text, "\n");
    let text = RE_SPACED_NEWLINE.replace_all(&text, "\n");

    text.trim().to_string()
}

fn decode_entities(fragment: &str) -> String {
    match decode(fragment.as_bytes()).to_string() {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!("entity decoding skipped: {e}");
            fragment.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize, strip};

    #[test]
    fn blank_input_is_returned_unchanged() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n"), "   \n");
    }

    #[test]
    fn normalizes_tag_synonyms() {
        assert_eq!(
            sanitize("<p><strong>a</strong> <em>b</em></p>"),
            "<p><b>a</b> <i>b</i></p>"
        );
    }

    #[test]
    fn removes_container_tags_but_keeps_content() {
        assert_eq!(
            sanitize(r#"<div class="x"><span style="color:red">hola</span></div>"#),
            "hola"
        );
        assert_eq!(
            sanitize("<html><body><p>texto</p></body></html>"),
            "<p>texto</p>"
        );
    }

    #[test]
    fn removes_document_level_tags_but_keeps_their_text() {
        assert_eq!(
            sanitize("<script>x</script><style>y</style><title>t</title>"),
            "xyt"
        );
        assert_eq!(
            sanitize(r#"<head><meta charset="utf-8"><link rel="x"></head><p>cuerpo</p>"#),
            "<p>cuerpo</p>"
        );
    }

    #[test]
    fn strips_presentation_attributes() {
        assert_eq!(
            sanitize(r#"<p style="margin:0" id="p1" data-line="3" align="left">x</p>"#),
            r#"<p align="left">x</p>"#
        );
        assert_eq!(
            sanitize(r#"<li CLASS="item">x</li>"#),
            "<li>x</li>"
        );
    }

    #[test]
    fn strip_decodes_entities() {
        assert_eq!(strip("Salud &amp; Transporte"), "Salud & Transporte");
        assert_eq!(strip("a&nbsp;b"), "a b");
    }

    #[test]
    fn strip_turns_line_breaks_into_newlines() {
        assert_eq!(strip("uno<br>dos<br/>tres<br />cuatro"), "uno\ndos\ntres\ncuatro");
        assert_eq!(strip("uno <br> dos"), "uno\ndos");
    }

    #[test]
    fn strip_collapses_source_whitespace() {
        assert_eq!(strip("  uno\n   dos\t tres  "), "uno dos tres");
    }

    #[test]
    fn strip_keeps_inline_tags_without_attributes() {
        assert_eq!(
            strip(r#"<b title="t">x</b> <span>y</span> <u >z</u >"#),
            "<b>x</b> y <u>z</u>"
        );
    }

    #[test]
    fn strip_of_blank_is_empty() {
        assert_eq!(strip(" \n "), "");
    }
}
