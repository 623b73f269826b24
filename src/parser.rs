use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, Document, ListMarker};
use crate::sanitize::strip;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(h[1-6])[^>]*>").unwrap());
static RE_PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(p)[^>]*>").unwrap());
static RE_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(ul)[^>]*>").unwrap());
static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(ol)[^>]*>").unwrap());
static RE_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(li)[^>]*>").unwrap());

/// Extract the block elements of sanitized content HTML.
///
/// Headings come first, then paragraphs, then list items (bulleted before
/// numbered). Content without any block tags becomes a single paragraph.
pub fn extract(html: &str) -> Document {
    if html.trim().is_empty() {
        return Document::default();
    }

    let headings = extract_headings(html);
    let paragraphs = extract_paragraphs(html);
    let items = extract_list_items(html);
    tracing::debug!(
        headings = headings.len(),
        paragraphs = paragraphs.len(),
        list_items = items.len(),
        "extracted content blocks"
    );

    let mut blocks = headings;
    blocks.extend(paragraphs);
    blocks.extend(items);

    if blocks.is_empty() {
        let text = strip(html);
        if !text.trim().is_empty() {
            tracing::debug!("no block tags found, using whole content as one paragraph");
            blocks.push(Block::Paragraph { text });
        }
    }

    Document::new(blocks)
}

fn extract_headings(html: &str) -> Vec<Block> {
    paired(html, &RE_HEADING)
        .into_iter()
        .filter_map(|element| {
            let text = non_blank(element.inner)?;
            Some(Block::Heading {
                level: heading_level(element.name),
                text,
            })
        })
        .collect()
}

fn extract_paragraphs(html: &str) -> Vec<Block> {
    paired(html, &RE_PARAGRAPH)
        .into_iter()
        .filter_map(|element| non_blank(element.inner))
        .map(|text| Block::Paragraph { text })
        .collect()
}

fn extract_list_items(html: &str) -> Vec<Block> {
    let mut items = Vec::new();

    for list in paired(html, &RE_UNORDERED) {
        items.extend(
            list_texts(list.inner).map(|text| Block::ListItem {
                marker: ListMarker::Bullet,
                text,
            }),
        );
    }

    // Numbering restarts with every <ol>
    for list in paired(html, &RE_ORDERED) {
        items.extend(list_texts(list.inner).zip(1..).map(|(text, number)| Block::ListItem {
            marker: ListMarker::Ordinal(number),
            text,
        }));
    }

    items
}

fn list_texts(inner: &str) -> impl Iterator<Item = String> + '_ {
    paired(inner, &RE_ITEM)
        .into_iter()
        .filter_map(|item| non_blank(item.inner))
}

fn non_blank(inner: &str) -> Option<String> {
    let text = strip(inner);
    (!text.trim().is_empty()).then_some(text)
}

/// Level from a heading tag name such as `h3`; anything else is level 2.
fn heading_level(tag: &str) -> u8 {
    let bytes = tag.as_bytes();
    if bytes.len() == 2 && bytes[1].is_ascii_digit() {
        bytes[1] - b'0'
    } else {
        Block::DEFAULT_HEADING_LEVEL
    }
}

/// An element whose opening tag was matched by a pattern, with the content up
/// to the first closing tag of the same name.
struct Element<'a> {
    name: &'a str,
    inner: &'a str,
}

/// Leftmost, non-overlapping `<name ...>inner</name>` pairs.
///
/// `opener` must capture the tag name in group 1. Closing tags are matched
/// case-insensitively and the inner content is the shortest possible run.
fn paired<'a>(html: &'a str, opener: &Regex) -> Vec<Element<'a>> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lowered = html.to_ascii_lowercase();
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(caps) = opener.captures_at(html, pos) {
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let closer = format!("</{}>", name.as_str().to_ascii_lowercase());

        match lowered[open.end()..].find(&closer) {
            Some(offset) => {
                let inner_end = open.end() + offset;
                elements.push(Element {
                    name: name.as_str(),
                    inner: &html[open.end()..inner_end],
                });
                pos = inner_end + closer.len();
            }
            None => {
                // Retry from the next character, as a backtracking matcher would
                let next = html[open.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                pos = open.start() + next;
            }
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::{extract, heading_level};
    use crate::block::{Block, Document, ListMarker};

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    fn item(marker: ListMarker, text: &str) -> Block {
        Block::ListItem {
            marker,
            text: text.to_string(),
        }
    }

    #[test]
    fn heading_then_paragraph() {
        assert_eq!(
            extract("<h2>Title</h2><p>Body</p>").blocks(),
            [heading(2, "Title"), paragraph("Body")]
        );
    }

    #[test]
    fn headings_precede_paragraphs_regardless_of_source_order() {
        assert_eq!(
            extract("<p>P1</p><h1>H1</h1>").blocks(),
            [heading(1, "H1"), paragraph("P1")]
        );
    }

    #[test]
    fn category_major_order_with_lists() {
        let html = "<ol><li>uno</li></ol><p>texto</p><ul><li>punto</li></ul><h3>Sub</h3>";
        assert_eq!(
            extract(html).blocks(),
            [
                heading(3, "Sub"),
                paragraph("texto"),
                item(ListMarker::Bullet, "punto"),
                item(ListMarker::Ordinal(1), "uno"),
            ]
        );
    }

    #[test]
    fn ordered_numbering_restarts_per_list() {
        let doc = extract("<ol><li>A</li><li>B</li></ol><ol><li>C</li></ol>");
        assert_eq!(
            doc.blocks(),
            [
                item(ListMarker::Ordinal(1), "A"),
                item(ListMarker::Ordinal(2), "B"),
                item(ListMarker::Ordinal(1), "C"),
            ]
        );
        assert!(doc.blocks().iter().all(Block::is_ordered));
    }

    #[test]
    fn blank_items_are_skipped_without_consuming_numbers() {
        assert_eq!(
            extract("<ol><li>A</li><li> </li><li>B</li></ol>").blocks(),
            [
                item(ListMarker::Ordinal(1), "A"),
                item(ListMarker::Ordinal(2), "B"),
            ]
        );
    }

    #[test]
    fn unordered_items_carry_no_number() {
        assert_eq!(
            extract("<ul><li>x</li><li>y</li></ul>").blocks(),
            [item(ListMarker::Bullet, "x"), item(ListMarker::Bullet, "y")]
        );
    }

    #[test]
    fn headings_match_their_own_closing_level() {
        assert_eq!(
            extract("<H4 class=\"t\">Cuatro</h4><h1>Uno</H1>").blocks(),
            [heading(4, "Cuatro"), heading(1, "Uno")]
        );
    }

    #[test]
    fn heading_level_falls_back_to_two() {
        assert_eq!(heading_level("h5"), 5);
        assert_eq!(heading_level("hx"), 2);
        assert_eq!(heading_level("h10"), 2);
    }

    #[test]
    fn heading_without_closer_is_not_a_heading() {
        assert_eq!(
            extract("<h1>abierto<h2>cerrado</h2>").blocks(),
            [heading(2, "cerrado")]
        );
    }

    #[test]
    fn inline_markup_survives_into_block_text() {
        assert_eq!(
            extract("<p>Hola <b>mundo</b><br>adiós</p>").blocks(),
            [paragraph("Hola <b>mundo</b>\nadiós")]
        );
    }

    #[test]
    fn block_content_may_span_lines() {
        assert_eq!(
            extract("<h3>uno\n dos</h3>\n<p>\ntres\n</p><ol>\n<li>\ncuatro</li>\n</ol>").blocks(),
            [
                heading(3, "uno dos"),
                paragraph("tres"),
                item(ListMarker::Ordinal(1), "cuatro"),
            ]
        );
    }

    #[test]
    fn blank_blocks_are_dropped() {
        assert_eq!(
            extract("<p> </p><h2></h2><p>x</p>").blocks(),
            [paragraph("x")]
        );
    }

    #[test]
    fn content_without_blocks_becomes_one_paragraph() {
        assert_eq!(extract("<div>text</div>").blocks(), [paragraph("text")]);
        assert_eq!(
            extract("solo <b>texto</b>").blocks(),
            [paragraph("solo <b>texto</b>")]
        );
    }

    #[test]
    fn blank_content_is_an_empty_document() {
        assert_eq!(extract(""), Document::default());
        assert_eq!(extract("   "), Document::default());
        assert!(extract("<div> </div>").is_empty());
    }

    #[test]
    fn extraction_is_repeatable() {
        let html = "<p>a</p><ol><li>b</li></ol>";
        assert_eq!(extract(html), extract(html));
    }
}
