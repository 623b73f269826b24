use crate::block::{Block, Document, ListMarker, Segment};
use crate::inline::segment;

/// Font size of body text, list markers and list text.
pub const BODY_SIZE: u8 = 11;

/// A run of text with the style the layout engine should paint it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub size: u8,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyledSpan {
    fn plain(text: impl Into<String>, size: u8) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    fn from_segment(segment: Segment, size: u8) -> Self {
        Self {
            text: segment.text,
            size,
            bold: segment.bold,
            italic: segment.italic,
            underline: segment.underline,
        }
    }
}

/// One stacked line of body content: spans flowing together, then bottom padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub padding_bottom: u8,
    pub spans: Vec<StyledSpan>,
}

/// Turn extracted blocks into layout instructions.
///
/// Headings are painted verbatim, bold and underlined. Paragraphs and list
/// items go through inline formatting and keep exactly the flags the user set.
pub fn render(document: &Document) -> Vec<TextBlock> {
    document
        .blocks()
        .iter()
        .filter(|block| !block.text().trim().is_empty())
        .map(render_block)
        .collect()
}

fn render_block(block: &Block) -> TextBlock {
    let spans = match block {
        Block::Heading { level, text } => vec![StyledSpan {
            text: text.clone(),
            size: heading_size(*level),
            bold: true,
            italic: false,
            underline: true,
        }],
        Block::ListItem { marker, text } => {
            let prefix = match marker {
                ListMarker::Ordinal(number) => format!("{number}. "),
                ListMarker::Bullet => "• ".to_string(),
            };
            let mut spans = vec![StyledSpan::plain(prefix, BODY_SIZE)];
            spans.extend(formatted(text));
            spans
        }
        Block::Paragraph { text } => formatted(text).collect(),
    };

    TextBlock {
        padding_bottom: padding_bottom(block),
        spans,
    }
}

fn formatted(text: &str) -> impl Iterator<Item = StyledSpan> {
    segment(text)
        .into_iter()
        .map(|segment| StyledSpan::from_segment(segment, BODY_SIZE))
}

fn heading_size(level: u8) -> u8 {
    match level {
        1 => 14,
        2 => 13,
        3 => 12,
        _ => BODY_SIZE,
    }
}

fn padding_bottom(block: &Block) -> u8 {
    match block {
        Block::ListItem { .. } => 5,
        Block::Heading { .. } => 8,
        Block::Paragraph { .. } => 10,
    }
}
