/// How a list item is introduced when laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// Item of a `<ul>` block
    Bullet,
    /// Item of an `<ol>` block, numbered from 1 within its own block
    Ordinal(u32),
}

/// Block-level elements extracted from the content HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    ListItem { marker: ListMarker, text: String },
}

impl Block {
    /// Heading level used when the tag name carries no usable digit.
    pub const DEFAULT_HEADING_LEVEL: u8 = 2;

    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::ListItem { text, .. } => {
                text
            }
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            Block::ListItem {
                marker: ListMarker::Ordinal(_),
                ..
            }
        )
    }
}

/// A run of text sharing one formatting state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Ordered blocks of one letter body.
///
/// Ordering is category-major: every heading precedes every paragraph,
/// which precedes every list item. Source order is kept within a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
