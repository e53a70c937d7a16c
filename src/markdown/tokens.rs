//! Block-level token model for the layout pipeline.

// ============================================================
// Block Tokens
// ============================================================

/// A block-level markdown token, in document reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Heading with depth 1-6 and plain text content
    Heading { depth: u8, text: String },

    /// Paragraph of plain text
    Paragraph { text: String },

    /// Ordered or unordered list
    List(List),

    /// Table with a header row and body rows
    Table(Table),

    /// Horizontal rule
    Rule,

    /// Blank vertical space with no content
    Blank,
}

impl Block {
    /// Get the kind of this block
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::List(_) => BlockKind::List,
            Block::Table(_) => BlockKind::Table,
            Block::Rule => BlockKind::Rule,
            Block::Blank => BlockKind::Blank,
        }
    }
}

/// The kind of a block token, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Paragraph,
    List,
    Table,
    Rule,
    Blank,
}

/// A list block
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Ordered lists number their items, unordered lists use a bullet glyph
    pub ordered: bool,

    /// First ordinal for ordered lists (default 1)
    pub start: u64,

    /// Items in document order
    pub items: Vec<ListItem>,
}

impl List {
    /// Create an empty unordered list
    pub fn unordered() -> Self {
        Self {
            ordered: false,
            start: 1,
            items: Vec::new(),
        }
    }

    /// Create an empty ordered list starting at the given ordinal
    pub fn ordered(start: u64) -> Self {
        Self {
            ordered: true,
            start,
            items: Vec::new(),
        }
    }
}

/// A single list item. A nested list is owned exclusively by its item.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Plain item text
    pub text: String,

    /// Nested sub-list, if any
    pub nested: Option<List>,
}

impl ListItem {
    /// Create a leaf item with no nested list
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nested: None,
        }
    }
}

/// A table block
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Header row cells
    pub header: Vec<String>,

    /// Body rows, each a sequence of cell strings
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns, taken from the widest row
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check whether the table carries any content at all
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Extract the kind sequence of a token stream
pub fn kind_sequence(blocks: &[Block]) -> Vec<BlockKind> {
    blocks.iter().map(Block::kind).collect()
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind() {
        assert_eq!(
            Block::Heading {
                depth: 1,
                text: "T".into()
            }
            .kind(),
            BlockKind::Heading
        );
        assert_eq!(Block::Rule.kind(), BlockKind::Rule);
        assert_eq!(Block::Blank.kind(), BlockKind::Blank);
        assert_eq!(Block::List(List::unordered()).kind(), BlockKind::List);
    }

    #[test]
    fn test_list_constructors() {
        let ul = List::unordered();
        assert!(!ul.ordered);
        assert_eq!(ul.start, 1);

        let ol = List::ordered(3);
        assert!(ol.ordered);
        assert_eq!(ol.start, 3);
    }

    #[test]
    fn test_table_column_count() {
        let table = Table {
            header: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "2".into(), "3".into()]],
        };
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_kind_sequence() {
        let blocks = vec![
            Block::Heading {
                depth: 1,
                text: "T".into(),
            },
            Block::Paragraph { text: "p".into() },
            Block::Rule,
        ];
        assert_eq!(
            kind_sequence(&blocks),
            vec![BlockKind::Heading, BlockKind::Paragraph, BlockKind::Rule]
        );
    }
}
