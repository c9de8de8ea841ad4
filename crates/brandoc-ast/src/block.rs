//! Block-level elements for document structure
//!
//! This module defines the structural units of a rendered report:
//! headings, paragraphs, list items, tables, callout boxes and breaks.

use serde::{Deserialize, Serialize};

use crate::color::BrandColor;
use crate::inline::{plain_text, Run};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A section heading
    Heading(Heading),
    /// The two-line cover title produced from `# First & Second`
    CoverTitle(CoverTitle),
    /// The centered cover subtitle line
    Subtitle(Vec<Run>),
    /// A paragraph of text
    Paragraph(Vec<Run>),
    /// A bullet list item
    BulletItem(Vec<Run>),
    /// A numbered list item, keeping the number written in the source
    NumberedItem { number: u32, runs: Vec<Run> },
    /// A label/value or data table
    Table(Table),
    /// A colored callout container
    Callout(Callout),
    /// A horizontal divider
    Rule,
    /// A hard page break
    PageBreak,
    /// One visual gap between content blocks
    Spacer,
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-3)
    pub level: u8,
    /// Literal heading text (not emphasis-parsed)
    pub text: String,
    /// Heading color chosen by the style rules at render time
    pub color: BrandColor,
}

/// A cover title split at its ` & ` separator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverTitle {
    /// Text before the separator, shown smaller in the accent color
    pub kicker: String,
    /// Text from the separator on (including the `&`), shown large
    pub title: String,
}

/// Table classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Two-column label/value table without a visible header row
    Info,
    /// Multi-column table with a colored header row and striped body
    Data,
}

impl TableKind {
    /// Classify a table from its header cells.
    ///
    /// Exactly two header cells, both empty, make an `Info` table;
    /// everything else is `Data`.
    pub fn classify<S: AsRef<str>>(headers: &[S]) -> Self {
        if headers.len() == 2 && headers.iter().all(|h| h.as_ref().is_empty()) {
            TableKind::Info
        } else {
            TableKind::Data
        }
    }
}

/// A single table cell: its literal text and the parsed runs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Trimmed cell text as written in the source
    pub text: String,
    /// Emphasis-parsed runs of `text`
    pub runs: Vec<Run>,
}

impl Cell {
    /// Create a cell from its text and runs
    pub fn new(text: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            text: text.into(),
            runs,
        }
    }

    /// An empty padding cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the cell has no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Classification of the table
    pub kind: TableKind,
    /// Header-row fill for `Data` tables, captured when the table appeared
    pub accent: BrandColor,
    /// Header cells (empty strings for `Info` tables)
    pub headers: Vec<Cell>,
    /// Body rows, each exactly `headers.len()` cells wide
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Number of columns
    pub fn columns(&self) -> usize {
        self.headers.len()
    }

    /// Header texts
    pub fn header_texts(&self) -> Vec<&str> {
        self.headers.iter().map(|c| c.text.as_str()).collect()
    }

    /// Texts of one body row
    pub fn row_texts(&self, index: usize) -> Option<Vec<&str>> {
        self.rows
            .get(index)
            .map(|row| row.iter().map(|c| c.text.as_str()).collect())
    }
}

/// One classified line inside a callout box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutLine {
    /// A standalone `**...**` line, delimiters removed
    Header(String),
    /// A `- ` item, marker removed
    Bullet(Vec<Run>),
    /// Any other text
    Body(Vec<Run>),
}

impl CalloutLine {
    /// Plain text of the line
    pub fn text(&self) -> String {
        match self {
            CalloutLine::Header(text) => text.clone(),
            CalloutLine::Bullet(runs) | CalloutLine::Body(runs) => plain_text(runs),
        }
    }
}

/// A callout box: one colored container
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Callout {
    /// Lines in source order
    pub lines: Vec<CalloutLine>,
}

impl Block {
    /// Short name of the block kind, used in logs and outlines
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::CoverTitle(_) => "cover-title",
            Block::Subtitle(_) => "subtitle",
            Block::Paragraph(_) => "paragraph",
            Block::BulletItem(_) => "bullet",
            Block::NumberedItem { .. } => "numbered",
            Block::Table(_) => "table",
            Block::Callout(_) => "callout",
            Block::Rule => "rule",
            Block::PageBreak => "page-break",
            Block::Spacer => "spacer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_info() {
        assert_eq!(TableKind::classify(&["", ""]), TableKind::Info);
    }

    #[test]
    fn test_classify_data() {
        assert_eq!(TableKind::classify(&["Keyword", "Volume"]), TableKind::Data);
        assert_eq!(TableKind::classify(&["", "", ""]), TableKind::Data);
        assert_eq!(TableKind::classify(&["", "Value"]), TableKind::Data);
        assert_eq!(TableKind::classify::<&str>(&[]), TableKind::Data);
    }

    #[test]
    fn test_table_texts() {
        let table = Table {
            kind: TableKind::Data,
            accent: BrandColor::Blue,
            headers: vec![Cell::new("A", vec![]), Cell::new("B", vec![])],
            rows: vec![vec![Cell::new("1", vec![]), Cell::empty()]],
        };
        assert_eq!(table.columns(), 2);
        assert_eq!(table.header_texts(), vec!["A", "B"]);
        assert_eq!(table.row_texts(0), Some(vec!["1", ""]));
        assert_eq!(table.row_texts(1), None);
    }

    #[test]
    fn test_callout_line_text() {
        let line = CalloutLine::Bullet(vec![Run::plain("one "), Run::bold("two")]);
        assert_eq!(line.text(), "one two");
        assert_eq!(CalloutLine::Header("KEY".to_string()).text(), "KEY");
    }

    #[test]
    fn test_block_serde_roundtrip() {
        let block = Block::NumberedItem {
            number: 3,
            runs: vec![Run::plain("third")],
        };
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
