//! Document root and metadata definitions

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A complete rendered document: an ordered sequence of blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document content blocks
    pub blocks: Vec<Block>,
}

/// Metadata used only for the repeating page header and footer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Display title (page header)
    pub title: String,
    /// Recipient name (page footer)
    pub recipient: String,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a block list
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Add a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate over the blocks in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl DocumentMeta {
    /// Create metadata from a title and recipient
    pub fn new(title: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            recipient: recipient.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::Run;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_document_push_block() {
        let mut doc = Document::new();
        doc.push(Block::Paragraph(vec![Run::plain("Hello")]));
        doc.push(Block::Rule);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.iter().count(), 2);
    }

    #[test]
    fn test_meta_new() {
        let meta = DocumentMeta::new("SEO Audit", "Acme Plumbing");
        assert_eq!(meta.title, "SEO Audit");
        assert_eq!(meta.recipient, "Acme Plumbing");
    }
}
