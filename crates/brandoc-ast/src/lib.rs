//! brandoc-ast - Document model definitions
//!
//! This crate provides the types shared by the renderer (text to blocks)
//! and the package writer (blocks to OOXML). A [`Document`] is built once
//! per generation request and never mutated after construction.

pub mod block;
pub mod color;
pub mod document;
pub mod inline;

pub use block::{Block, Callout, CalloutLine, Cell, CoverTitle, Heading, Table, TableKind};
pub use color::BrandColor;
pub use document::{Document, DocumentMeta};
pub use inline::Run;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
