//! brandoc-core - report text to branded document blocks
//!
//! The core is a pure, synchronous pipeline: a line-oriented state machine
//! ([`render`]) dispatches to small builders for tables, callouts and
//! inline emphasis and returns a [`Document`]. Nothing here touches the
//! filesystem; independent renders can run concurrently without any
//! coordination.
//!
//! # Example
//!
//! ```
//! use brandoc_ast::Block;
//! use brandoc_core::render;
//!
//! let doc = render("# Audit & Findings\nPrepared for Acme\n## Overview\nAll **good**.");
//! assert!(matches!(doc.blocks[0], Block::CoverTitle(_)));
//! assert!(matches!(doc.blocks[1], Block::Subtitle(_)));
//! assert!(matches!(doc.blocks[2], Block::Heading(_)));
//! ```

pub mod callout;
pub mod render;
pub mod spans;
pub mod style;
pub mod table;

pub use brandoc_ast::Document;
pub use callout::{build_callout, scan_callout, STATUS_PREFIXES};
pub use render::{render, render_with_state, CoverState, RenderState, COVER_END_MARKER};
pub use spans::parse_spans;
pub use table::{build_table, scan_table};

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
