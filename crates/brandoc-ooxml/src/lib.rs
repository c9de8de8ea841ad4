//! # brandoc-ooxml
//!
//! Package I/O for brandoc.
//!
//! This crate provides functionality to:
//! - Serialize a rendered [`Document`](brandoc_ast::Document) into a DOCX package
//! - Embed the display font into an existing package, atomically and idempotently
//! - Read a package back into a coarse outline
//!
//! All of it is blocking file and archive I/O; async callers should run it
//! on a blocking worker.
//!
//! ## Example
//!
//! ```no_run
//! use brandoc_ast::DocumentMeta;
//! use brandoc_ooxml::{embed_font_file, DocxWriter};
//!
//! let doc = brandoc_core::render("# Audit & Findings\n## Overview\nAll good.");
//! let mut writer = DocxWriter::new(DocumentMeta::new("Audit", "Acme"));
//! writer.write_to_path(&doc, "audit.docx")?;
//! embed_font_file("audit.docx", "fonts/BebasNeue-regular.ttf")?;
//! # Ok::<(), brandoc_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod error;
pub mod font;
pub mod inspect;
pub mod parts;
pub mod relationships;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use font::{embed_font, embed_font_file, embed_font_with, EmbeddedFont};
pub use inspect::{inspect_package, OutlineItem, PackageReport};
pub use relationships::Relationships;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
