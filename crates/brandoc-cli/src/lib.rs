//! brandoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for brandoc:
//! - Render: report text or a job file to a branded DOCX
//! - Embed-font: add the display font to an existing DOCX
//! - Inspect: print a package's outline and font status
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a report, embedding the display font
//! brandoc render report.md --recipient "Acme Plumbing" -o report.docx
//!
//! # Render a stored job record
//! brandoc render job.json
//!
//! # Check what a package contains
//! brandoc inspect report.docx --format json
//! ```

pub mod app;
pub mod config;
pub mod job;

// Re-export main entry point and types
pub use app::{
    embed_font_command, init_logging, inspect_command, render_command, run_cli, OutputFormat,
    RenderOptions,
};
pub use config::Settings;
pub use job::{Job, RenderInput};
