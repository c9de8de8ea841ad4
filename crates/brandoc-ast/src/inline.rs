//! Inline runs
//!
//! A [`Run`] carries only text and emphasis flags. Font, size and color
//! are decided when the run is written, from the block that owns it.

use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing the same emphasis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Run {
    /// Literal text, delimiters already removed
    pub text: String,
    /// Bold emphasis
    pub bold: bool,
    /// Italic emphasis
    pub italic: bool,
}

impl Run {
    /// Unemphasized text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Bold text
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    /// Italic text
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }

    /// Whether this run carries any emphasis
    pub fn is_emphasized(&self) -> bool {
        self.bold || self.italic
    }
}

/// Concatenate the text of a run sequence
pub fn plain_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
