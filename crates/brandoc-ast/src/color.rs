//! Brand palette
//!
//! The six named colors every styled element draws from. Values are
//! OOXML hex triplets (no leading `#`).

use serde::{Deserialize, Serialize};

/// A named color from the fixed brand palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandColor {
    /// Primary dark (body headings, callout background)
    Navy,
    /// First accent, used on odd-numbered sections
    Blue,
    /// Second accent, used on even-numbered sections and on dark backgrounds
    Orange,
    /// Muted text (subtitles, footer)
    Slate,
    /// Light shading (info labels, zebra rows)
    Mist,
    /// Text on dark fills
    White,
}

impl BrandColor {
    /// All palette entries in declaration order
    pub const ALL: [BrandColor; 6] = [
        BrandColor::Navy,
        BrandColor::Blue,
        BrandColor::Orange,
        BrandColor::Slate,
        BrandColor::Mist,
        BrandColor::White,
    ];

    /// Hex value as written into `w:color` / `w:fill` attributes
    pub fn hex(self) -> &'static str {
        match self {
            BrandColor::Navy => "0A1628",
            BrandColor::Blue => "0066FF",
            BrandColor::Orange => "FF6B35",
            BrandColor::Slate => "5B6B7F",
            BrandColor::Mist => "EEF2F7",
            BrandColor::White => "FFFFFF",
        }
    }
}
