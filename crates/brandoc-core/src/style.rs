//! Style engine
//!
//! Fixed palette, font families and point sizes, plus the small rules
//! that derive a run's final look from the block that owns it. Everything
//! here is immutable process-wide data.

use brandoc_ast::{BrandColor, Run};

/// Display face used for headings, cover title and table headers
pub const DISPLAY_FONT: &str = "Bebas Neue";

/// Body face used for all running text
pub const BODY_FONT: &str = "Calibri";

/// Fill of the callout container
pub const CALLOUT_FILL: BrandColor = BrandColor::Navy;

/// Accent used on dark fills (callout headers, markers, bold spans)
pub const ON_DARK_ACCENT: BrandColor = BrandColor::Orange;

/// Glyph drawn before callout bullet lines
pub const CALLOUT_MARKER: &str = "\u{25B8}";

/// Share of the table width given to the label column of an info table
pub const INFO_LABEL_PERCENT: u32 = 35;

/// One of the two font families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Display,
    Body,
}

impl FontFamily {
    /// Family name as declared in the package
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Display => DISPLAY_FONT,
            FontFamily::Body => BODY_FONT,
        }
    }
}

/// Point sizes
pub mod size {
    pub const H1: u16 = 32;
    pub const H2: u16 = 22;
    pub const H3: u16 = 15;
    pub const COVER_KICKER: u16 = 24;
    pub const COVER_TITLE: u16 = 44;
    pub const SUBTITLE: u16 = 13;
    pub const BODY: u16 = 11;
    pub const TABLE: u16 = 10;
    pub const TABLE_HEADER: u16 = 12;
    pub const CALLOUT_HEADER: u16 = 14;
    pub const PAGE_HEADER: u16 = 9;
}

/// The block context a run is written under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanContext {
    /// Paragraphs and list items
    Body,
    /// Cover subtitle
    Subtitle,
    /// Data table body cell and info table value cell
    TableCell,
    /// Info table label cell
    InfoLabel,
    /// Data table header cell
    TableHeader,
    /// Callout body and bullet text
    Callout,
    /// Page header and footer text
    PageChrome,
}

/// Fully resolved run formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    pub font: FontFamily,
    pub color: BrandColor,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

/// Accent for a second-level section, by running section count.
///
/// Odd counts take the first accent, even counts (and zero, before any
/// section) take the second.
pub fn section_accent(h2_count: u32) -> BrandColor {
    if h2_count % 2 == 1 {
        BrandColor::Blue
    } else {
        BrandColor::Orange
    }
}

/// Heading color for a level, given the section count after the heading
pub fn heading_color(level: u8, h2_count: u32) -> BrandColor {
    match level {
        2 => section_accent(h2_count),
        _ => BrandColor::Navy,
    }
}

/// Heading formatting
pub fn heading_style(level: u8, color: BrandColor) -> RunStyle {
    let size = match level {
        1 => size::H1,
        2 => size::H2,
        _ => size::H3,
    };
    RunStyle {
        font: FontFamily::Display,
        color,
        size,
        bold: level == 3,
        italic: false,
    }
}

/// Smaller accent half of a split cover title
pub fn cover_kicker_style() -> RunStyle {
    RunStyle {
        font: FontFamily::Display,
        color: BrandColor::Blue,
        size: size::COVER_KICKER,
        bold: false,
        italic: false,
    }
}

/// Larger primary half of a split cover title
pub fn cover_title_style() -> RunStyle {
    RunStyle {
        font: FontFamily::Display,
        color: BrandColor::Navy,
        size: size::COVER_TITLE,
        bold: false,
        italic: false,
    }
}

/// Callout header line formatting
pub fn callout_header_style() -> RunStyle {
    RunStyle {
        font: FontFamily::Display,
        color: ON_DARK_ACCENT,
        size: size::CALLOUT_HEADER,
        bold: false,
        italic: false,
    }
}

/// Resolve a run's formatting from its context and emphasis flags.
///
/// The same run renders differently depending on which builder owns it.
pub fn run_style(context: SpanContext, run: &Run) -> RunStyle {
    let base = RunStyle {
        font: FontFamily::Body,
        color: BrandColor::Navy,
        size: size::BODY,
        bold: run.bold,
        italic: run.italic,
    };
    match context {
        SpanContext::Body => base,
        SpanContext::Subtitle => RunStyle {
            color: BrandColor::Slate,
            size: size::SUBTITLE,
            italic: true,
            ..base
        },
        SpanContext::TableCell => RunStyle {
            size: size::TABLE,
            ..base
        },
        SpanContext::InfoLabel => RunStyle {
            size: size::TABLE,
            bold: true,
            ..base
        },
        SpanContext::TableHeader => RunStyle {
            font: FontFamily::Display,
            color: BrandColor::White,
            size: size::TABLE_HEADER,
            bold: false,
            ..base
        },
        SpanContext::Callout => RunStyle {
            color: if run.bold {
                ON_DARK_ACCENT
            } else {
                BrandColor::White
            },
            ..base
        },
        SpanContext::PageChrome => RunStyle {
            color: BrandColor::Slate,
            size: size::PAGE_HEADER,
            ..base
        },
    }
}

/// Fill for a data-table body row; the first row is unshaded
pub fn zebra_fill(row_index: usize) -> Option<BrandColor> {
    if row_index % 2 == 1 {
        Some(BrandColor::Mist)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_accent_alternates() {
        assert_eq!(section_accent(1), BrandColor::Blue);
        assert_eq!(section_accent(2), BrandColor::Orange);
        assert_eq!(section_accent(3), BrandColor::Blue);
        assert_eq!(section_accent(0), BrandColor::Orange);
    }

    #[test]
    fn test_heading_color() {
        assert_eq!(heading_color(1, 5), BrandColor::Navy);
        assert_eq!(heading_color(2, 1), BrandColor::Blue);
        assert_eq!(heading_color(3, 1), BrandColor::Navy);
    }

    #[test]
    fn test_same_run_differs_by_context() {
        let run = Run::bold("Total");
        let body = run_style(SpanContext::Body, &run);
        let callout = run_style(SpanContext::Callout, &run);
        let header = run_style(SpanContext::TableHeader, &run);

        assert_eq!(body.color, BrandColor::Navy);
        assert_eq!(callout.color, ON_DARK_ACCENT);
        assert_eq!(header.color, BrandColor::White);
        assert_eq!(header.font, FontFamily::Display);
        assert!(body.bold);
    }

    #[test]
    fn test_callout_plain_text_is_white() {
        let style = run_style(SpanContext::Callout, &Run::plain("note"));
        assert_eq!(style.color, BrandColor::White);
    }

    #[test]
    fn test_subtitle_forces_italic() {
        let style = run_style(SpanContext::Subtitle, &Run::plain("Real data"));
        assert!(style.italic);
        assert_eq!(style.color, BrandColor::Slate);
    }

    #[test]
    fn test_zebra_starts_unshaded() {
        assert_eq!(zebra_fill(0), None);
        assert_eq!(zebra_fill(1), Some(BrandColor::Mist));
        assert_eq!(zebra_fill(2), None);
    }

    #[test]
    fn test_font_names() {
        assert_eq!(FontFamily::Display.name(), "Bebas Neue");
        assert_eq!(FontFamily::Body.name(), "Calibri");
    }
}
