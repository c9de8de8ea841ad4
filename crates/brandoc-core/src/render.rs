//! Document renderer
//!
//! A line-oriented state machine over the input text. At each cursor
//! position the first matching rule wins:
//!
//! 1. cover-end marker: leave cover mode, page break
//! 2. `> ` blockquote run: callout (status runs dropped)
//! 3. `|` run: table
//! 4. `#`, `##`, `###`: headings (first `#` in cover mode may split)
//! 5. `- `, `* `, `N. `: list items
//! 6. `---`: rule
//! 7. blank lines: at most one spacer
//! 8. anything else: cover subtitle or paragraph
//!
//! All mutable state lives in [`RenderState`], owned by one render pass.

use std::sync::OnceLock;

use brandoc_ast::{Block, BrandColor, CoverTitle, Document, Heading};
use regex::Regex;

use crate::callout::{is_quote_line, scan_callout};
use crate::spans::parse_spans;
use crate::style::{heading_color, section_accent};
use crate::table::{is_separator_row, is_table_line, scan_table};

/// Line that ends the cover region and forces a page break
pub const COVER_END_MARKER: &str = "<!-- COVER_END -->";

/// Separator that splits the cover title into two lines
const COVER_TITLE_SEPARATOR: &str = " & ";

fn numbered_re() -> &'static Regex {
    static NUMBERED_RE: OnceLock<Regex> = OnceLock::new();
    NUMBERED_RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+(.+)$").unwrap())
}

/// Cover-page sub-state.
///
/// Starts active; once `active` turns false it stays false for the rest
/// of the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverState {
    pub active: bool,
    pub h1_done: bool,
    pub subtitle_done: bool,
}

impl Default for CoverState {
    fn default() -> Self {
        Self {
            active: true,
            h1_done: false,
            subtitle_done: false,
        }
    }
}

impl CoverState {
    /// Leave cover mode for good
    pub fn exit(&mut self) {
        self.active = false;
    }

    /// Whether the next plain line is the cover subtitle
    pub fn expects_subtitle(&self) -> bool {
        self.active && self.h1_done && !self.subtitle_done
    }
}

/// State threaded through one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    /// Cover-page sub-state
    pub cover: CoverState,
    /// Number of `##` headings seen so far
    pub h2_count: u32,
}

impl RenderState {
    /// Accent of the current section (header fill of the next data table)
    pub fn section_accent(&self) -> BrandColor {
        section_accent(self.h2_count)
    }
}

/// Render report text into a document. Never fails: anything
/// unrecognized degrades to a plain paragraph.
pub fn render(content: &str) -> Document {
    render_with_state(content).0
}

/// Render and also return the final state of the pass
pub fn render_with_state(content: &str) -> (Document, RenderState) {
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut renderer = Renderer::default();
    let mut cursor = 0;
    while cursor < lines.len() {
        cursor += renderer.step(&lines[cursor..]);
    }
    renderer.finish()
}

#[derive(Debug, Default)]
struct Renderer {
    state: RenderState,
    blocks: Vec<Block>,
}

impl Renderer {
    /// Handle the line at the front of `rest`; returns lines consumed
    fn step(&mut self, rest: &[&str]) -> usize {
        let line = rest[0].trim();

        if line == COVER_END_MARKER {
            self.state.cover.exit();
            self.blocks.push(Block::PageBreak);
            return 1;
        }

        if is_quote_line(line) {
            let (consumed, block) = scan_callout(rest);
            self.push_opt(block);
            return consumed;
        }

        if is_table_line(line) {
            if is_separator_row(line) {
                return 1;
            }
            let (consumed, block) = scan_table(rest, self.state.section_accent());
            self.push_opt(block);
            return consumed;
        }

        if let Some((level, text)) = parse_heading(line) {
            self.heading(level, text);
            return 1;
        }

        if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            self.blocks.push(Block::BulletItem(parse_spans(item.trim())));
            return 1;
        }

        if let Some(block) = numbered_item(line) {
            self.blocks.push(block);
            return 1;
        }

        if line == "---" {
            self.blocks.push(Block::Rule);
            return 1;
        }

        if line.is_empty() {
            self.gap();
            return 1;
        }

        if self.state.cover.expects_subtitle() {
            self.state.cover.subtitle_done = true;
            self.blocks.push(Block::Subtitle(parse_spans(line)));
            return 1;
        }

        self.paragraph(line);
        1
    }

    fn heading(&mut self, level: u8, text: &str) {
        match level {
            1 if self.state.cover.active && !self.state.cover.h1_done => {
                self.state.cover.h1_done = true;
                match split_cover_title(text) {
                    Some(title) => self.blocks.push(Block::CoverTitle(title)),
                    None => self.push_heading(1, text),
                }
            }
            2 => {
                self.state.cover.exit();
                self.state.h2_count += 1;
                self.push_heading(2, text);
            }
            _ => self.push_heading(level, text),
        }
    }

    fn push_heading(&mut self, level: u8, text: &str) {
        self.blocks.push(Block::Heading(Heading {
            level,
            text: text.to_string(),
            color: heading_color(level, self.state.h2_count),
        }));
    }

    /// Consecutive paragraphs are always separated by exactly one gap
    fn paragraph(&mut self, line: &str) {
        if matches!(self.blocks.last(), Some(Block::Paragraph(_))) {
            self.blocks.push(Block::Spacer);
        }
        self.blocks.push(Block::Paragraph(parse_spans(line)));
    }

    /// Collapse a blank-line run into one spacer
    fn gap(&mut self) {
        match self.blocks.last() {
            None | Some(Block::Spacer) => {}
            Some(_) => self.blocks.push(Block::Spacer),
        }
    }

    fn push_opt(&mut self, block: Option<Block>) {
        if let Some(block) = block {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> (Document, RenderState) {
        while matches!(self.blocks.last(), Some(Block::Spacer)) {
            self.blocks.pop();
        }
        log::debug!(
            "Rendered {} blocks ({} sections)",
            self.blocks.len(),
            self.state.h2_count
        );
        (Document::from_blocks(self.blocks), self.state)
    }
}

/// `# `, `## ` or `### ` followed by non-empty text
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let (level, text) = if let Some(text) = line.strip_prefix("### ") {
        (3, text)
    } else if let Some(text) = line.strip_prefix("## ") {
        (2, text)
    } else if let Some(text) = line.strip_prefix("# ") {
        (1, text)
    } else {
        return None;
    };

    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

/// Split `First & Second` into kicker `First` and title `& Second`
fn split_cover_title(text: &str) -> Option<CoverTitle> {
    let (kicker, rest) = text.split_once(COVER_TITLE_SEPARATOR)?;
    Some(CoverTitle {
        kicker: kicker.trim().to_string(),
        title: format!("& {}", rest.trim()),
    })
}

fn numbered_item(line: &str) -> Option<Block> {
    let caps = numbered_re().captures(line)?;
    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let text = caps.get(2)?.as_str();
    Some(Block::NumberedItem {
        number,
        runs: parse_spans(text.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandoc_ast::{CalloutLine, Run, TableKind};

    fn kinds(doc: &Document) -> Vec<&'static str> {
        doc.iter().map(Block::kind_name).collect()
    }

    #[test]
    fn test_cover_title_subtitle_and_section() {
        let (doc, state) = render_with_state("# A & B\nSubtitle text\n## Section");

        assert_eq!(
            doc.blocks[0],
            Block::CoverTitle(CoverTitle {
                kicker: "A".to_string(),
                title: "& B".to_string(),
            })
        );
        assert_eq!(doc.blocks[1], Block::Subtitle(vec![Run::plain("Subtitle text")]));
        assert_eq!(
            doc.blocks[2],
            Block::Heading(Heading {
                level: 2,
                text: "Section".to_string(),
                color: BrandColor::Blue,
            })
        );
        assert_eq!(state.h2_count, 1);
        assert!(!state.cover.active);
    }

    #[test]
    fn test_cover_title_without_separator() {
        let doc = render("# Monthly Report\nFor Acme");
        assert!(matches!(&doc.blocks[0], Block::Heading(h) if h.level == 1));
        assert!(matches!(doc.blocks[1], Block::Subtitle(_)));
    }

    #[test]
    fn test_second_h1_is_never_split() {
        let doc = render("# One & Two\n# Three & Four");
        assert!(matches!(doc.blocks[0], Block::CoverTitle(_)));
        assert!(matches!(&doc.blocks[1], Block::Heading(h) if h.text == "Three & Four"));
    }

    #[test]
    fn test_h1_after_section_is_not_cover() {
        let doc = render("## Intro\n# Big & Bold\nNot a subtitle");
        assert!(matches!(&doc.blocks[1], Block::Heading(h) if h.level == 1));
        assert!(matches!(doc.blocks[2], Block::Paragraph(_)));
    }

    #[test]
    fn test_cover_marker_exits_cover_mode() {
        let (doc, state) = render_with_state(&format!("# Title\n{}\nBody line", COVER_END_MARKER));
        assert_eq!(kinds(&doc), vec!["heading", "page-break", "paragraph"]);
        assert!(!state.cover.active);
    }

    #[test]
    fn test_cover_mode_never_reactivates() {
        let input = format!("{}\n# Late & Title\nline", COVER_END_MARKER);
        let (doc, state) = render_with_state(&input);
        assert!(matches!(&doc.blocks[1], Block::Heading(h) if h.text == "Late & Title"));
        assert!(matches!(doc.blocks[2], Block::Paragraph(_)));
        assert!(!state.cover.active);
    }

    #[test]
    fn test_blank_runs_collapse_to_one_spacer() {
        for blanks in [0usize, 1, 2, 5, 10, 100] {
            let input = format!("First para{}Second para", "\n".repeat(blanks + 1));
            let doc = render(&input);
            assert_eq!(
                kinds(&doc),
                vec!["paragraph", "spacer", "paragraph"],
                "with {} blank lines",
                blanks
            );
        }
    }

    #[test]
    fn test_leading_and_trailing_blanks_dropped() {
        let doc = render("\n\n\nOnly line\n\n\n");
        assert_eq!(kinds(&doc), vec!["paragraph"]);
    }

    #[test]
    fn test_h2_parity_drives_table_accent() {
        let input = "## One\n| A | B |\n|---|---|\n| 1 | 2 |\n## Two\n| C | D |\n|---|---|\n| 3 | 4 |";
        let doc = render(input);
        let accents: Vec<BrandColor> = doc
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t.accent),
                _ => None,
            })
            .collect();
        assert_eq!(accents, vec![BrandColor::Blue, BrandColor::Orange]);
    }

    #[test]
    fn test_table_kinds() {
        let doc = render("| | |\n|---|---|\n| **Company** | Acme |\n\n| Keyword | Volume |\n|---|---|\n| a | 1 |");
        let tables: Vec<TableKind> = doc
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t.kind),
                _ => None,
            })
            .collect();
        assert_eq!(tables, vec![TableKind::Info, TableKind::Data]);
    }

    #[test]
    fn test_status_callout_produces_nothing() {
        let doc = render("> Pulling SEO data for **acme.com**...");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_key_insight_callout() {
        let doc = render("> **KEY INSIGHT**\n> - point one");
        assert_eq!(doc.len(), 1);
        let Block::Callout(callout) = &doc.blocks[0] else {
            panic!("Expected callout");
        };
        assert!(matches!(callout.lines[0], CalloutLine::Header(_)));
        assert!(matches!(callout.lines[1], CalloutLine::Bullet(_)));
    }

    #[test]
    fn test_lists_and_rule() {
        let doc = render("- one\n* two\n3. three\n---");
        assert_eq!(kinds(&doc), vec!["bullet", "bullet", "numbered", "rule"]);
        assert_eq!(
            doc.blocks[2],
            Block::NumberedItem {
                number: 3,
                runs: vec![Run::plain("three")],
            }
        );
    }

    #[test]
    fn test_heading_text_is_literal() {
        let doc = render("## **Bold** heading");
        assert!(matches!(&doc.blocks[0], Block::Heading(h) if h.text == "**Bold** heading"));
    }

    #[test]
    fn test_malformed_constructs_degrade_to_paragraphs() {
        let doc = render("#NoSpace\n**unterminated\n1.nospace");
        assert_eq!(kinds(&doc), vec!["paragraph", "spacer", "paragraph", "spacer", "paragraph"]);
    }

    #[test]
    fn test_stray_separator_row_is_ignored() {
        let doc = render("|---|---|\ntext");
        assert_eq!(kinds(&doc), vec!["paragraph"]);
    }

    #[test]
    fn test_pipe_lines_without_cells_never_make_empty_rows() {
        let doc = render("|\n| a |");
        match &doc.blocks[0] {
            Block::Table(table) => {
                assert_eq!(table.header_texts(), vec!["a"]);
                assert!(table.rows.iter().all(|row| !row.is_empty()));
            }
            other => panic!("Expected table, got {:?}", other),
        }

        let doc = render("|\ntext");
        assert_eq!(kinds(&doc), vec!["paragraph"]);
    }

    #[test]
    fn test_crlf_input() {
        let doc = render("## One\r\n- item\r\n");
        assert_eq!(kinds(&doc), vec!["heading", "bullet"]);
    }
}
