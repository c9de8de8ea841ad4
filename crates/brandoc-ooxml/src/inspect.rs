//! Package inspection
//!
//! Reads a written package back into a coarse outline: headings with
//! their levels, the cover title, and tables with their recovered kind.
//! Table kinds are recovered with the same [`TableKind::classify`] rule
//! the renderer uses, applied to the header row found in the package.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use brandoc_ast::TableKind;
use brandoc_core::style::DISPLAY_FONT;

use crate::archive::OoxmlArchive;
use crate::error::Result;
use crate::font::{font_declared, EmbeddedFont};
use crate::parts::{FONT_TABLE_PART, FONT_TABLE_RELS_PART};
use crate::relationships::Relationships;

/// Table style the writer gives callout containers
const CALLOUT_TABLE_STYLE: &str = "CalloutBox";

/// One structural item recovered from a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutlineItem {
    Heading { level: u8, text: String },
    CoverTitle { text: String },
    Table { kind: TableKind, columns: usize },
}

impl fmt::Display for OutlineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineItem::Heading { level, text } => {
                write!(f, "{}H{} {}", "  ".repeat(usize::from(level.saturating_sub(1))), level, text)
            }
            OutlineItem::CoverTitle { text } => write!(f, "COVER {}", text),
            OutlineItem::Table { kind, columns } => {
                write!(f, "TABLE {:?} ({} columns)", kind, columns)
            }
        }
    }
}

/// Outline plus font embedding status of a package
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub parts: usize,
    pub font_family: String,
    pub font_declared: bool,
    pub font_embedded: bool,
    pub outline: Vec<OutlineItem>,
}

impl PackageReport {
    /// Inspect package bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive = OoxmlArchive::from_bytes(bytes)?;
        Self::from_archive(&archive)
    }

    pub fn from_archive(archive: &OoxmlArchive) -> Result<Self> {
        let font = EmbeddedFont::display();

        let font_declared = match archive.get_string(FONT_TABLE_PART) {
            Some(xml) => font_declared(&xml, DISPLAY_FONT)?,
            None => false,
        };
        let font_related = match archive.get(FONT_TABLE_RELS_PART) {
            Some(xml) => Relationships::parse(xml)?.contains(&font.rel_id),
            None => false,
        };

        Ok(Self {
            parts: archive.file_list().count(),
            font_family: font.family.clone(),
            font_declared,
            font_embedded: font_related && archive.contains(&font.part),
            outline: outline_from_xml(archive.document_xml()?)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Recover the outline of a package
pub fn inspect_package(bytes: &[u8]) -> Result<Vec<OutlineItem>> {
    let archive = OoxmlArchive::from_bytes(bytes)?;
    outline_from_xml(archive.document_xml()?)
}

/// A table being read
#[derive(Debug, Default)]
struct TableScan {
    style: String,
    grid_columns: usize,
    rows: usize,
    first_row_is_header: bool,
    first_row: Vec<String>,
}

impl TableScan {
    fn finish(self) -> Option<OutlineItem> {
        if self.style == CALLOUT_TABLE_STYLE {
            return None;
        }
        let columns = if self.grid_columns > 0 {
            self.grid_columns
        } else {
            self.first_row.len()
        };
        let headers = if self.first_row_is_header {
            self.first_row
        } else {
            vec![String::new(); columns]
        };
        Some(OutlineItem::Table {
            kind: TableKind::classify(headers.as_slice()),
            columns,
        })
    }
}

/// Recover the outline from `word/document.xml`
pub fn outline_from_xml(xml: &[u8]) -> Result<Vec<OutlineItem>> {
    let mut reader = Reader::from_reader(xml);
    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut table: Option<TableScan> = None;
    let mut paragraph_style: Option<String> = None;
    let mut text = String::new();
    let mut in_text = false;
    let mut kicker: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"tbl" => table = Some(TableScan::default()),
                b"tr" => {
                    if let Some(scan) = table.as_mut() {
                        scan.rows += 1;
                    }
                }
                b"tc" => {
                    if let Some(scan) = table.as_mut().filter(|s| s.rows == 1) {
                        scan.first_row.push(String::new());
                    }
                }
                b"p" => {
                    paragraph_style = None;
                    text.clear();
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"pStyle" => paragraph_style = val_attr(e)?,
                b"tblStyle" => {
                    if let Some(scan) = table.as_mut() {
                        scan.style = val_attr(e)?.unwrap_or_default();
                    }
                }
                b"gridCol" => {
                    if let Some(scan) = table.as_mut() {
                        scan.grid_columns += 1;
                    }
                }
                b"tblHeader" => {
                    if let Some(scan) = table.as_mut().filter(|s| s.rows == 1) {
                        scan.first_row_is_header = true;
                    }
                }
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                let value = e.unescape()?;
                text.push_str(&value);
                if let Some(cell) = table
                    .as_mut()
                    .filter(|s| s.rows == 1)
                    .and_then(|s| s.first_row.last_mut())
                {
                    cell.push_str(&value);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if table.is_none() => {
                    if let Some(item) =
                        paragraph_item(paragraph_style.take(), &text, &mut kicker)
                    {
                        items.push(item);
                    }
                }
                b"tbl" => {
                    if let Some(item) = table.take().and_then(TableScan::finish) {
                        items.push(item);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

/// Classify a body paragraph by its style. A cover kicker is held until
/// the title paragraph that follows it.
fn paragraph_item(style: Option<String>, text: &str, kicker: &mut Option<String>) -> Option<OutlineItem> {
    let style = style?;
    if style == "CoverKicker" {
        *kicker = Some(text.to_string());
        return None;
    }
    if style == "Title" {
        let text = match kicker.take() {
            Some(k) => format!("{} {}", k, text),
            None => text.to_string(),
        };
        return Some(OutlineItem::CoverTitle { text });
    }
    let level = style.strip_prefix("Heading")?.parse::<u8>().ok()?;
    Some(OutlineItem::Heading {
        level,
        text: text.to_string(),
    })
}

fn val_attr(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes().filter_map(|a| a.ok()) {
        if attr.key.local_name().as_ref() == b"val" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
