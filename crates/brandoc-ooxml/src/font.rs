//! Font embedding post-processor
//!
//! Injects a TrueType binary into an already-written package and patches
//! the font table, its relationships part and the content types so the
//! display face renders on machines that never installed it.
//!
//! The package is never edited in place: a new archive is written next to
//! it and renamed over the original. Parts that need no change are copied
//! raw, and a package that already carries the font is left untouched, so
//! embedding twice gives byte-identical output.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use std::sync::OnceLock;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::{Captures, Regex};
use tempfile::NamedTempFile;
use zip::read::ZipArchive;
use zip::result::ZipError;
use zip::write::ZipWriter;

use brandoc_core::style::DISPLAY_FONT;

use crate::archive::part_options;
use crate::error::Result;
use crate::parts::{
    single_relationship_xml, CONTENT_TYPES_PART, FONT_TABLE_PART, FONT_TABLE_RELS_PART, R_NS,
};
use crate::relationships::{relationship_element, Relationships};

/// Content type registered for `.ttf` parts
pub const TTF_CONTENT_TYPE: &str = "application/x-font-ttf";

/// Font key written on the embed element (unobfuscated font)
pub const ZERO_FONT_KEY: &str = "{00000000-0000-0000-0000-000000000000}";

static FONTS_SELF_CLOSING: OnceLock<Regex> = OnceLock::new();
static RELS_SELF_CLOSING: OnceLock<Regex> = OnceLock::new();
static TYPES_SELF_CLOSING: OnceLock<Regex> = OnceLock::new();
static FONTS_ROOT: OnceLock<Regex> = OnceLock::new();

/// Where and how a font binary is embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFont {
    /// Family name as referenced by the styles
    pub family: String,
    /// Part path of the binary inside the package
    pub part: String,
    /// Relationship ID used by the font table
    pub rel_id: String,
}

impl EmbeddedFont {
    /// The display face, at its fixed location and relationship ID
    pub fn display() -> Self {
        Self {
            family: DISPLAY_FONT.to_string(),
            part: "word/fonts/BebasNeue-regular.ttf".to_string(),
            rel_id: "rId10".to_string(),
        }
    }

    /// Target of the relationship, relative to `word/`
    pub fn target(&self) -> &str {
        self.part.strip_prefix("word/").unwrap_or(&self.part)
    }

    /// `<w:font>` declaration referencing the embedded binary
    pub fn declaration(&self) -> String {
        format!(
            r#"<w:font w:name="{}"><w:embedRegular w:fontKey="{}" r:id="{}" w:subsetted="0"/></w:font>"#,
            self.family, ZERO_FONT_KEY, self.rel_id
        )
    }

    /// `<Relationship>` entry for the font table's relationships part
    pub fn relationship(&self) -> String {
        relationship_element(&self.rel_id, Relationships::TYPE_FONT, self.target())
    }
}

/// Embed the display font into the package at `package_path`.
///
/// Empty `font_bytes` mean the font is unavailable; the package is left
/// as it is. I/O and archive failures are returned.
pub fn embed_font<P: AsRef<Path>>(package_path: P, font_bytes: &[u8]) -> Result<()> {
    embed_font_with(package_path.as_ref(), &EmbeddedFont::display(), font_bytes)
}

/// Embed the display font read from `font_path`.
///
/// Returns `Ok(false)` without touching the package when the font file
/// does not exist.
pub fn embed_font_file<P: AsRef<Path>, F: AsRef<Path>>(package_path: P, font_path: F) -> Result<bool> {
    let font_path = font_path.as_ref();
    if !font_path.is_file() {
        log::warn!(
            "Font {} not found, skipping embedding",
            font_path.display()
        );
        return Ok(false);
    }
    let bytes = std::fs::read(font_path)?;
    embed_font(package_path, &bytes)?;
    Ok(true)
}

/// Embed `font` into the package at `package_path`
pub fn embed_font_with(package_path: &Path, font: &EmbeddedFont, font_bytes: &[u8]) -> Result<()> {
    if font_bytes.is_empty() {
        log::debug!("No font data for {}, skipping embedding", font.family);
        return Ok(());
    }

    let mut zin = ZipArchive::new(File::open(package_path)?)?;
    let plan = EmbedPlan::build(&mut zin, font)?;
    if plan.is_empty() {
        log::debug!(
            "{} already embedded in {}",
            font.family,
            package_path.display()
        );
        return Ok(());
    }

    let dir = package_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;

    {
        let mut zout = ZipWriter::new(tmp.as_file_mut());

        for i in 0..zin.len() {
            let file = zin.by_index_raw(i)?;
            match plan.replacements.get(file.name()) {
                Some(contents) => {
                    let name = file.name().to_string();
                    zout.start_file(name, part_options())?;
                    zout.write_all(contents.as_bytes())?;
                }
                None => zout.raw_copy_file(file)?,
            }
        }

        if plan.add_font_part {
            zout.start_file(font.part.as_str(), part_options())?;
            zout.write_all(font_bytes)?;
        }
        if plan.add_rels_part {
            zout.start_file(FONT_TABLE_RELS_PART, part_options())?;
            zout.write_all(
                single_relationship_xml(&font.rel_id, Relationships::TYPE_FONT, font.target())
                    .as_bytes(),
            )?;
        }

        zout.finish()?;
    }

    // The temp file is created 0600; keep the package's own mode
    let permissions = std::fs::metadata(package_path)?.permissions();
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(package_path)?;
    log::info!(
        "Embedded {} into {}",
        font.family,
        package_path.display()
    );
    Ok(())
}

/// Changes needed to carry the font, worked out before anything is written
#[derive(Debug, Default)]
struct EmbedPlan {
    /// Patched contents of existing parts
    replacements: BTreeMap<String, String>,
    /// The binary part is absent
    add_font_part: bool,
    /// The font table has no relationships part
    add_rels_part: bool,
}

impl EmbedPlan {
    fn build<R: Read + Seek>(zin: &mut ZipArchive<R>, font: &EmbeddedFont) -> Result<Self> {
        let mut plan = Self::default();

        let Some(font_table) = read_part(zin, FONT_TABLE_PART)? else {
            log::warn!("Package has no {}, skipping embedding", FONT_TABLE_PART);
            return Ok(plan);
        };

        if !font_declared(&font_table, &font.family)? {
            match declare_font(&font_table, &font.declaration()) {
                Some(patched) => {
                    plan.replacements
                        .insert(FONT_TABLE_PART.to_string(), patched);
                }
                None => log::warn!("Unrecognized font table root, declaration skipped"),
            }
        }

        match read_part(zin, FONT_TABLE_RELS_PART)? {
            Some(rels_xml) => {
                let rels = Relationships::parse(rels_xml.as_bytes())?;
                if !rels.contains(&font.rel_id) {
                    let patched = insert_before_close(
                        &rels_xml,
                        "Relationships",
                        rels_self_closing(),
                        &font.relationship(),
                    );
                    if let Some(patched) = patched {
                        plan.replacements
                            .insert(FONT_TABLE_RELS_PART.to_string(), patched);
                    }
                }
            }
            None => plan.add_rels_part = true,
        }

        if let Some(types) = read_part(zin, CONTENT_TYPES_PART)? {
            if !types.contains(r#"Extension="ttf""#) {
                let default = format!(
                    r#"<Default Extension="ttf" ContentType="{}"/>"#,
                    TTF_CONTENT_TYPE
                );
                if let Some(patched) =
                    insert_before_close(&types, "Types", types_self_closing(), &default)
                {
                    plan.replacements
                        .insert(CONTENT_TYPES_PART.to_string(), patched);
                }
            }
        }

        plan.add_font_part = !zin.file_names().any(|name| name == font.part);
        Ok(plan)
    }

    fn is_empty(&self) -> bool {
        self.replacements.is_empty() && !self.add_font_part && !self.add_rels_part
    }
}

fn read_part<R: Read + Seek>(zin: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match zin.by_name(name) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            Ok(Some(contents))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Check whether a font table declares `family`
pub fn font_declared(font_table: &str, family: &str) -> Result<bool> {
    let mut reader = Reader::from_str(font_table);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"font" => {
                for attr in e.attributes().filter_map(|a| a.ok()) {
                    if attr.key.local_name().as_ref() == b"name"
                        && attr.unescape_value()?.as_ref() == family
                    {
                        return Ok(true);
                    }
                }
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
        buf.clear();
    }
}

/// Add a font declaration to a font table, binding the `r:` prefix if the
/// root does not already
fn declare_font(font_table: &str, declaration: &str) -> Option<String> {
    let root = FONTS_ROOT.get_or_init(|| Regex::new(r"<w:fonts\b[^>]*>").unwrap());
    let with_ns = match root.find(font_table) {
        Some(tag) if !tag.as_str().contains("xmlns:r=") => {
            let insert_at = tag.start() + "<w:fonts".len();
            format!(
                r#"{} xmlns:r="{}"{}"#,
                &font_table[..insert_at],
                R_NS,
                &font_table[insert_at..]
            )
        }
        Some(_) => font_table.to_string(),
        None => return None,
    };

    let self_closing =
        FONTS_SELF_CLOSING.get_or_init(|| Regex::new(r"(<w:fonts\b[^>]*?)\s*/\s*>").unwrap());
    insert_before_close(&with_ns, "w:fonts", self_closing, declaration)
}

fn rels_self_closing() -> &'static Regex {
    RELS_SELF_CLOSING.get_or_init(|| Regex::new(r"(<Relationships\b[^>]*?)\s*/\s*>").unwrap())
}

fn types_self_closing() -> &'static Regex {
    TYPES_SELF_CLOSING.get_or_init(|| Regex::new(r"(<Types\b[^>]*?)\s*/\s*>").unwrap())
}

/// Insert `fragment` as the last child of the root element `tag`.
///
/// Handles both a root with a closing tag and a self-closing root.
fn insert_before_close(xml: &str, tag: &str, self_closing: &Regex, fragment: &str) -> Option<String> {
    let close = format!("</{}>", tag);
    if let Some(pos) = xml.rfind(&close) {
        let mut patched = String::with_capacity(xml.len() + fragment.len());
        patched.push_str(&xml[..pos]);
        patched.push_str(fragment);
        patched.push_str(&xml[pos..]);
        return Some(patched);
    }
    if self_closing.is_match(xml) {
        let patched = self_closing.replace(xml, |caps: &Captures| {
            format!("{}>{}{}", &caps[1], fragment, close)
        });
        return Some(patched.into_owned());
    }
    None
}
