//! Fixed package parts
//!
//! Everything in a package that does not depend on the document body:
//! content types, package relationships, styles, settings, numbering and
//! the font table. Parts that carry metadata (core properties, page
//! header and footer) are built from a [`DocumentMeta`].

use brandoc_ast::{BrandColor, DocumentMeta};
use brandoc_core::style::{self, size, FontFamily, SpanContext};

use crate::relationships::{relationship_element, Relationships};

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const CORE_PROPS_PART: &str = "docProps/core.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const STYLES_PART: &str = "word/styles.xml";
pub const SETTINGS_PART: &str = "word/settings.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const FONT_TABLE_PART: &str = "word/fontTable.xml";
pub const FONT_TABLE_RELS_PART: &str = "word/_rels/fontTable.xml.rels";
pub const HEADER_PART: &str = "word/header1.xml";
pub const FOOTER_PART: &str = "word/footer1.xml";

/// WordprocessingML main namespace
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace (the `r:` prefix)
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) const XML_DECL: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Numbering instance used by bullet items
pub const BULLET_NUM_ID: u32 = 1;

/// Page geometry in twentieths of a point (US Letter, 1in margins)
pub mod page {
    pub const WIDTH: u32 = 12240;
    pub const HEIGHT: u32 = 15840;
    pub const MARGIN: u32 = 1440;
    pub const HEADER_DISTANCE: u32 = 720;
    /// Usable text width between the margins
    pub const TEXT_WIDTH: u32 = WIDTH - 2 * MARGIN;
}

pub fn content_types_xml() -> String {
    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/word/fontTable.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.fontTable+xml",
        ),
        (
            "/word/header1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml",
        ),
        (
            "/word/footer1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ];

    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            r#"  <Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        ));
        xml.push('\n');
    }
    xml.push_str("</Types>");
    xml
}

pub fn root_rels_xml() -> String {
    let mut rels = Relationships::new();
    rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT);
    rels.add(CORE_PROPS_PART, Relationships::TYPE_CORE_PROPERTIES);
    rels.to_xml()
}

/// Relationship IDs of the document part, in the order they are assigned
#[derive(Debug, Clone)]
pub struct DocumentRels {
    pub header: String,
    pub footer: String,
    pub rels: Relationships,
}

pub fn document_rels() -> DocumentRels {
    let mut rels = Relationships::new();
    rels.add("styles.xml", Relationships::TYPE_STYLES);
    rels.add("settings.xml", Relationships::TYPE_SETTINGS);
    rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
    rels.add("fontTable.xml", Relationships::TYPE_FONT_TABLE);
    let header = rels.add("header1.xml", Relationships::TYPE_HEADER);
    let footer = rels.add("footer1.xml", Relationships::TYPE_FOOTER);
    DocumentRels {
        header,
        footer,
        rels,
    }
}

/// Core properties. No timestamps, so repeated writes stay identical.
pub fn core_props_xml(meta: &DocumentMeta) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">"#);
    if !meta.title.is_empty() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&meta.title)));
    }
    if !meta.recipient.is_empty() {
        xml.push_str(&format!(
            "<dc:subject>{}</dc:subject>",
            escape_xml(&meta.recipient)
        ));
    }
    xml.push_str("<dc:creator>brandoc</dc:creator>");
    xml.push_str("</cp:coreProperties>");
    xml
}

pub fn settings_xml() -> String {
    format!(
        r#"{}
<w:settings xmlns:w="{}"><w:defaultTabStop w:val="720"/><w:characterSpacingControl w:val="doNotCompress"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        XML_DECL, W_NS
    )
}

/// Font table declaring the body face only.
///
/// The display face is declared by the font embedder together with its
/// embedded binary.
pub fn font_table_xml() -> String {
    format!(
        r#"{}
<w:fonts xmlns:w="{}" xmlns:r="{}"><w:font w:name="{}"><w:panose1 w:val="020F0502020204030204"/><w:charset w:val="00"/><w:family w:val="swiss"/><w:pitch w:val="variable"/></w:font></w:fonts>"#,
        XML_DECL,
        W_NS,
        R_NS,
        FontFamily::Body.name()
    )
}

pub fn numbering_xml() -> String {
    format!(
        r#"{}
<w:numbering xmlns:w="{}"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#8226;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr><w:rPr><w:color w:val="{}"/></w:rPr></w:lvl></w:abstractNum><w:num w:numId="{}"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#,
        XML_DECL,
        W_NS,
        BrandColor::Blue.hex(),
        BULLET_NUM_ID
    )
}

/// Style sheet: document defaults plus the named paragraph and table
/// styles the writer references.
pub fn styles_xml() -> String {
    let body = FontFamily::Body.name();
    let display = FontFamily::Display.name();
    let navy = BrandColor::Navy.hex();

    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, W_NS));

    xml.push_str(&format!(
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{b}" w:hAnsi="{b}" w:cs="{b}"/><w:color w:val="{c}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
        b = body,
        c = navy,
        s = size::BODY * 2
    ));

    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);

    for (level, pt) in [(1u8, size::H1), (2, size::H2), (3, size::H3)] {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{o}"/></w:pPr><w:rPr><w:rFonts w:ascii="{d}" w:hAnsi="{d}" w:cs="{d}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
            l = level,
            o = level - 1,
            d = display,
            s = pt * 2
        ));
    }

    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Subtitle"/><w:qFormat/><w:pPr><w:jc w:val="center"/><w:spacing w:after="240"/></w:pPr><w:rPr><w:rFonts w:ascii="{d}" w:hAnsi="{d}" w:cs="{d}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
        d = display,
        s = size::COVER_TITLE * 2
    ));
    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="CoverKicker"><w:name w:val="Cover Kicker"/><w:basedOn w:val="Normal"/><w:next w:val="Title"/><w:pPr><w:jc w:val="center"/><w:spacing w:before="2400" w:after="0"/></w:pPr><w:rPr><w:rFonts w:ascii="{d}" w:hAnsi="{d}" w:cs="{d}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
        d = display,
        s = size::COVER_KICKER * 2
    ));
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="60"/><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="ListNumber"><w:name w:val="List Number"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="60"/><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Spacer"><w:name w:val="Spacer"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Header"><w:name w:val="header"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="right"/><w:spacing w:after="0"/></w:pPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Footer"><w:name w:val="footer"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:spacing w:after="0"/></w:pPr></w:style>"#);

    xml.push_str(r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#);
    for (id, name) in [
        ("InfoTable", "Info Table"),
        ("DataTable", "Data Table"),
        ("CalloutBox", "Callout Box"),
    ] {
        xml.push_str(&format!(
            r#"<w:style w:type="table" w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="TableNormal"/><w:pPr><w:spacing w:after="0"/></w:pPr></w:style>"#,
            id, name
        ));
    }

    xml.push_str("</w:styles>");
    xml
}

/// Repeating page header carrying the display title
pub fn header_xml(meta: &DocumentMeta) -> String {
    let run_style = style::run_style(SpanContext::PageChrome, &brandoc_ast::Run::plain(""));
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:hdr xmlns:w="{}" xmlns:r="{}">"#, W_NS, R_NS));
    xml.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Header"/></w:pPr>"#);
    if !meta.title.is_empty() {
        xml.push_str(&run_xml(&meta.title, &run_style));
    }
    xml.push_str("</w:p></w:hdr>");
    xml
}

/// Repeating page footer: recipient name and the page number field
pub fn footer_xml(meta: &DocumentMeta) -> String {
    let run_style = style::run_style(SpanContext::PageChrome, &brandoc_ast::Run::plain(""));
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:ftr xmlns:w="{}" xmlns:r="{}">"#, W_NS, R_NS));
    xml.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Footer"/></w:pPr>"#);
    if !meta.recipient.is_empty() {
        xml.push_str(&run_xml(&format!("{}  |  ", meta.recipient), &run_style));
    }
    xml.push_str(&run_xml("Page ", &run_style));
    let props = run_properties(&run_style);
    xml.push_str(&format!(
        r#"<w:r>{p}<w:fldChar w:fldCharType="begin"/></w:r><w:r>{p}<w:instrText xml:space="preserve"> PAGE </w:instrText></w:r><w:r>{p}<w:fldChar w:fldCharType="separate"/></w:r><w:r>{p}<w:t>1</w:t></w:r><w:r>{p}<w:fldChar w:fldCharType="end"/></w:r>"#,
        p = props
    ));
    xml.push_str("</w:p></w:ftr>");
    xml
}

/// `<w:rPr>` for a resolved run style
pub(crate) fn run_properties(style: &style::RunStyle) -> String {
    let font = style.font.name();
    let mut props = format!(
        r#"<w:rPr><w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:cs="{f}"/>"#,
        f = font
    );
    if style.bold {
        props.push_str("<w:b/><w:bCs/>");
    }
    if style.italic {
        props.push_str("<w:i/><w:iCs/>");
    }
    props.push_str(&format!(
        r#"<w:color w:val="{c}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr>"#,
        c = style.color.hex(),
        s = style.size * 2
    ));
    props
}

/// A complete `<w:r>` for literal text
pub(crate) fn run_xml(text: &str, style: &style::RunStyle) -> String {
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        run_properties(style),
        escape_xml(text)
    )
}

/// A minimal font-table relationships part holding one relationship
pub fn single_relationship_xml(id: &str, rel_type: &str, target: &str) -> String {
    format!(
        "{}\n<Relationships xmlns=\"{}\">{}</Relationships>",
        XML_DECL,
        crate::relationships::RELATIONSHIPS_NS,
        relationship_element(id, rel_type, target)
    )
}

/// Escape special XML characters and drop those XML 1.0 forbids
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("SEO & PPC"), "SEO &amp; PPC");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"q\""), "&quot;q&quot;");
    }

    #[test]
    fn test_escape_xml_drops_control_characters() {
        assert_eq!(escape_xml("a\u{0B}b\u{0}c\u{1F}"), "abc");
        assert_eq!(escape_xml("tab\there\n"), "tab\there\n");
        assert_eq!(escape_xml("caf\u{E9} \u{25B8}"), "caf\u{E9} \u{25B8}");
        assert_eq!(escape_xml("end\u{FFFF}"), "end");
    }

    #[test]
    fn test_font_table_declares_body_face_only() {
        let xml = font_table_xml();
        assert!(xml.contains(r#"w:name="Calibri""#));
        assert!(!xml.contains("Bebas Neue"));
    }

    #[test]
    fn test_headings_reference_display_face() {
        let xml = styles_xml();
        assert!(xml.contains(r#"w:styleId="Heading2""#));
        assert!(xml.contains(r#"w:ascii="Bebas Neue""#));
        assert!(xml.contains(r#"<w:outlineLvl w:val="2"/>"#));
    }

    #[test]
    fn test_document_rels_ids() {
        let rels = document_rels();
        assert_eq!(rels.header, "rId5");
        assert_eq!(rels.footer, "rId6");
        assert_eq!(rels.rels.len(), 6);
    }

    #[test]
    fn test_footer_has_page_field() {
        let meta = DocumentMeta::new("Audit", "Acme Plumbing");
        let xml = footer_xml(&meta);
        assert!(xml.contains("Acme Plumbing"));
        assert!(xml.contains(" PAGE "));
    }

    #[test]
    fn test_core_props_escape_title() {
        let meta = DocumentMeta::new("SEO & PPC", "");
        let xml = core_props_xml(&meta);
        assert!(xml.contains("<dc:title>SEO &amp; PPC</dc:title>"));
        assert!(!xml.contains("dc:subject"));
    }

    #[test]
    fn test_run_properties_order() {
        let style = style::cover_title_style();
        let props = run_properties(&style);
        assert!(props.starts_with("<w:rPr><w:rFonts"));
        assert!(props.contains(r#"<w:color w:val="0A1628"/>"#));
        assert!(props.contains(r#"<w:sz w:val="88"/>"#));
    }
}
