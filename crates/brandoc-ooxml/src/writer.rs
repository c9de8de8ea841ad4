//! DOCX writer
//!
//! Serializes a [`Document`] into a complete WordprocessingML package. The
//! document body is built by appending XML to a single buffer; every
//! block kind is handled by one exhaustive match in [`DocxWriter::generate_block`].
//!
//! Writing is blocking file I/O. Async callers should run it on a
//! blocking worker, and two writers must not target the same path at once.

use std::path::Path;

use brandoc_ast::{
    Block, BrandColor, Callout, CalloutLine, Cell, CoverTitle, Document, DocumentMeta, Heading,
    Run, Table, TableKind,
};
use brandoc_core::style::{
    self, RunStyle, SpanContext, CALLOUT_FILL, CALLOUT_MARKER, INFO_LABEL_PERCENT, ON_DARK_ACCENT,
};

use crate::archive::{OoxmlArchive, DOCUMENT_PART};
use crate::error::Result;
use crate::parts::{self, escape_xml, page, run_properties, run_xml, BULLET_NUM_ID, R_NS, W_NS};

/// Border color used for table grids
const GRID_COLOR: &str = "D0D7E2";

/// DOCX writer for rendered reports
pub struct DocxWriter {
    /// Page header and footer metadata
    meta: DocumentMeta,
    /// Document body being built
    output: String,
}

impl DocxWriter {
    /// Create a writer for a document with the given header/footer metadata
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            meta,
            output: String::new(),
        }
    }

    /// Build the full package in memory
    pub fn package(&mut self, doc: &Document) -> OoxmlArchive {
        let rels = parts::document_rels();
        let document_xml = self.generate_document_xml(doc, &rels.header, &rels.footer);

        let mut archive = OoxmlArchive::new();
        archive.set_string(parts::CONTENT_TYPES_PART, parts::content_types_xml());
        archive.set_string(parts::ROOT_RELS_PART, parts::root_rels_xml());
        archive.set_string(parts::CORE_PROPS_PART, parts::core_props_xml(&self.meta));
        archive.set_string(DOCUMENT_PART, document_xml);
        archive.set_string(parts::DOCUMENT_RELS_PART, rels.rels.to_xml());
        archive.set_string(parts::STYLES_PART, parts::styles_xml());
        archive.set_string(parts::SETTINGS_PART, parts::settings_xml());
        archive.set_string(parts::NUMBERING_PART, parts::numbering_xml());
        archive.set_string(parts::FONT_TABLE_PART, parts::font_table_xml());
        archive.set_string(parts::HEADER_PART, parts::header_xml(&self.meta));
        archive.set_string(parts::FOOTER_PART, parts::footer_xml(&self.meta));
        archive
    }

    /// Serialize a document to package bytes
    pub fn generate(&mut self, doc: &Document) -> Result<Vec<u8>> {
        log::debug!("Writing package with {} blocks", doc.len());
        self.package(doc).to_bytes()
    }

    /// Serialize a document and write it to `path`
    pub fn write_to_path<P: AsRef<Path>>(&mut self, doc: &Document, path: P) -> Result<()> {
        let bytes = self.generate(doc)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document, header_id: &str, footer_id: &str) -> String {
        self.output.clear();

        self.output.push_str(parts::XML_DECL);
        self.output.push('\n');
        self.output.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            W_NS, R_NS
        ));
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        for block in doc {
            self.generate_block(block);
        }

        self.generate_section_properties(header_id, footer_id);

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => self.generate_heading(heading),
            Block::CoverTitle(title) => self.generate_cover_title(title),
            Block::Subtitle(runs) => {
                self.generate_paragraph(Some("Subtitle"), runs, SpanContext::Subtitle)
            }
            Block::Paragraph(runs) => self.generate_paragraph(None, runs, SpanContext::Body),
            Block::BulletItem(runs) => self.generate_bullet(runs),
            Block::NumberedItem { number, runs } => self.generate_numbered(*number, runs),
            Block::Table(table) => self.generate_table(table),
            Block::Callout(callout) => self.generate_callout(callout),
            Block::Rule => {
                self.output.push_str(&format!(
                    r#"<w:p><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="8" w:space="1" w:color="{}"/></w:pBdr><w:spacing w:before="120" w:after="120"/></w:pPr></w:p>"#,
                    BrandColor::Mist.hex()
                ));
                self.output.push('\n');
            }
            Block::PageBreak => {
                self.output
                    .push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n");
            }
            Block::Spacer => {
                self.output
                    .push_str("<w:p><w:pPr><w:pStyle w:val=\"Spacer\"/></w:pPr></w:p>\n");
            }
        }
    }

    fn generate_heading(&mut self, heading: &Heading) {
        let level = heading.level.clamp(1, 3);
        self.output.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading{}\"/></w:pPr>",
            level
        ));
        let style = style::heading_style(level, heading.color);
        self.output.push_str(&run_xml(&heading.text, &style));
        self.output.push_str("</w:p>\n");
    }

    /// The kicker and the title go into separate centered paragraphs
    fn generate_cover_title(&mut self, title: &CoverTitle) {
        self.output
            .push_str("<w:p><w:pPr><w:pStyle w:val=\"CoverKicker\"/></w:pPr>");
        self.output
            .push_str(&run_xml(&title.kicker, &style::cover_kicker_style()));
        self.output.push_str("</w:p>\n");

        self.output
            .push_str("<w:p><w:pPr><w:pStyle w:val=\"Title\"/></w:pPr>");
        self.output
            .push_str(&run_xml(&title.title, &style::cover_title_style()));
        self.output.push_str("</w:p>\n");
    }

    fn generate_paragraph(&mut self, style_id: Option<&str>, runs: &[Run], context: SpanContext) {
        self.output.push_str("<w:p>");
        if let Some(id) = style_id {
            self.output
                .push_str(&format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>", id));
        }
        self.generate_runs(runs, context);
        self.output.push_str("</w:p>\n");
    }

    fn generate_bullet(&mut self, runs: &[Run]) {
        self.output.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"ListBullet\"/><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr></w:pPr>",
            BULLET_NUM_ID
        ));
        self.generate_runs(runs, SpanContext::Body);
        self.output.push_str("</w:p>\n");
    }

    /// Numbered items keep the number written in the source
    fn generate_numbered(&mut self, number: u32, runs: &[Run]) {
        self.output
            .push_str("<w:p><w:pPr><w:pStyle w:val=\"ListNumber\"/></w:pPr>");
        let marker = RunStyle {
            color: BrandColor::Blue,
            bold: true,
            ..style::run_style(SpanContext::Body, &Run::plain(""))
        };
        self.output.push_str(&format!(
            r#"<w:r>{}<w:t>{}.</w:t><w:tab/></w:r>"#,
            run_properties(&marker),
            number
        ));
        self.generate_runs(runs, SpanContext::Body);
        self.output.push_str("</w:p>\n");
    }

    fn generate_runs(&mut self, runs: &[Run], context: SpanContext) {
        for run in runs {
            let style = style::run_style(context, run);
            self.output.push_str(&run_xml(&run.text, &style));
        }
    }

    fn generate_table(&mut self, table: &Table) {
        if table.columns() == 0 {
            // Word rejects a row without cells
            log::warn!("Skipping table without columns");
            return;
        }
        let columns = table.columns();
        let widths = column_widths(table.kind, columns);

        self.output.push_str("<w:tbl>\n");
        self.output.push_str("<w:tblPr>");
        let style_id = match table.kind {
            TableKind::Info => "InfoTable",
            TableKind::Data => "DataTable",
        };
        self.output
            .push_str(&format!("<w:tblStyle w:val=\"{}\"/>", style_id));
        self.output.push_str(&format!(
            "<w:tblW w:w=\"{}\" w:type=\"dxa\"/>",
            page::TEXT_WIDTH
        ));
        self.output.push_str(&grid_borders(table.kind));
        self.output.push_str("<w:tblLayout w:type=\"fixed\"/>");
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>");
        for width in &widths {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>", width));
        }
        self.output.push_str("</w:tblGrid>\n");

        match table.kind {
            TableKind::Info => {
                if table.rows.is_empty() {
                    // A table needs at least one row to be valid
                    let blank = vec![Cell::empty(); columns];
                    self.generate_info_row(&blank, &widths);
                }
                for row in &table.rows {
                    self.generate_info_row(row, &widths);
                }
            }
            TableKind::Data => {
                self.output
                    .push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
                for (cell, width) in table.headers.iter().zip(&widths) {
                    self.generate_cell(
                        cell,
                        *width,
                        Some(table.accent),
                        SpanContext::TableHeader,
                    );
                }
                self.output.push_str("</w:tr>\n");

                for (index, row) in table.rows.iter().enumerate() {
                    let fill = style::zebra_fill(index);
                    self.output.push_str("<w:tr>");
                    for (cell, width) in row.iter().zip(&widths) {
                        self.generate_cell(cell, *width, fill, SpanContext::TableCell);
                    }
                    self.output.push_str("</w:tr>\n");
                }
            }
        }

        self.output.push_str("</w:tbl>\n");
        self.output.push_str("<w:p><w:pPr><w:pStyle w:val=\"Spacer\"/></w:pPr></w:p>\n");
    }

    /// Label cell shaded, value cell plain
    fn generate_info_row(&mut self, row: &[Cell], widths: &[u32]) {
        self.output.push_str("<w:tr>");
        for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
            if index == 0 {
                self.generate_cell(cell, *width, Some(BrandColor::Mist), SpanContext::InfoLabel);
            } else {
                self.generate_cell(cell, *width, None, SpanContext::TableCell);
            }
        }
        self.output.push_str("</w:tr>\n");
    }

    fn generate_cell(
        &mut self,
        cell: &Cell,
        width: u32,
        fill: Option<BrandColor>,
        context: SpanContext,
    ) {
        self.output.push_str("<w:tc><w:tcPr>");
        self.output
            .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>", width));
        if let Some(color) = fill {
            self.output.push_str(&shading(color));
        }
        self.output.push_str("<w:vAlign w:val=\"center\"/></w:tcPr>");
        self.output
            .push_str("<w:p><w:pPr><w:spacing w:before=\"60\" w:after=\"60\"/></w:pPr>");
        self.generate_runs(&cell.runs, context);
        self.output.push_str("</w:p></w:tc>");
    }

    /// A callout is a single-cell table filled with the callout color
    fn generate_callout(&mut self, callout: &Callout) {
        let width = page::TEXT_WIDTH;
        self.output.push_str("<w:tbl>\n");
        self.output.push_str(&format!(
            "<w:tblPr><w:tblStyle w:val=\"CalloutBox\"/><w:tblW w:w=\"{w}\" w:type=\"dxa\"/><w:tblBorders><w:left w:val=\"single\" w:sz=\"24\" w:space=\"0\" w:color=\"{a}\"/></w:tblBorders><w:tblLayout w:type=\"fixed\"/><w:tblCellMar><w:top w:w=\"160\" w:type=\"dxa\"/><w:left w:w=\"240\" w:type=\"dxa\"/><w:bottom w:w=\"160\" w:type=\"dxa\"/><w:right w:w=\"240\" w:type=\"dxa\"/></w:tblCellMar></w:tblPr>\n",
            w = width,
            a = ON_DARK_ACCENT.hex()
        ));
        self.output
            .push_str(&format!("<w:tblGrid><w:gridCol w:w=\"{}\"/></w:tblGrid>\n", width));
        self.output.push_str("<w:tr><w:tc><w:tcPr>");
        self.output
            .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>", width));
        self.output.push_str(&shading(CALLOUT_FILL));
        self.output.push_str("</w:tcPr>");

        if callout.lines.is_empty() {
            self.output.push_str("<w:p/>");
        }
        for line in &callout.lines {
            self.output
                .push_str("<w:p><w:pPr><w:spacing w:before=\"40\" w:after=\"40\"/></w:pPr>");
            match line {
                CalloutLine::Header(text) => {
                    self.output
                        .push_str(&run_xml(text, &style::callout_header_style()));
                }
                CalloutLine::Bullet(runs) => {
                    let marker = RunStyle {
                        color: ON_DARK_ACCENT,
                        ..style::run_style(SpanContext::Callout, &Run::plain(""))
                    };
                    self.output
                        .push_str(&run_xml(&format!("{} ", CALLOUT_MARKER), &marker));
                    self.generate_runs(runs, SpanContext::Callout);
                }
                CalloutLine::Body(runs) => self.generate_runs(runs, SpanContext::Callout),
            }
            self.output.push_str("</w:p>");
        }

        self.output.push_str("</w:tc></w:tr>\n");
        self.output.push_str("</w:tbl>\n");
        self.output.push_str("<w:p><w:pPr><w:pStyle w:val=\"Spacer\"/></w:pPr></w:p>\n");
    }

    fn generate_section_properties(&mut self, header_id: &str, footer_id: &str) {
        self.output.push_str("<w:sectPr>");
        self.output.push_str(&format!(
            "<w:headerReference w:type=\"default\" r:id=\"{}\"/>",
            escape_xml(header_id)
        ));
        self.output.push_str(&format!(
            "<w:footerReference w:type=\"default\" r:id=\"{}\"/>",
            escape_xml(footer_id)
        ));
        self.output.push_str(&format!(
            "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>",
            page::WIDTH,
            page::HEIGHT
        ));
        self.output.push_str(&format!(
            "<w:pgMar w:top=\"{m}\" w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" w:header=\"{h}\" w:footer=\"{h}\" w:gutter=\"0\"/>",
            m = page::MARGIN,
            h = page::HEADER_DISTANCE
        ));
        self.output.push_str("</w:sectPr>\n");
    }
}

/// Column widths in twips. Info tables give the label a fixed share.
fn column_widths(kind: TableKind, columns: usize) -> Vec<u32> {
    let total = page::TEXT_WIDTH;
    match kind {
        TableKind::Info if columns == 2 => {
            let label = total * INFO_LABEL_PERCENT / 100;
            vec![label, total - label]
        }
        _ => {
            let each = total / columns as u32;
            let mut widths = vec![each; columns];
            if let Some(last) = widths.last_mut() {
                *last += total - each * columns as u32;
            }
            widths
        }
    }
}

fn grid_borders(kind: TableKind) -> String {
    let inner = match kind {
        TableKind::Info => "single",
        TableKind::Data => "nil",
    };
    format!(
        "<w:tblBorders><w:top w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/><w:left w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/><w:bottom w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/><w:right w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/><w:insideH w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/><w:insideV w:val=\"{i}\" w:sz=\"4\" w:space=\"0\" w:color=\"{c}\"/></w:tblBorders>",
        c = GRID_COLOR,
        i = inner
    )
}

fn shading(color: BrandColor) -> String {
    format!(
        "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>",
        color.hex()
    )
}
