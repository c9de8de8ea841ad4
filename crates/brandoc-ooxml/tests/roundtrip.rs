//! Render, serialize and read back
//!
//! The outline recovered from a written package must carry the same
//! heading levels and table kinds as the rendered document.

use brandoc_ast::{Block, DocumentMeta, TableKind};
use brandoc_core::render;
use brandoc_ooxml::{inspect_package, DocxWriter, OutlineItem};

const REPORT: &str = "# SEO MARKET OPPORTUNITY & COMPETITIVE ANALYSIS
Real Data. Real Opportunity. Real ROI.

| | |
|---|---|
| **Client** | Acme Plumbing |
| **Market** | Austin, TX |

<!-- COVER_END -->

## Executive Summary

Acme ranks for **12** of the top 50 local keywords.

> **KEY INSIGHT**
> - Competitors own the *emergency* queries

### Keyword Gaps

| Keyword | Volume | Difficulty |
|---|---|---|
| emergency plumber | 1,900 | 41 |
| water heater repair | 880 |

## Recommendations

1. Build service pages
2. Fix citations
";

fn expected_outline(doc: &brandoc_ast::Document) -> Vec<OutlineItem> {
    doc.iter()
        .filter_map(|block| match block {
            Block::Heading(h) => Some(OutlineItem::Heading {
                level: h.level,
                text: h.text.clone(),
            }),
            Block::CoverTitle(t) => Some(OutlineItem::CoverTitle {
                text: format!("{} {}", t.kicker, t.title),
            }),
            Block::Table(t) => Some(OutlineItem::Table {
                kind: t.kind,
                columns: t.columns(),
            }),
            _ => None,
        })
        .collect()
}

#[test]
fn test_outline_survives_serialization() {
    let doc = render(REPORT);
    let bytes = DocxWriter::new(DocumentMeta::new("SEO Analysis", "Acme Plumbing"))
        .generate(&doc)
        .unwrap();

    let outline = inspect_package(&bytes).unwrap();
    assert_eq!(outline, expected_outline(&doc));
}

#[test]
fn test_table_kinds_recovered() {
    let doc = render(REPORT);
    let bytes = DocxWriter::new(DocumentMeta::default())
        .generate(&doc)
        .unwrap();

    let kinds: Vec<_> = inspect_package(&bytes)
        .unwrap()
        .into_iter()
        .filter_map(|item| match item {
            OutlineItem::Table { kind, columns } => Some((kind, columns)),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![(TableKind::Info, 2), (TableKind::Data, 3)]);
}

#[test]
fn test_heading_levels_recovered() {
    let doc = render("## One\n### Two\n## Three\n# Plain title after cover");
    let bytes = DocxWriter::new(DocumentMeta::default())
        .generate(&doc)
        .unwrap();

    let levels: Vec<u8> = inspect_package(&bytes)
        .unwrap()
        .into_iter()
        .filter_map(|item| match item {
            OutlineItem::Heading { level, .. } => Some(level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![2, 3, 2, 1]);
}

#[test]
fn test_callouts_are_not_tables() {
    let doc = render("> **KEY INSIGHT**\n> - one");
    let bytes = DocxWriter::new(DocumentMeta::default())
        .generate(&doc)
        .unwrap();
    assert!(inspect_package(&bytes).unwrap().is_empty());
}
