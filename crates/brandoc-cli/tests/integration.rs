//! Integration tests for the brandoc CLI
//!
//! These drive the command functions end to end:
//! text or job file -> DOCX -> font embedding -> inspection.

use std::fs;
use std::io::Read;
use std::path::Path;

use brandoc_cli::{embed_font_command, inspect_command, render_command, OutputFormat, RenderOptions};
use tempfile::TempDir;
use zip::ZipArchive;

const REPORT: &str = "# LOCAL SEO AUDIT & GROWTH PLAN
Real Data. Real Opportunity. Real ROI.

<!-- COVER_END -->

> Pulling keyword data for Austin, TX...

## Executive Summary

Acme ranks for **12** of the top 50 local keywords.

| Keyword | Volume |
|---|---|
| emergency plumber | 1,900 |
";

const FONT: &[u8] = b"\x00\x01\x00\x00fake-font";

fn read_part(path: &Path, part: &str) -> Option<String> {
    let mut zip = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut file = zip.by_name(part).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    Some(contents)
}

fn write_font(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("display.ttf");
    fs::write(&path, FONT).unwrap();
    path
}

#[test]
fn test_render_text_with_font() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.md");
    fs::write(&input, REPORT).unwrap();
    let font = write_font(&dir);

    let output = render_command(&RenderOptions {
        input: input.clone(),
        recipient: Some("Acme Plumbing".to_string()),
        font: Some(font),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(output, dir.path().join("audit.docx"));
    let document = read_part(&output, "word/document.xml").unwrap();
    assert!(document.contains("Executive Summary"));
    assert!(!document.contains("Pulling keyword data"));

    let footer = read_part(&output, "word/footer1.xml").unwrap();
    assert!(footer.contains("Acme Plumbing"));
    let header = read_part(&output, "word/header1.xml").unwrap();
    assert!(header.contains("audit"));

    assert!(read_part(&output, "word/_rels/fontTable.xml.rels").is_some());
    let fonts = read_part(&output, "word/fontTable.xml").unwrap();
    assert!(fonts.contains("Bebas Neue"));
}

#[test]
fn test_render_job_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("record.json");
    let job = serde_json::json!({
        "content": REPORT,
        "client_name": "Acme Plumbing",
        "workflow_title": "SEO Market Analysis",
        "job_id": "job-7f3a",
    });
    fs::write(&input, job.to_string()).unwrap();

    let output = render_command(&RenderOptions {
        input,
        no_embed: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(output, dir.path().join("job-7f3a.docx"));
    let header = read_part(&output, "word/header1.xml").unwrap();
    assert!(header.contains("SEO Market Analysis"));
    assert!(read_part(&output, "word/_rels/fontTable.xml.rels").is_none());
}

#[test]
fn test_render_missing_font_still_writes() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.md");
    fs::write(&input, REPORT).unwrap();

    let output = render_command(&RenderOptions {
        input,
        font: Some(dir.path().join("missing.ttf")),
        ..Default::default()
    })
    .unwrap();

    assert!(output.exists());
    let fonts = read_part(&output, "word/fontTable.xml").unwrap();
    assert!(!fonts.contains("Bebas Neue"));
}

#[test]
fn test_render_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.md");
    fs::write(&input, REPORT).unwrap();
    write_font(&dir);
    fs::write(
        dir.path().join("brandoc.toml"),
        "[font]\npath = \"display.ttf\"\n\n[output]\ndir = \"out\"\n\n[document]\ntitle = \"Quarterly Review\"\n",
    )
    .unwrap();

    let output = render_command(&RenderOptions {
        input,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(output, dir.path().join("out").join("audit.docx"));
    let header = read_part(&output, "word/header1.xml").unwrap();
    assert!(header.contains("Quarterly Review"));
    assert!(read_part(&output, "word/fonts/BebasNeue-regular.ttf").is_some());
}

#[test]
fn test_render_missing_input() {
    let dir = TempDir::new().unwrap();
    let result = render_command(&RenderOptions {
        input: dir.path().join("nope.md"),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_embed_then_inspect() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("audit.md");
    fs::write(&input, REPORT).unwrap();
    let output = render_command(&RenderOptions {
        input,
        no_embed: true,
        ..Default::default()
    })
    .unwrap();

    let text = inspect_command(&output, OutputFormat::Text).unwrap();
    assert!(text.contains("declared: no"));
    assert!(text.contains("H2 Executive Summary"));

    let font = write_font(&dir);
    assert!(embed_font_command(&output, &font).unwrap());
    let once = fs::read(&output).unwrap();
    assert!(embed_font_command(&output, &font).unwrap());
    assert_eq!(fs::read(&output).unwrap(), once);

    let json = inspect_command(&output, OutputFormat::Json).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["font_declared"], true);
    assert_eq!(report["font_embedded"], true);
    assert_eq!(report["outline"][0]["type"], "cover-title");
}

#[test]
fn test_embed_font_missing_package() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    assert!(embed_font_command(&dir.path().join("none.docx"), &font).is_err());
}
