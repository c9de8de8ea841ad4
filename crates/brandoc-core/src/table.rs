//! Pipe-table lexer, classifier and builder
//!
//! A table is a run of contiguous lines beginning with `|`. Separator rows
//! (`|---|:--:|`) and rows without cells (a lone `|`) are skipped, the
//! first remaining row is the header and every body row is padded or
//! truncated to the header width.

use brandoc_ast::{Block, BrandColor, Cell, Table, TableKind};

use crate::spans::parse_spans;

/// Whether a line belongs to a pipe table
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Whether a line is a header/body separator row.
///
/// Only `-`, `:`, `|` and whitespace, with at least one `-` so that an
/// all-empty row like `| | |` still counts as content.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Split one table line into trimmed cell texts, dropping the empty
/// cells produced by the outer pipes
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line
        .trim()
        .split('|')
        .map(|c| c.trim().to_string())
        .collect();

    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Consume the contiguous table lines at the start of `lines`.
///
/// Returns how many lines were consumed (at least one) and the table
/// block, if any content row was found.
pub fn scan_table(lines: &[&str], accent: BrandColor) -> (usize, Option<Block>) {
    let consumed = lines
        .iter()
        .take_while(|line| is_table_line(line))
        .count()
        .max(1);
    let table = build_table(&lines[..consumed.min(lines.len())], accent);
    (consumed, table.map(Block::Table))
}

/// Build a table from an already-delimited run of pipe lines.
///
/// `accent` is the header fill a `Data` table takes; it comes from the
/// section the table appears in, not from the table itself.
pub fn build_table(lines: &[&str], accent: BrandColor) -> Option<Table> {
    let mut parsed = lines
        .iter()
        .filter(|line| !is_separator_row(line))
        .map(|line| split_cells(line))
        .filter(|cells| !cells.is_empty());

    let header_texts = parsed.next()?;
    let kind = TableKind::classify(header_texts.as_slice());
    let width = header_texts.len();

    let headers = header_texts.into_iter().map(to_cell).collect();
    let rows = parsed
        .map(|mut row| {
            row.resize(width, String::new());
            row.into_iter().map(to_cell).collect()
        })
        .collect();

    Some(Table {
        kind,
        accent,
        headers,
        rows,
    })
}

fn to_cell(text: String) -> Cell {
    if text.is_empty() {
        return Cell::empty();
    }
    let runs = parse_spans(&text);
    Cell::new(text, runs)
}
