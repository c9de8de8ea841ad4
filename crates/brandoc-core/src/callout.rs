//! Blockquote callouts
//!
//! Contiguous `> ` lines form one callout box. A run whose first line is
//! an upstream progress message is dropped entirely.

use brandoc_ast::{Block, Callout, CalloutLine};

use crate::spans::parse_spans;

/// Word prefixes of upstream progress/status lines
pub const STATUS_PREFIXES: &[&str] = &[
    "Pulling",
    "Analyzing",
    "Building",
    "Generating",
    "Starting",
    "Researching",
    "Writing",
    "Phase",
    "Fetching",
    "Searching",
    "Gathering",
    "Data collect",
    "Found",
    "No DataForSEO",
    "DataForSEO",
    "Domain overview",
    "Package:",
    "Content type:",
];

/// Whether a line is a blockquote line (`> text`, or a bare `>`)
pub fn is_quote_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("> ") || trimmed == ">"
}

/// Strip the blockquote prefix from a line
pub fn strip_quote(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("> ")
        .or_else(|| trimmed.strip_prefix('>'))
        .unwrap_or(trimmed)
        .trim()
}

/// Whether the inner text of a blockquote line is a progress message.
///
/// Leading `**` and a `[i/n] ` counter are skipped before matching, so
/// `**[2/5] Researching mesa...**` counts.
pub fn is_status_line(inner: &str) -> bool {
    let mut text = inner.trim_start();
    text = text.strip_prefix("**").unwrap_or(text);
    if text.starts_with('[') {
        if let Some(end) = text.find("] ") {
            text = &text[end + 2..];
        }
    }
    STATUS_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// Consume the contiguous blockquote lines at the start of `lines`.
///
/// Returns how many lines were consumed (at least one) and the callout,
/// or `None` when the run is a status message or has no content.
pub fn scan_callout(lines: &[&str]) -> (usize, Option<Block>) {
    let consumed = lines
        .iter()
        .take_while(|line| is_quote_line(line))
        .count()
        .max(1);
    let run = &lines[..consumed.min(lines.len())];

    let Some(first) = run.first() else {
        return (consumed, None);
    };
    if is_status_line(strip_quote(first)) {
        log::debug!("Dropping status callout: {}", strip_quote(first));
        return (consumed, None);
    }

    let callout = build_callout(run);
    if callout.lines.is_empty() {
        return (consumed, None);
    }
    (consumed, Some(Block::Callout(callout)))
}

/// Build a callout from a blockquote run (prefixes optional)
pub fn build_callout(lines: &[&str]) -> Callout {
    Callout {
        lines: lines
            .iter()
            .filter_map(|line| classify_line(strip_quote(line)))
            .collect(),
    }
}

/// Classify one inner callout line; blank lines yield nothing
pub fn classify_line(inner: &str) -> Option<CalloutLine> {
    let text = inner.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(header) = standalone_bold(text) {
        return Some(CalloutLine::Header(header.to_string()));
    }
    if let Some(item) = text.strip_prefix("- ") {
        return Some(CalloutLine::Bullet(parse_spans(item.trim_start())));
    }
    Some(CalloutLine::Body(parse_spans(text)))
}

/// `**...**` with nothing outside the delimiters
fn standalone_bold(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("**")?.strip_suffix("**")?;
    if inner.trim().is_empty() || inner.contains("**") {
        return None;
    }
    Some(inner.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandoc_ast::Run;

    #[test]
    fn test_quote_lines() {
        assert!(is_quote_line("> hello"));
        assert!(is_quote_line(">"));
        assert!(!is_quote_line(">no space"));
        assert!(!is_quote_line("plain"));
    }

    #[test]
    fn test_status_lines() {
        assert!(is_status_line("Pulling SEO data for **acme.com**..."));
        assert!(is_status_line("Phase 2: Analyzing 3 competitor(s)"));
        assert!(is_status_line("**[2/5] Researching Mesa...**"));
        assert!(is_status_line("**Writing location page for Mesa...**"));
        assert!(!is_status_line("pulling lowercase is content"));
        assert!(!is_status_line("**KEY INSIGHT**"));
    }

    #[test]
    fn test_research_progress_lines_are_status() {
        assert!(is_status_line("Found 12 Maps competitors, 10 organic results"));
        assert!(is_status_line("No DataForSEO data returned, generating anyway"));
        assert!(is_status_line("DataForSEO research unavailable, generating anyway"));
        assert!(is_status_line("Domain overview: 1,204 keywords, 3,100 traffic"));
        assert!(is_status_line("Package: **Growth** ($2,500/mo)"));
        assert!(is_status_line("Content type: **Locations** | **5 pages**"));
    }

    #[test]
    fn test_research_progress_runs_render_nothing() {
        let lines = [
            "> Found 4 Maps competitors, 10 organic results",
            "",
            "> DataForSEO research unavailable, generating anyway",
        ];
        assert!(scan_callout(&lines[..1]).1.is_none());
        assert!(scan_callout(&lines[2..]).1.is_none());
    }

    #[test]
    fn test_status_run_is_dropped() {
        let lines = ["> Pulling backlink data...", "> more detail", "after"];
        let (consumed, block) = scan_callout(&lines);
        assert_eq!(consumed, 2);
        assert!(block.is_none());
    }

    #[test]
    fn test_key_insight_callout() {
        let lines = ["> **KEY INSIGHT**", "> - point one"];
        let (consumed, block) = scan_callout(&lines);
        assert_eq!(consumed, 2);
        let Some(Block::Callout(callout)) = block else {
            panic!("Expected callout");
        };
        assert_eq!(
            callout.lines,
            vec![
                CalloutLine::Header("KEY INSIGHT".to_string()),
                CalloutLine::Bullet(vec![Run::plain("point one")]),
            ]
        );
    }

    #[test]
    fn test_body_line_with_bold() {
        let line = classify_line("Your rival gets **3,124** visits").unwrap();
        assert_eq!(
            line,
            CalloutLine::Body(vec![
                Run::plain("Your rival gets "),
                Run::bold("3,124"),
                Run::plain(" visits"),
            ])
        );
    }

    #[test]
    fn test_two_bold_spans_are_not_a_header() {
        let line = classify_line("**One** and **two**").unwrap();
        assert!(matches!(line, CalloutLine::Body(_)));
    }

    #[test]
    fn test_blank_inner_lines_are_skipped() {
        let callout = build_callout(&["> first", ">", "> second"]);
        assert_eq!(callout.lines.len(), 2);
    }

    #[test]
    fn test_empty_run_builds_nothing() {
        let (consumed, block) = scan_callout(&[">", ">"]);
        assert_eq!(consumed, 2);
        assert!(block.is_none());
    }
}
