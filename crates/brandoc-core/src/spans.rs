//! Inline emphasis parser
//!
//! Splits a line into plain, bold and italic runs. Two sequential passes:
//! `**bold**` first, then `*italic*` over the non-bold remainder. Spans are
//! neither nested nor overlapping, and a delimiter pair around fewer than
//! two characters stays literal text. Delimiters pair left to right, so a
//! rejected short pair is consumed as text and never borrows the opening
//! delimiter of the next span.

use std::sync::OnceLock;

use brandoc_ast::Run;
use regex::Regex;

fn bold_re() -> &'static Regex {
    static BOLD_RE: OnceLock<Regex> = OnceLock::new();
    BOLD_RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn italic_re() -> &'static Regex {
    static ITALIC_RE: OnceLock<Regex> = OnceLock::new();
    ITALIC_RE.get_or_init(|| Regex::new(r"\*([^*]+)\*").unwrap())
}

/// Shortest content a delimiter pair may wrap
const MIN_SPAN_CHARS: usize = 2;

fn is_span_content(inner: &str) -> bool {
    inner.chars().count() >= MIN_SPAN_CHARS
}

/// Parse a line of text into emphasis runs
///
/// # Example
///
/// ```
/// use brandoc_ast::Run;
/// use brandoc_core::parse_spans;
///
/// let runs = parse_spans("Rank **#1** in *Mesa*");
/// assert_eq!(
///     runs,
///     vec![
///         Run::plain("Rank "),
///         Run::bold("#1"),
///         Run::plain(" in "),
///         Run::italic("Mesa"),
///     ]
/// );
/// ```
pub fn parse_spans(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in bold_re().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_italic_pass(&text[last..whole.start()], &mut runs);
        if is_span_content(inner.as_str()) {
            runs.push(Run::bold(inner.as_str()));
        } else {
            push_plain(whole.as_str(), &mut runs);
        }
        last = whole.end();
    }
    push_italic_pass(&text[last..], &mut runs);

    runs
}

/// Second pass: italic spans inside a non-bold segment
fn push_italic_pass(segment: &str, runs: &mut Vec<Run>) {
    let mut last = 0;

    for caps in italic_re().captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&segment[last..whole.start()], runs);
        if is_span_content(inner.as_str()) {
            runs.push(Run::italic(inner.as_str()));
        } else {
            push_plain(whole.as_str(), runs);
        }
        last = whole.end();
    }
    push_plain(&segment[last..], runs);
}

/// Append unemphasized text, extending a trailing plain run
fn push_plain(text: &str, runs: &mut Vec<Run>) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if !last.is_emphasized() => last.text.push_str(text),
        _ => runs.push(Run::plain(text)),
    }
}
