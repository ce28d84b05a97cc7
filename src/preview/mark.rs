//! `==highlighted text==` inline extension.

use once_cell::sync::Lazy;
use regex::Regex;

static MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==([^=]+)==").expect("mark pattern is a valid regex"));

/// A run of inline text, either plain or highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Mark(&'a str),
}

/// Split `text` on `==…==` runs. Text without markers comes back as one
/// plain segment.
///
/// Callers pass one text run of the markdown event stream at a time, so a
/// marker pair must open and close inside that run. `==a *b* c==` spans an
/// emphasis and stays literal, as does a marker split across a line break.
pub fn split_marks(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in MARK_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Plain(&text[last..whole.start()]));
        }
        segments.push(Segment::Mark(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

pub fn has_marks(text: &str) -> bool {
    MARK_RE.is_match(text)
}
