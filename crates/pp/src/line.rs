//! Line normalization: the first stage of every run.
//!
//! The raw source text is split into physical lines, comments are cut at the
//! first `;`, surrounding whitespace is trimmed and blank results are
//! dropped. Each surviving line keeps the zero-based number it had in the
//! file it came from; numbering restarts inside every included file, so two
//! lines of one stream may share a number.

/// Starts a comment that runs to the end of the line. The dialect has no
/// escape for it, so a `;` inside a quoted literal also cuts the line.
pub const COMMENT_MARKER: char = ';';

/// One normalized source line paired with its original line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        SourceLine {
            number,
            text: text.into(),
        }
    }
}

/// Fold `\r\n` and stray `\r` into `\n` so splitting sees one convention.
pub fn fold_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split already `\n`-separated text into comment-stripped, trimmed,
/// non-empty numbered lines.
pub fn split_normalized(text: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    for (number, physical) in text.split('\n').enumerate() {
        let code = match physical.find(COMMENT_MARKER) {
            Some(at) => &physical[..at],
            None => physical,
        };
        let code = code.trim();
        if !code.is_empty() {
            lines.push(SourceLine::new(number, code));
        }
    }
    lines
}

/// Normalize raw source text into the line stream the rest of the pipeline
/// works on.
pub fn normalize(raw: &str) -> Vec<SourceLine> {
    split_normalized(&fold_newlines(raw))
}
