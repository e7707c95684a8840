//! Fenced-code-block detection over raw document text.
//!
//! A single forward pass over the lines yields the byte spans of every
//! well-formed fence, leftmost-first and non-overlapping. An opener with no
//! matching closer is not a fence; the scan resumes on the following line and
//! the text passes through untouched.

use regex::Regex;
use std::sync::OnceLock;

/// Byte spans of one fenced code block within the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSpan {
    /// Start of the opening fence line.
    pub start: usize,
    /// End of the closing fence line, before its line break.
    pub end: usize,
    /// Start of the body, just past the opener's line break.
    pub code_start: usize,
    /// End of the body, at the start of the closer line. The body therefore
    /// keeps the trailing line break of its last line.
    pub code_end: usize,
}

impl FenceSpan {
    /// The full matched fence, delimiters included.
    pub fn all<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }

    /// The inner code between the delimiters.
    pub fn code<'t>(&self, text: &'t str) -> &'t str {
        &text[self.code_start..self.code_end]
    }
}

/// Validates the rest of an opening fence line after the delimiter run:
/// an `{attrs}` block closing the line, or an optional (`.`-prefixed or
/// bare) language token plus an optional quoted `hl_lines` attribute.
/// Anything else (for example two bare words) disqualifies the opener.
fn info_string_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^ *(?:\{[^}]*\}|(?:\.?[\w#.+-]* *)?(?:hl_lines=(?:"[^"]*"|'[^']*') *)?)$"#)
            .expect("fence info-string pattern is valid")
    })
}

/// Returns the delimiter character and run length when the line begins with
/// three or more backticks or tildes.
fn delimiter_run(line: &str) -> Option<(char, usize)> {
    let ch = line.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let run = line.chars().take_while(|&c| c == ch).count();
    (run >= 3).then_some((ch, run))
}

/// A closer is a run of the opener's character, at least as long as the
/// opener, followed by nothing but spaces.
fn closes(line: &str, ch: char, open_len: usize) -> bool {
    let run = line.chars().take_while(|&c| c == ch).count();
    run >= open_len && line[run..].bytes().all(|b| b == b' ')
}

/// Scans `text` for fenced code blocks.
pub fn scan(text: &str) -> Vec<FenceSpan> {
    // Line starts are tracked as byte offsets so spans index straight into
    // the original text.
    let mut lines = Vec::new();
    let mut pos = 0;
    for line in text.split('\n') {
        lines.push((pos, line));
        pos += line.len() + 1;
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let (start, line) = lines[i];
        let Some((ch, open_len)) = delimiter_run(line) else {
            i += 1;
            continue;
        };
        if !info_string_re().is_match(&line[open_len..]) {
            i += 1;
            continue;
        }
        let Some(closer) = (i + 1..lines.len()).find(|&j| closes(lines[j].1, ch, open_len)) else {
            i += 1;
            continue;
        };
        let (closer_start, closer_line) = lines[closer];
        spans.push(FenceSpan {
            start,
            end: closer_start + closer_line.len(),
            code_start: start + line.len() + 1,
            code_end: closer_start,
        });
        i = closer + 1;
    }
    spans
}
