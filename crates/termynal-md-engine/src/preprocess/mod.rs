//! Fence isolation and selective conversion.
//!
//! [`TermynalPreprocessor`] runs in two phases over one document. Phase 1
//! replaces every fenced code block with a unique placeholder line, parking
//! the original text in a store so no other transform can touch it. Phase 2
//! walks the placeholder-substituted lines: placeholders flagged by a
//! preceding `<!-- termynal -->` marker comment are converted to widget
//! markup, all others are restored byte for byte.

pub mod fence;

use std::collections::HashMap;

use crate::parsing::{Termynal, TermynalOptions};
use crate::pipeline::Preprocessor;

/// Marker comment that flags the next fenced block for conversion. Consumed
/// during preprocessing, never re-emitted.
pub const TY_COMMENT: &str = "<!-- termynal -->";

/// Fixed placeholder prefix. Long and random-looking so that
/// `{MARKER}-{index}` tokens never collide with document content.
const MARKER: &str = "9HDrdgVBNLga";

/// The priority a generic fenced-code stage conventionally runs at; the
/// termynal stage must come earlier.
pub const FENCED_CODE_PRIORITY: u32 = 25;

/// Rewrites annotated fenced code blocks into terminal-widget markup.
///
/// Pure transform: one call processes one document's lines in isolation and
/// keeps no state between calls.
pub struct TermynalPreprocessor {
    options: TermynalOptions,
}

impl TermynalPreprocessor {
    pub fn new(options: TermynalOptions) -> Self {
        Self { options }
    }

    /// Transforms one document's lines.
    ///
    /// A restored fence or a converted block is pushed as a single element
    /// with embedded newlines; callers joining on `\n` get the original
    /// layout back.
    pub fn run(&self, lines: &[String]) -> Vec<String> {
        let text = lines.join("\n");

        // Phase 1: park every fence behind a placeholder line. The splice
        // pads the placeholder with blank lines so it never touches
        // surrounding text.
        let mut store: HashMap<String, (String, String)> = HashMap::new();
        let mut isolated = String::with_capacity(text.len());
        let mut tail = 0;
        for (i, span) in fence::scan(&text).iter().enumerate() {
            let placeholder = format!("{MARKER}-{i}");
            isolated.push_str(&text[tail..span.start]);
            isolated.push('\n');
            isolated.push_str(&placeholder);
            isolated.push('\n');
            store.insert(
                placeholder,
                (span.code(&text).to_string(), span.all(&text).to_string()),
            );
            tail = span.end;
        }
        isolated.push_str(&text[tail..]);

        let termynal = Termynal::new(self.options.clone());

        // Phase 2: convert flagged placeholders, restore the rest. Each
        // placeholder resolves at most once, hence the remove.
        let mut out = Vec::new();
        let mut pending = false;
        for line in isolated.split('\n') {
            if line.starts_with(TY_COMMENT) {
                pending = true;
                continue;
            }
            match store.remove(line) {
                Some((code, _)) if pending => {
                    out.push(termynal.convert(&escape(&code)));
                    pending = false;
                }
                Some((_, original)) => out.push(original),
                None => out.push(line.to_string()),
            }
        }
        out
    }
}

impl Preprocessor for TermynalPreprocessor {
    fn name(&self) -> &str {
        "termynal"
    }

    fn priority(&self) -> u32 {
        FENCED_CODE_PRIORITY + 10
    }

    fn run(&self, lines: Vec<String>) -> Vec<String> {
        TermynalPreprocessor::run(self, &lines)
    }
}

/// Escapes the four HTML-significant characters of fenced code before
/// classification; prompt and progress markers match the escaped form.
fn escape(code: &str) -> String {
    html_escape::encode_double_quoted_attribute(code).into_owned()
}
