//! Line classification for terminal-session transcripts.
//!
//! This is phase 2 of a conversion: the fence isolation in
//! [`crate::preprocess`] decides *which* text gets classified, the
//! [`Termynal`] classifier decides *what* each line of it is. Classification
//! runs on HTML-escaped text, which is why the default progress marker and
//! translated prompt markers use entity forms (`&gt;`).

pub mod blocks;

pub use blocks::Block;

use regex::Regex;

/// Per-instance settings for a [`Termynal`] conversion.
///
/// Immutable after construction; one instance is built per document pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermynalOptions {
    /// Terminal window title; rendered as a `data-ty-title` attribute when
    /// present.
    pub title: Option<String>,
    /// Literal strings that open a command line when followed by a space.
    pub prompt_literal_start: Vec<String>,
    /// Prefix marking a progress-bar line. Matched against escaped text,
    /// hence the entity form of the default.
    pub progress_literal_start: String,
    /// Prefix marking a comment line.
    pub comment_literal_start: String,
}

impl Default for TermynalOptions {
    fn default() -> Self {
        Self {
            title: None,
            prompt_literal_start: vec!["$".to_string()],
            progress_literal_start: "---&gt; 100%".to_string(),
            comment_literal_start: "# ".to_string(),
        }
    }
}

/// Compiles the prompt-alternation pattern from the configured markers.
///
/// Each marker is escaped for literal matching and trimmed, then angle
/// brackets are translated to their entity form so markers like `>>>` match
/// the escaped transcript. A trailing space is required after every marker.
fn prompt_regex(prompt_literal_start: &[String]) -> Regex {
    let alternation = prompt_literal_start
        .iter()
        .map(|marker| {
            let escaped = regex::escape(marker);
            let escaped = escaped.trim().replace('>', "&gt;").replace('<', "&lt;");
            format!("{escaped} ")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^({alternation})")).expect("escaped prompt markers form a valid pattern")
}

/// Classifies transcript lines into [`Block`]s and renders them to markup.
pub struct Termynal {
    title: Option<String>,
    prompt_re: Regex,
    progress_literal_start: String,
    comment_literal_start: String,
}

impl Termynal {
    pub fn new(options: TermynalOptions) -> Self {
        let prompt_re = prompt_regex(&options.prompt_literal_start);
        Self {
            title: options.title,
            prompt_re,
            progress_literal_start: options.progress_literal_start,
            comment_literal_start: options.comment_literal_start,
        }
    }

    /// Classifies the lines of one transcript into an ordered block sequence.
    ///
    /// Single forward pass carrying two pieces of state: whether a command
    /// continuation (trailing `\`) is active, and which block can still
    /// accumulate lines. Total: every line is assigned to exactly one block,
    /// except continuation text with no owning command, which is dropped.
    pub fn parse<'a, I>(&self, code_lines: I) -> Vec<Block>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parsed: Vec<Block> = Vec::new();
        let mut multiline = false;
        // Index of the last command or output block, cleared whenever a
        // comment or progress marker interrupts accumulation.
        let mut last: Option<usize> = None;

        for line in code_lines {
            if let Some(m) = self.prompt_re.find(line) {
                let used_prompt = m.as_str();
                // Keep the text after the last occurrence of the matched
                // prompt, so a command that repeats the prompt substring
                // contributes only its tail.
                let rest = line
                    .rsplit_once(used_prompt)
                    .map(|(_, rest)| rest)
                    .unwrap_or_default();
                parsed.push(Block::Command {
                    prompt: used_prompt.trim().to_string(),
                    lines: vec![rest.to_string()],
                });
                last = Some(parsed.len() - 1);
                multiline = line.ends_with('\\');
            } else if multiline {
                // Continuation lines belong to the command that opened the
                // continuation; anything else has no owner and is dropped.
                if let Some(i) = last
                    && let Some(Block::Command { lines, .. }) = parsed.get_mut(i)
                {
                    lines.push(line.to_string());
                }
                multiline = line.ends_with('\\');
            } else if line.starts_with(&self.comment_literal_start) {
                last = None;
                parsed.push(Block::Comment {
                    lines: vec![line.to_string()],
                });
            } else if line.starts_with(&self.progress_literal_start) {
                last = None;
                parsed.push(Block::Progress);
            } else if let Some(i) = last
                && let Some(Block::Output { lines }) = parsed.get_mut(i)
            {
                lines.push(line.to_string());
            } else {
                parsed.push(Block::Output {
                    lines: vec![line.to_string()],
                });
                last = Some(parsed.len() - 1);
            }
        }

        parsed
    }

    /// Parses an escaped transcript and renders it as one markup fragment.
    pub fn convert(&self, code: &str) -> String {
        crate::render::render(self.title.as_deref(), &self.parse(code.split('\n')))
    }
}
