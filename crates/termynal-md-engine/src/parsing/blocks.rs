/// A classified segment of a terminal-session transcript.
///
/// Classification is total: every input line lands in exactly one block.
/// Consecutive plain lines accumulate into a single [`Output`](Block::Output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A typed command with the prompt that introduced it.
    ///
    /// Lines after the first are continuation lines (the previous line ended
    /// with `\`), kept raw so the rendered command preserves its own breaks.
    Command { prompt: String, lines: Vec<String> },
    /// A comment line, kept verbatim including its marker.
    Comment { lines: Vec<String> },
    /// Plain output lines between commands.
    Output { lines: Vec<String> },
    /// A progress-bar marker; carries no text.
    Progress,
}

impl Block {
    /// Number of input lines this block accounts for.
    pub fn line_count(&self) -> usize {
        match self {
            Block::Command { lines, .. } | Block::Comment { lines } | Block::Output { lines } => {
                lines.len()
            }
            Block::Progress => 1,
        }
    }
}
