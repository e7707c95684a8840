//! Preprocessing stage registry.
//!
//! Text transforms that run over a document's lines before rendering, the
//! way a markdown host pipeline orders its preprocessors. Stages with higher
//! priority run first; the termynal stage must run before any stage that
//! would reformat fenced code.

/// One line-level text transform.
pub trait Preprocessor {
    /// Symbolic name the stage is registered under.
    fn name(&self) -> &str;

    /// Execution order; higher runs earlier.
    fn priority(&self) -> u32;

    /// Transforms one document's lines.
    fn run(&self, lines: Vec<String>) -> Vec<String>;
}

/// An ordered set of preprocessing stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Preprocessor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stage. Stages keep registration order among equal
    /// priorities.
    pub fn register(&mut self, stage: Box<dyn Preprocessor>) {
        self.stages.push(stage);
        self.stages
            .sort_by_key(|s| std::cmp::Reverse(s.priority()));
    }

    /// Runs every stage over the document, highest priority first.
    pub fn run(&self, text: &str) -> String {
        let mut lines: Vec<String> = text.split('\n').map(|l| l.to_string()).collect();
        for stage in &self.stages {
            lines = stage.run(lines);
        }
        lines.join("\n")
    }
}
