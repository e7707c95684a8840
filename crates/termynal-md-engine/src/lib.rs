//! Core engine for termynal-md.
//!
//! Turns fenced code blocks annotated with a `<!-- termynal -->` marker
//! comment into the markup consumed by the termynal front-end widget, while
//! restoring every other fenced block byte for byte. The engine is a pure
//! text transform: no I/O, no configuration files, no logging.
//!
//! The pieces compose bottom-up:
//! - [`parsing`] classifies the lines of one terminal transcript into
//!   [`Block`]s (typed command, comment, output, progress marker),
//! - [`render`](render::render) serializes blocks into the widget markup,
//! - [`preprocess`] isolates fenced blocks behind placeholder lines and
//!   selectively converts the annotated ones,
//! - [`pipeline`] orders preprocessing stages by priority the way a host
//!   markdown pipeline does.

pub mod parsing;
pub mod pipeline;
pub mod preprocess;
pub mod render;

// Re-export key types for easier usage
pub use parsing::{Block, Termynal, TermynalOptions};
pub use pipeline::{Pipeline, Preprocessor};
pub use preprocess::TermynalPreprocessor;
