//! Markdown to notes-workspace block conversion.
//!
//! The pipeline is pure and total: [`convert_markdown`] parses markdown into
//! a document tree and converts it to the target block model, recovering
//! through a line-oriented fallback parser when the input defeats the
//! primary grammar. Every call builds its own tree and block sequence, so
//! concurrent calls share nothing.

pub mod convert;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use convert::{convert_document, fallback::parse_fallback};
pub use models::{
    BlockNode, Document, List, ListItem, OutputBlock, OutputTableRow, RunStyle, TableRow, TextRun,
};
pub use parsing::{ParseError, extract_runs, parse_document};

/// Convert raw markdown text into an ordered sequence of output blocks.
///
/// Never fails: a [`ParseError`] from the primary parser engages the
/// fallback line parser, so any input (including the empty string, which
/// yields zero blocks) produces a well-formed sequence.
pub fn convert_markdown(markdown: &str) -> Vec<OutputBlock> {
    match parsing::parse_document(markdown) {
        Ok(doc) => convert_document(&doc),
        Err(err) => {
            log::warn!("markdown parse failed ({err}), falling back to line parser");
            parse_fallback(markdown)
        }
    }
}
