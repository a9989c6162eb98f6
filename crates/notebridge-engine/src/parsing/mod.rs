//! Markdown parsing: turns raw markdown text into a [`Document`] tree.
//!
//! The grammar is deliberately strict about structural syntax (unterminated
//! fences, tables without a separator row) so that malformed input surfaces
//! as a [`ParseError`] instead of a half-parsed tree; callers recover through
//! the line-oriented fallback in [`crate::convert::fallback`].

pub mod classify;
pub mod inline;

mod builder;

pub use inline::extract_runs;

use crate::models::Document;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated code fence opened on line {line}")]
    UnterminatedFence { line: usize },
    #[error("malformed table starting on line {line}")]
    MalformedTable { line: usize },
}

/// Parse a markdown string into a document tree.
///
/// Recognizes ATX headings, paragraphs, unordered (`-`/`*`) and ordered
/// (`N.`) lists with recursively parsed item bodies, fenced code blocks,
/// pipe tables with a separator row, and thematic breaks. Blank lines
/// separate blocks.
///
/// # Returns
/// The parsed [`Document`], or a [`ParseError`] when structural syntax is
/// malformed. No side effects either way.
pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    let lines: Vec<&str> = input.lines().collect();
    let blocks = builder::parse_blocks(&lines, 1)?;
    Ok(Document { blocks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockNode, TextRun};

    #[test]
    fn empty_input_parses_to_empty_document() {
        let doc = parse_document("").unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn whitespace_only_input_parses_to_empty_document() {
        let doc = parse_document("\n   \n\t\n").unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn mixed_document_block_order() {
        let doc = parse_document("# Title\n\nSome text\n\n- item\n\n```rust\ncode\n```\n\n---\n")
            .unwrap();

        assert_eq!(doc.blocks.len(), 5);
        assert!(matches!(doc.blocks[0], BlockNode::Heading { level: 1, .. }));
        assert!(matches!(doc.blocks[1], BlockNode::Paragraph { .. }));
        assert!(matches!(doc.blocks[2], BlockNode::List(_)));
        assert!(matches!(doc.blocks[3], BlockNode::CodeFence { .. }));
        assert!(matches!(doc.blocks[4], BlockNode::ThematicBreak));
    }

    #[test]
    fn unterminated_fence_is_a_parse_error() {
        let err = parse_document("```python\ndef f():").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedFence { line: 1 });
    }

    #[test]
    fn table_without_separator_is_a_parse_error() {
        let err = parse_document("| a | b |\n| 1 | 2 |\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedTable { line: 1 });
    }

    #[test]
    fn paragraph_joins_soft_breaks_with_a_space() {
        let doc = parse_document("first line\nsecond line\n").unwrap();
        assert_eq!(
            doc.blocks,
            vec![BlockNode::Paragraph {
                text: vec![TextRun::plain("first line second line")],
            }]
        );
    }

    #[test]
    fn heading_levels_parse_as_written() {
        let doc = parse_document("###### deep\n").unwrap();
        assert!(matches!(doc.blocks[0], BlockNode::Heading { level: 6, .. }));
    }
}
