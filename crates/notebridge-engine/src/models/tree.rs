use serde::{Deserialize, Serialize};

use super::rich_text::TextRun;

/// A parsed markdown document: a rooted, ordered forest of block nodes.
///
/// Built fresh by each parse call and never mutated afterwards; the tree owns
/// all of its nodes (no sharing, no cycles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<BlockNode>,
}

/// One block-level node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockNode {
    Heading {
        /// 1..=6 as written in the source; clamping happens at conversion.
        level: u8,
        text: Vec<TextRun>,
    },
    Paragraph {
        text: Vec<TextRun>,
    },
    List(List),
    CodeFence {
        language: Option<String>,
        content: String,
    },
    Table {
        header: Option<TableRow>,
        rows: Vec<TableRow>,
    },
    ThematicBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// A list item holds full block content: its own text parses as a leading
/// paragraph, nested lists and fences follow as further children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<Vec<TextRun>>,
}
