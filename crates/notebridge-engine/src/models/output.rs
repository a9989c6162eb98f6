use serde::{Deserialize, Serialize};

use super::rich_text::TextRun;

/// One block in the notes-workspace block model.
///
/// The variant set mirrors the target API's block types; the serialized form
/// carries the block type under a `type` tag the way the workspace names
/// them. Every `rich_text` field holds at least one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputBlock {
    #[serde(rename = "heading_1")]
    Heading1 { rich_text: Vec<TextRun> },
    #[serde(rename = "heading_2")]
    Heading2 { rich_text: Vec<TextRun> },
    #[serde(rename = "heading_3")]
    Heading3 { rich_text: Vec<TextRun> },
    Paragraph {
        rich_text: Vec<TextRun>,
    },
    BulletedListItem {
        rich_text: Vec<TextRun>,
    },
    NumberedListItem {
        rich_text: Vec<TextRun>,
    },
    ToDo {
        rich_text: Vec<TextRun>,
        checked: bool,
    },
    Code {
        rich_text: Vec<TextRun>,
        language: String,
    },
    Table {
        width: usize,
        has_header: bool,
        rows: Vec<OutputTableRow>,
    },
    Divider,
}

/// A table row; the converter guarantees `cells.len()` equals the owning
/// table's `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTableRow {
    pub cells: Vec<Vec<TextRun>>,
}
