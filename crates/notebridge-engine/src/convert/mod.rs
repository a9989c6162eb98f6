//! Conversion from the parsed document tree to output blocks.
//!
//! The dispatch is an exhaustive match over [`BlockNode`], so adding a tree
//! variant without deciding its conversion is a compile error. Conversion is
//! total: a node converts to zero, one, or many blocks, never to a failure.

pub mod fallback;

use std::sync::OnceLock;

use regex::Regex;

use crate::models::rich_text::{flatten_runs, runs_are_blank};
use crate::models::{
    BlockNode, Document, List, ListItem, OutputBlock, OutputTableRow, TableRow, TextRun,
};

/// Deepest heading level the target workspace supports; deeper source
/// headings degrade to this level.
const MAX_HEADING_LEVEL: u8 = 3;

/// Language label the target expects when a fence has no tag.
const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Leading `[ ]` / `[x]` checklist marker on an item's flattened text.
fn checklist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[([ xX])\]\s*").expect("invalid checklist regex"))
}

/// Convert a whole document tree into an ordered block sequence.
pub fn convert_document(doc: &Document) -> Vec<OutputBlock> {
    let mut out = Vec::new();
    for node in &doc.blocks {
        convert_node(node, &mut out);
    }
    out
}

fn convert_node(node: &BlockNode, out: &mut Vec<OutputBlock>) {
    match node {
        BlockNode::Heading { level, text } => {
            out.push(heading_block(*level, text.clone()));
        }
        BlockNode::Paragraph { text } => {
            // empty paragraphs are structural markdown artifacts, not content
            if !runs_are_blank(text) {
                out.push(OutputBlock::Paragraph {
                    rich_text: text.clone(),
                });
            }
        }
        BlockNode::List(list) => convert_list(list, out),
        BlockNode::CodeFence { language, content } => {
            let language = match language.as_deref() {
                Some(tag) if !tag.trim().is_empty() => tag.to_string(),
                _ => DEFAULT_CODE_LANGUAGE.to_string(),
            };
            out.push(OutputBlock::Code {
                rich_text: vec![TextRun::plain(content.clone())],
                language,
            });
        }
        BlockNode::Table { header, rows } => {
            if let Some(block) = convert_table(header.as_ref(), rows) {
                out.push(block);
            }
        }
        BlockNode::ThematicBreak => out.push(OutputBlock::Divider),
    }
}

/// Levels 4-6 degrade to the deepest supported heading.
pub(crate) fn heading_block(level: u8, rich_text: Vec<TextRun>) -> OutputBlock {
    match level.min(MAX_HEADING_LEVEL) {
        1 => OutputBlock::Heading1 { rich_text },
        2 => OutputBlock::Heading2 { rich_text },
        _ => OutputBlock::Heading3 { rich_text },
    }
}

fn convert_list(list: &List, out: &mut Vec<OutputBlock>) {
    for item in &list.items {
        convert_list_item(item, list.ordered, out);
    }
}

/// One item expands into a block sequence: its own list-item (or to_do)
/// block first, then its nested blocks as siblings.
fn convert_list_item(item: &ListItem, ordered: bool, out: &mut Vec<OutputBlock>) {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut nested: Vec<&BlockNode> = Vec::new();
    for child in &item.children {
        match child {
            BlockNode::Paragraph { text } => runs.extend(text.iter().cloned()),
            other => nested.push(other),
        }
    }

    if !runs_are_blank(&runs) {
        out.push(item_block(runs, ordered));
    }
    for child in nested {
        convert_node(child, out);
    }
}

/// Checklist markers win over the list kind; otherwise the kind decided at
/// parse time picks the item block type.
fn item_block(runs: Vec<TextRun>, ordered: bool) -> OutputBlock {
    let flat = flatten_runs(&runs);
    if let Some(caps) = checklist_re().captures(&flat) {
        let checked = caps[1].eq_ignore_ascii_case("x");
        let mut rich_text = strip_prefix_runs(runs, caps[0].len());
        if rich_text.is_empty() {
            rich_text.push(TextRun::plain(""));
        }
        return OutputBlock::ToDo { rich_text, checked };
    }

    if ordered {
        OutputBlock::NumberedListItem { rich_text: runs }
    } else {
        OutputBlock::BulletedListItem { rich_text: runs }
    }
}

/// Drop the first `prefix_len` bytes of flattened text from the run
/// sequence, preserving the styling of everything after it.
///
/// Well-defined because run contents concatenate to exactly the flattened
/// text, so the boundary always lands on a run's char boundary.
fn strip_prefix_runs(runs: Vec<TextRun>, prefix_len: usize) -> Vec<TextRun> {
    let mut remaining = prefix_len;
    let mut out = Vec::with_capacity(runs.len());
    for mut run in runs {
        if remaining == 0 {
            out.push(run);
        } else if run.content.len() <= remaining {
            remaining -= run.content.len();
        } else {
            run.content = run.content.split_off(remaining);
            remaining = 0;
            out.push(run);
        }
    }
    out
}

/// Pad every row to the widest observed cell count; cell text is flattened
/// to plain runs since the target's table cells carry no annotations.
fn convert_table(header: Option<&TableRow>, rows: &[TableRow]) -> Option<OutputBlock> {
    let all: Vec<&TableRow> = header.into_iter().chain(rows.iter()).collect();
    if all.is_empty() {
        return None;
    }

    let width = all.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let out_rows = all
        .iter()
        .map(|row| {
            let mut cells: Vec<Vec<TextRun>> = row
                .cells
                .iter()
                .map(|cell| vec![TextRun::plain(flatten_runs(cell))])
                .collect();
            cells.resize_with(width, || vec![TextRun::plain("")]);
            OutputTableRow { cells }
        })
        .collect();

    Some(OutputBlock::Table {
        width,
        has_header: header.is_some(),
        rows: out_rows,
    })
}
