//! Line-oriented fallback parser.
//!
//! Engaged when the primary parser rejects the input. Works line by line
//! with no recursion and no failure mode: every line matches at least the
//! paragraph default, so any string converts to some block sequence.
//!
//! Priority per line: thematic break, heading (1-3 only), checklist item,
//! bullet item, numbered item, pipe-table run, paragraph.

use std::sync::OnceLock;

use regex::Regex;

use super::heading_block;
use crate::models::{OutputBlock, OutputTableRow, TextRun};
use crate::parsing::inline::extract_runs;

fn divider_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-{3,}$").expect("invalid divider regex"))
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,3})\s+(.+)$").expect("invalid heading regex"))
}

fn checklist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-\s+\[([ xX])\]\s+(.*)$").expect("invalid checklist regex"))
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s+(.+)$").expect("invalid bullet regex"))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s+(.+)$").expect("invalid numbered regex"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("invalid separator regex"))
}

/// Convert markdown straight to output blocks, one block per recognized
/// line (one per contiguous table run).
pub fn parse_fallback(content: &str) -> Vec<OutputBlock> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if divider_re().is_match(trimmed) {
            blocks.push(OutputBlock::Divider);
            i += 1;
            continue;
        }

        if let Some(caps) = heading_re().captures(trimmed) {
            let level = caps[1].len() as u8;
            blocks.push(heading_block(level, extract_runs(&caps[2])));
            i += 1;
            continue;
        }

        if let Some(caps) = checklist_re().captures(trimmed) {
            blocks.push(OutputBlock::ToDo {
                rich_text: extract_runs(&caps[2]),
                checked: caps[1].eq_ignore_ascii_case("x"),
            });
            i += 1;
            continue;
        }

        if let Some(caps) = bullet_re().captures(trimmed) {
            blocks.push(OutputBlock::BulletedListItem {
                rich_text: extract_runs(&caps[1]),
            });
            i += 1;
            continue;
        }

        if let Some(caps) = numbered_re().captures(trimmed) {
            blocks.push(OutputBlock::NumberedListItem {
                rich_text: extract_runs(&caps[1]),
            });
            i += 1;
            continue;
        }

        if trimmed.starts_with('|') && trimmed[1..].contains('|') {
            let (table, next) = parse_table_run(&lines, i);
            if let Some(table) = table {
                blocks.push(table);
            }
            i = next;
            continue;
        }

        blocks.push(OutputBlock::Paragraph {
            rich_text: extract_runs(trimmed),
        });
        i += 1;
    }

    blocks
}

/// Consume a maximal run of `|`-lines; separator lines are skipped rather
/// than emitted. Header presence cannot be told apart from data here, so a
/// run with more than one surviving row is flagged as having one.
fn parse_table_run(lines: &[&str], start: usize) -> (Option<OutputBlock>, usize) {
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let t = lines[i].trim();
        if !t.starts_with('|') {
            break;
        }
        if separator_re().is_match(t) {
            i += 1;
            continue;
        }
        let inner = t.strip_prefix('|').unwrap_or(t);
        let inner = inner.strip_suffix('|').unwrap_or(inner);
        raw_rows.push(inner.split('|').map(|c| c.trim().to_string()).collect());
        i += 1;
    }

    if raw_rows.is_empty() {
        return (None, i);
    }

    let width = raw_rows.iter().map(Vec::len).max().unwrap_or(0);
    let has_header = raw_rows.len() > 1;
    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            let mut cells: Vec<Vec<TextRun>> = cells
                .into_iter()
                .map(|c| vec![TextRun::plain(c)])
                .collect();
            cells.resize_with(width, || vec![TextRun::plain("")]);
            OutputTableRow { cells }
        })
        .collect();

    (
        Some(OutputBlock::Table {
            width,
            has_header,
            rows,
        }),
        i,
    )
}
