//! Groups classified lines into [`BlockNode`]s.
//!
//! List-item bodies are dedented and re-parsed with the same grammar, which
//! is what makes nested lists and fenced code inside items come out as real
//! child blocks rather than smeared text.

use super::ParseError;
use super::classify::{LineClass, ListMarker, classify_line};
use super::inline::extract_runs;
use crate::models::{BlockNode, List, ListItem, TableRow};

/// Parse a slice of lines into block nodes.
///
/// `first_line` is the 1-based source line number of `lines[0]`, carried
/// through recursion so errors point at the original input.
pub(crate) fn parse_blocks(lines: &[&str], first_line: usize) -> Result<Vec<BlockNode>, ParseError> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match classify_line(lines[i]) {
            LineClass::Blank => i += 1,
            LineClass::ThematicBreak => {
                blocks.push(BlockNode::ThematicBreak);
                i += 1;
            }
            LineClass::Heading { level, rest } => {
                blocks.push(BlockNode::Heading {
                    level,
                    text: extract_runs(&rest),
                });
                i += 1;
            }
            LineClass::FenceDelimiter { language } => {
                let (block, next) = parse_fence(lines, i, first_line, language)?;
                blocks.push(block);
                i = next;
            }
            LineClass::ListMarker(marker) => {
                let (list, next) = parse_list(lines, i, first_line, marker)?;
                blocks.push(BlockNode::List(list));
                i = next;
            }
            LineClass::TablePipe => {
                let (block, next) = parse_table(lines, i, first_line)?;
                blocks.push(block);
                i = next;
            }
            LineClass::Text => {
                let (block, next) = parse_paragraph(lines, i);
                blocks.push(block);
                i = next;
            }
        }
    }

    Ok(blocks)
}

/// A paragraph is a maximal run of `Text` lines; soft breaks join with a
/// space.
fn parse_paragraph(lines: &[&str], start: usize) -> (BlockNode, usize) {
    let mut j = start;
    let mut parts: Vec<&str> = Vec::new();
    while j < lines.len() {
        if let LineClass::Text = classify_line(lines[j]) {
            parts.push(lines[j].trim());
            j += 1;
        } else {
            break;
        }
    }

    let joined = parts.join(" ");
    (
        BlockNode::Paragraph {
            text: extract_runs(&joined),
        },
        j,
    )
}

fn parse_fence(
    lines: &[&str],
    open: usize,
    first_line: usize,
    language: Option<String>,
) -> Result<(BlockNode, usize), ParseError> {
    let mut j = open + 1;
    while j < lines.len() {
        if matches!(classify_line(lines[j]), LineClass::FenceDelimiter { .. }) {
            let content = lines[open + 1..j].join("\n");
            return Ok((BlockNode::CodeFence { language, content }, j + 1));
        }
        j += 1;
    }
    Err(ParseError::UnterminatedFence {
        line: first_line + open,
    })
}

fn parse_table(
    lines: &[&str],
    start: usize,
    first_line: usize,
) -> Result<(BlockNode, usize), ParseError> {
    let mut j = start;
    while j < lines.len() && matches!(classify_line(lines[j]), LineClass::TablePipe) {
        j += 1;
    }

    let run = &lines[start..j];
    if run.len() < 2 || !is_separator_row(run[1]) {
        return Err(ParseError::MalformedTable {
            line: first_line + start,
        });
    }

    let header = parse_table_row(run[0]);
    let rows = run[2..].iter().map(|l| parse_table_row(l)).collect();
    Ok((
        BlockNode::Table {
            header: Some(header),
            rows,
        },
        j,
    ))
}

/// `|---|:---:|` style separator: every cell is dashes with optional colons.
fn is_separator_row(line: &str) -> bool {
    let t = line.trim();
    let inner = t.strip_prefix('|').unwrap_or(t);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut saw_cell = false;
    for cell in inner.split('|') {
        let c = cell.trim();
        let c = c.strip_prefix(':').unwrap_or(c);
        let c = c.strip_suffix(':').unwrap_or(c);
        if c.is_empty() || !c.chars().all(|ch| ch == '-') {
            return false;
        }
        saw_cell = true;
    }
    saw_cell
}

fn parse_table_row(line: &str) -> TableRow {
    let t = line.trim();
    let inner = t.strip_prefix('|').unwrap_or(t);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    TableRow {
        cells: inner.split('|').map(|c| extract_runs(c.trim())).collect(),
    }
}

/// Parse a run of same-kind, same-indent marker lines into one list.
///
/// Each item consumes its marker line plus any following lines indented to
/// its content column; that body is dedented and parsed recursively into the
/// item's children. A blank line, an outdented line, or a marker of the
/// other kind ends the list.
fn parse_list(
    lines: &[&str],
    start: usize,
    first_line: usize,
    first_marker: ListMarker,
) -> Result<(List, usize), ParseError> {
    let list_indent = first_marker.indent;
    let ordered = first_marker.ordered;
    let mut items = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let marker = match classify_line(lines[i]) {
            LineClass::ListMarker(m) if m.indent == list_indent && m.ordered == ordered => m,
            _ => break,
        };

        let mut body: Vec<String> = vec![marker.rest.clone()];
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if line.trim().is_empty() {
                break;
            }
            let indent = leading_whitespace(line);
            if indent < marker.content_col {
                break;
            }
            body.push(line[marker.content_col..].to_string());
            j += 1;
        }

        let body_refs: Vec<&str> = body.iter().map(String::as_str).collect();
        let children = parse_blocks(&body_refs, first_line + i)?;
        items.push(ListItem { children });
        i = j;
    }

    Ok((List { ordered, items }, i))
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TextRun;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Vec<BlockNode> {
        let lines: Vec<&str> = input.lines().collect();
        parse_blocks(&lines, 1).unwrap()
    }

    #[test]
    fn simple_list_items() {
        let blocks = parse("- one\n- two\n");
        let BlockNode::List(list) = &blocks[0] else {
            panic!("expected list, got {blocks:?}");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        assert_eq!(
            list.items[0].children,
            vec![BlockNode::Paragraph {
                text: vec![TextRun::plain("one")],
            }]
        );
    }

    #[test]
    fn ordered_list_detected_by_marker() {
        let blocks = parse("1. first\n2. second\n");
        let BlockNode::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        assert!(list.ordered);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn nested_list_becomes_item_children() {
        let blocks = parse("- parent\n  - child\n");
        let BlockNode::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.items.len(), 1);
        let children = &list.items[0].children;
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], BlockNode::Paragraph { .. }));
        let BlockNode::List(nested) = &children[1] else {
            panic!("expected nested list, got {children:?}");
        };
        assert_eq!(nested.items.len(), 1);
    }

    #[test]
    fn fenced_code_inside_item() {
        let blocks = parse("- has code:\n  ```rust\n  fn f() {}\n  ```\n");
        let BlockNode::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        let children = &list.items[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[1],
            BlockNode::CodeFence {
                language: Some("rust".to_string()),
                content: "fn f() {}".to_string(),
            }
        );
    }

    #[test]
    fn marker_kind_switch_starts_a_new_list() {
        let blocks = parse("- bullet\n1. number\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], BlockNode::List(l) if !l.ordered));
        assert!(matches!(&blocks[1], BlockNode::List(l) if l.ordered));
    }

    #[test]
    fn fence_keeps_content_verbatim() {
        let blocks = parse("```\nline one\n\nline two\n```\n");
        assert_eq!(
            blocks[0],
            BlockNode::CodeFence {
                language: None,
                content: "line one\n\nline two".to_string(),
            }
        );
    }

    #[test]
    fn table_with_separator_parses_header_and_rows() {
        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let BlockNode::Table { header, rows } = &blocks[0] else {
            panic!("expected table, got {blocks:?}");
        };
        let header = header.as_ref().unwrap();
        assert_eq!(header.cells.len(), 2);
        assert_eq!(header.cells[0], vec![TextRun::plain("a")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[1], vec![TextRun::plain("2")]);
    }

    #[test]
    fn ragged_table_rows_keep_their_own_width() {
        // padding is the converter's job; the tree keeps what was written
        let blocks = parse("| a | b | c |\n|---|---|---|\n| 1 |\n");
        let BlockNode::Table { rows, .. } = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(rows[0].cells.len(), 1);
    }

    #[test]
    fn separator_row_shapes() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: |"));
        assert!(is_separator_row("---|---"));
        assert!(!is_separator_row("| a | b |"));
        assert!(!is_separator_row("|  |  |"));
    }

    #[test]
    fn unterminated_fence_line_number() {
        let lines: Vec<&str> = "ok\n\n```rust\nnope".lines().collect();
        let err = parse_blocks(&lines, 1).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedFence { line: 3 });
    }
}
