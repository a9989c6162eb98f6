//! Per-line classification: the first phase of block parsing.
//!
//! Each line is classified independently using only local facts; grouping
//! lines into blocks is the builder's job.

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    ThematicBreak,
    Heading { level: u8, rest: String },
    /// A ``` line; opens or closes a fence depending on builder state.
    FenceDelimiter { language: Option<String> },
    ListMarker(ListMarker),
    /// Line whose trimmed form starts with `|`.
    TablePipe,
    /// Anything else: paragraph content.
    Text,
}

/// Local facts about a list-marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    pub ordered: bool,
    /// Leading whitespace before the marker, in bytes.
    pub indent: usize,
    /// Column where the item's content starts; continuation lines must be
    /// indented at least this far to belong to the item.
    pub content_col: usize,
    /// Content on the marker line itself.
    pub rest: String,
}

pub fn classify_line(line: &str) -> LineClass {
    let end_trimmed = line.trim_end();
    let trimmed = end_trimmed.trim_start();
    if trimmed.is_empty() {
        return LineClass::Blank;
    }
    let indent = end_trimmed.len() - trimmed.len();

    if is_thematic_break(trimmed) {
        return LineClass::ThematicBreak;
    }

    if let Some(tag) = trimmed.strip_prefix("```") {
        let tag = tag.trim();
        let language = (!tag.is_empty()).then(|| tag.to_string());
        return LineClass::FenceDelimiter { language };
    }

    if let Some(class) = classify_heading(trimmed) {
        return class;
    }

    if let Some(marker) = classify_list_marker(trimmed, indent) {
        return LineClass::ListMarker(marker);
    }

    if trimmed.starts_with('|') {
        return LineClass::TablePipe;
    }

    LineClass::Text
}

/// `---` / `***` with three or more marker characters and nothing else.
fn is_thematic_break(trimmed: &str) -> bool {
    trimmed.len() >= 3
        && (trimmed.chars().all(|c| c == '-') || trimmed.chars().all(|c| c == '*'))
}

fn classify_heading(trimmed: &str) -> Option<LineClass> {
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    // `#abc` is paragraph text, `#` and `# abc` are headings
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some(LineClass::Heading {
        level: level as u8,
        rest: rest.trim().to_string(),
    })
}

fn classify_list_marker(trimmed: &str, indent: usize) -> Option<ListMarker> {
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let spaces = rest.len() - rest.trim_start().len();
        return Some(ListMarker {
            ordered: false,
            indent,
            content_col: indent + 2 + spaces,
            rest: rest.trim().to_string(),
        });
    }

    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix(". ") {
            let spaces = rest.len() - rest.trim_start().len();
            return Some(ListMarker {
                ordered: true,
                indent,
                content_col: indent + digits + 2 + spaces,
                rest: rest.trim().to_string(),
            });
        }
    }

    None
}
