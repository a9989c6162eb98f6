//! Inline rich-text extraction.
//!
//! Converts inline markdown (`**bold**`, `*italic*`, `` `code` ``,
//! `[text](url)`) into a flat, ordered sequence of [`TextRun`]s. Both the
//! tree parser and the fallback line parser feed their text through here.
//!
//! # Raw Zone Precedence
//! Code spans are checked first and suppress all other parsing inside them:
//! `` `**x**` `` is a code run, not a bold one.
//!
//! # Flat Annotation Model
//! The target workspace does not compose styles, so nested markers flatten
//! to plain text carrying only the outermost style: `**a *b* c**` becomes a
//! single bold run with content `a b c`. Link display text is likewise
//! flattened and never styled.

mod cursor;

use cursor::Cursor;

use crate::models::TextRun;

/// Extract rich-text runs from one piece of inline content.
///
/// Total: unclosed constructs are emitted as literal text. Empty input
/// yields exactly one empty plain run, since the output block schema
/// requires at least one rich-text entry, never an empty list.
pub fn extract_runs(text: &str) -> Vec<TextRun> {
    let mut runs = scan(text);
    if runs.is_empty() {
        runs.push(TextRun::plain(""));
    }
    runs
}

fn scan(s: &str) -> Vec<TextRun> {
    let mut cur = Cursor::new(s);
    let mut out = Vec::new();
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<TextRun>, s: &str, start: usize, end: usize) {
        if end > start {
            out.push(TextRun::plain(&s[start..end]));
        }
    }

    while !cur.eof() {
        let at = cur.pos();
        if let Some(run) = try_parse_code_span(&mut cur) {
            flush_text(&mut out, s, text_start, at);
            out.push(run);
            text_start = cur.pos();
            continue;
        }
        if let Some(run) = try_parse_strong(&mut cur) {
            flush_text(&mut out, s, text_start, at);
            out.push(run);
            text_start = cur.pos();
            continue;
        }
        if let Some(run) = try_parse_emphasis(&mut cur) {
            flush_text(&mut out, s, text_start, at);
            out.push(run);
            text_start = cur.pos();
            continue;
        }
        if let Some(run) = try_parse_link(&mut cur) {
            flush_text(&mut out, s, text_start, at);
            out.push(run);
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, s, text_start, cur.pos());
    out
}

/// Strip inline markers from nested content, keeping the visible text.
fn flatten_markup(s: &str) -> String {
    scan(s).into_iter().map(|run| run.content).collect()
}

/// `` `code` ``: contents verbatim, never flattened further.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<TextRun> {
    if cur.peek() != Some(b'`') {
        return None;
    }

    let saved = cur.clone();
    cur.bump();
    let inner_start = cur.pos();
    while !cur.eof() && cur.peek() != Some(b'`') {
        cur.bump();
    }
    if cur.eof() {
        *cur = saved;
        return None;
    }
    let inner = cur.slice(inner_start, cur.pos());
    cur.bump();

    if inner.is_empty() {
        *cur = saved;
        return None;
    }
    Some(TextRun::code(inner))
}

/// `**text**` with non-empty flattened contents.
fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<TextRun> {
    delimited_run(cur, b"**").map(TextRun::bold)
}

/// `*text*` with non-empty flattened contents.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<TextRun> {
    delimited_run(cur, b"*").map(TextRun::italic)
}

/// Matches `<delim>inner<delim>`, returning the flattened inner text.
/// On failure the cursor is restored.
fn delimited_run(cur: &mut Cursor<'_>, delim: &[u8]) -> Option<String> {
    if !cur.starts_with(delim) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(delim.len());
    let inner_start = cur.pos();
    while !cur.eof() && !cur.starts_with(delim) {
        cur.bump();
    }
    if cur.eof() {
        *cur = saved;
        return None;
    }
    let inner = cur.slice(inner_start, cur.pos());
    cur.bump_n(delim.len());

    if inner.is_empty() {
        *cur = saved;
        return None;
    }
    Some(flatten_markup(inner))
}

/// `[text](url)`: display text flattened, url carried verbatim.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<TextRun> {
    if cur.peek() != Some(b'[') {
        return None;
    }

    let saved = cur.clone();
    cur.bump();
    let text_start = cur.pos();
    while !cur.eof() && cur.peek() != Some(b']') {
        cur.bump();
    }
    if cur.eof() {
        *cur = saved;
        return None;
    }
    let text = cur.slice(text_start, cur.pos());
    cur.bump();

    if cur.peek() != Some(b'(') {
        *cur = saved;
        return None;
    }
    cur.bump();
    let url_start = cur.pos();
    while !cur.eof() && cur.peek() != Some(b')') {
        cur.bump();
    }
    if cur.eof() {
        *cur = saved;
        return None;
    }
    let url = cur.slice(url_start, cur.pos());
    cur.bump();

    if text.is_empty() || url.is_empty() {
        *cur = saved;
        return None;
    }
    Some(TextRun::link(flatten_markup(text), url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunStyle, TextRun};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(extract_runs("hello world"), vec![TextRun::plain("hello world")]);
    }

    #[test]
    fn empty_input_yields_one_empty_plain_run() {
        assert_eq!(extract_runs(""), vec![TextRun::plain("")]);
    }

    #[test]
    fn bold_between_plain() {
        assert_eq!(
            extract_runs("Some **bold** text."),
            vec![
                TextRun::plain("Some "),
                TextRun::bold("bold"),
                TextRun::plain(" text."),
            ]
        );
    }

    #[test]
    fn italic_run() {
        assert_eq!(
            extract_runs("an *italic* word"),
            vec![
                TextRun::plain("an "),
                TextRun::italic("italic"),
                TextRun::plain(" word"),
            ]
        );
    }

    #[test]
    fn code_run() {
        assert_eq!(
            extract_runs("call `f(x)` now"),
            vec![
                TextRun::plain("call "),
                TextRun::code("f(x)"),
                TextRun::plain(" now"),
            ]
        );
    }

    #[test]
    fn link_run_carries_url() {
        assert_eq!(
            extract_runs("see [docs](https://example.com)"),
            vec![
                TextRun::plain("see "),
                TextRun::link("docs", "https://example.com"),
            ]
        );
    }

    #[test]
    fn nested_markers_flatten_to_outer_style() {
        let runs = extract_runs("**a *b* c**");
        assert_eq!(runs, vec![TextRun::bold("a b c")]);
        assert_eq!(runs[0].style, RunStyle::Bold);
    }

    #[test]
    fn styled_link_text_is_flattened() {
        assert_eq!(
            extract_runs("[**bold** name](u)"),
            vec![TextRun::link("bold name", "u")]
        );
    }

    #[test]
    fn code_span_suppresses_inner_markup() {
        assert_eq!(extract_runs("`**x**`"), vec![TextRun::code("**x**")]);
    }

    #[test]
    fn unclosed_bold_becomes_literal_text() {
        assert_eq!(extract_runs("**oops"), vec![TextRun::plain("**oops")]);
    }

    #[test]
    fn unclosed_code_becomes_literal_text() {
        assert_eq!(extract_runs("`oops"), vec![TextRun::plain("`oops")]);
    }

    #[test]
    fn bare_brackets_are_literal() {
        assert_eq!(
            extract_runs("[not a link]"),
            vec![TextRun::plain("[not a link]")]
        );
    }

    #[test]
    fn concatenated_content_reproduces_flat_text() {
        let runs = extract_runs("a **b** `c` [d](u) *e*");
        let flat: String = runs.into_iter().map(|r| r.content).collect();
        assert_eq!(flat, "a b c d e");
    }

    #[test]
    fn multibyte_text_survives_scanning() {
        assert_eq!(
            extract_runs("héllo **wörld**"),
            vec![TextRun::plain("héllo "), TextRun::bold("wörld")]
        );
    }
}
