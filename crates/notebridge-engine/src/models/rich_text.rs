use serde::{Deserialize, Serialize};

/// Style carried by a single rich-text run.
///
/// The target workspace uses a flat annotation model: a run has exactly one
/// style, and nested source formatting is flattened onto the outermost span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStyle {
    Plain,
    Bold,
    Italic,
    Code,
}

/// A contiguous span of text sharing one style and an optional link target.
///
/// Invariant: concatenating `content` across a run sequence reproduces the
/// flattened plain text in source order. A `Code` run never carries a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    pub style: RunStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl TextRun {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::Plain,
            link_url: None,
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::Bold,
            link_url: None,
        }
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::Italic,
            link_url: None,
        }
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::Code,
            link_url: None,
        }
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::Plain,
            link_url: Some(url.into()),
        }
    }
}

/// Concatenate run contents back into the flattened plain text.
pub fn flatten_runs(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.content.as_str()).collect()
}

/// True when the runs carry no visible text at all.
pub fn runs_are_blank(runs: &[TextRun]) -> bool {
    runs.iter().all(|r| r.content.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_reproduces_content_in_order() {
        let runs = vec![
            TextRun::plain("Some "),
            TextRun::bold("bold"),
            TextRun::plain(" text."),
        ];
        assert_eq!(flatten_runs(&runs), "Some bold text.");
    }

    #[test]
    fn blank_detection() {
        assert!(runs_are_blank(&[TextRun::plain("  "), TextRun::plain("")]));
        assert!(!runs_are_blank(&[TextRun::plain(" a ")]));
        assert!(runs_are_blank(&[]));
    }

    #[test]
    fn code_run_has_no_link() {
        let run = TextRun::code("x + y");
        assert_eq!(run.style, RunStyle::Code);
        assert!(run.link_url.is_none());
    }
}
