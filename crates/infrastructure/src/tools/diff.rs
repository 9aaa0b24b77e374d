//! Line diff of two JSON (or plain text) documents.

use std::fmt::Write;

use serde_json::Value;
use similar::{ChangeTag, TextDiff};

/// Which side a diff line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Present on both sides
    Equal,
    /// Only on the left side
    Removed,
    /// Only on the right side
    Added,
}

/// One line of a diff, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Origin of the line
    pub tag: DiffTag,
    /// Line text
    pub text: String,
}

/// Result of comparing two documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonDiff {
    /// Lines in display order
    pub lines: Vec<DiffLine>,
}

impl JsonDiff {
    /// True when both sides render to the same text.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|line| line.tag == DiffTag::Equal)
    }

    /// Number of added and removed lines.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        self.lines.iter().fold((0, 0), |(added, removed), line| match line.tag {
            DiffTag::Added => (added + 1, removed),
            DiffTag::Removed => (added, removed + 1),
            DiffTag::Equal => (added, removed),
        })
    }

    /// Renders the diff with `+ `, `- ` and two-space prefixes.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let prefix = match line.tag {
                DiffTag::Equal => "  ",
                DiffTag::Removed => "- ",
                DiffTag::Added => "+ ",
            };
            let _ = writeln!(out, "{prefix}{}", line.text);
        }
        out
    }
}

/// Pretty-prints `input` when it parses as JSON; other text is kept as is.
///
/// Object keys come out sorted, so key order never shows up as a change.
#[must_use]
pub fn normalize(input: &str) -> String {
    serde_json::from_str::<Value>(input)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| input.to_string())
}

/// Compares two documents line by line after normalizing both.
#[must_use]
pub fn diff_documents(left: &str, right: &str) -> JsonDiff {
    let left = normalize(left);
    let right = normalize(right);
    let diff = TextDiff::from_lines(&left, &right);

    let lines = diff
        .iter_all_changes()
        .map(|change| DiffLine {
            tag: match change.tag() {
                ChangeTag::Equal => DiffTag::Equal,
                ChangeTag::Delete => DiffTag::Removed,
                ChangeTag::Insert => DiffTag::Added,
            },
            text: change.value().trim_end_matches(['\r', '\n']).to_string(),
        })
        .collect();

    JsonDiff { lines }
}
