//! Placeholder parser for `{{variable}}` syntax
//!
//! Names are taken verbatim: no trimming, no validation. A placeholder ends
//! at the first `}}` after its opening braces.

use std::ops::Range;

/// A `{{name}}` occurrence in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The text between the braces.
    pub name: String,

    /// Byte range of the whole `{{name}}` in the original string.
    pub span: Range<usize>,
}

/// Reads the placeholder starting exactly at byte `start`, if any.
///
/// Returns the byte range of the name and the end of the placeholder.
#[must_use]
pub fn placeholder_at(input: &str, start: usize) -> Option<(Range<usize>, usize)> {
    let rest = input.get(start..)?;
    if !rest.starts_with("{{") {
        return None;
    }
    let name_start = start + 2;
    let close = input.get(name_start..)?.find("}}")?;
    let name_end = name_start + close;
    Some((name_start..name_end, name_end + 2))
}

/// Parses a string and extracts all placeholders, left to right.
///
/// An opening `{{` whose name would itself contain `{` is skipped one
/// character at a time, so `{{{a}}` yields `a`.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parse_placeholders;
///
/// let found = parse_placeholders("{{host}}/users/{{ id }}");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].name, "host");
/// assert_eq!(found[1].name, " id ");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < input.len() {
        if let Some((name, end)) = placeholder_at(input, i) {
            if !input[name.clone()].contains('{') {
                found.push(Placeholder {
                    name: input[name].to_string(),
                    span: i..end,
                });
                i = end;
                continue;
            }
        }
        i += next_char_len(input, i);
    }

    found
}

/// Returns true if the string contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}

/// Byte length of the character at `i`.
pub(crate) fn next_char_len(input: &str, i: usize) -> usize {
    input[i..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single() {
        let found = parse_placeholders("https://{{host}}/api");
        assert_eq!(
            found,
            vec![Placeholder {
                name: "host".to_string(),
                span: 8..16
            }]
        );
    }

    #[test]
    fn test_names_are_not_trimmed() {
        let found = parse_placeholders("{{ token }}");
        assert_eq!(found[0].name, " token ");
    }

    #[test]
    fn test_unclosed_is_ignored() {
        assert!(parse_placeholders("{{open").is_empty());
        assert!(!has_placeholders("plain text"));
    }

    #[test]
    fn test_extra_opening_brace() {
        let found = parse_placeholders("{{{a}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a");
        assert_eq!(found[0].span, 1..6);
    }

    #[test]
    fn test_multibyte_text() {
        let found = parse_placeholders("é{{ü}}ß");
        assert_eq!(found[0].name, "ü");
    }
}
