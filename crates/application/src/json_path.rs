//! Minimal JSON-path evaluation for extraction rules.
//!
//! Supported syntax: `$`, `.name`, `['name']`, `[n]`, `[-n]`, `[*]`, `.*`,
//! `..name` and `..*`. A path that does not start with `$` is read relative
//! to the root, so `data.id` equals `$.data.id`.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    /// The path is empty.
    #[error("JSON path is empty")]
    Empty,

    /// A character that cannot start a segment.
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character
        found: char,
        /// Character offset inside the path
        offset: usize,
    },

    /// A `.` or `..` not followed by a name.
    #[error("missing member name at offset {0}")]
    MissingName(usize),

    /// A `[` without its `]`.
    #[error("unterminated bracket at offset {0}")]
    UnterminatedBracket(usize),

    /// Bracket content that is neither an index, `*` nor a quoted name.
    #[error("invalid selector: [{0}]")]
    InvalidSelector(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Child(String),
    Index(i64),
    Wildcard,
    Descendant(String),
    DescendantWildcard,
}

/// Evaluates `path` against `root` and returns every match in document order.
///
/// # Errors
///
/// Returns a [`JsonPathError`] when the path cannot be parsed. A path that
/// parses but matches nothing yields an empty list.
pub fn query<'a>(root: &'a Value, path: &str) -> Result<Vec<&'a Value>, JsonPathError> {
    let segments = parse(path)?;
    let mut current = vec![root];

    for segment in &segments {
        let mut next = Vec::new();
        for value in current {
            apply(segment, value, &mut next);
        }
        if next.is_empty() {
            return Ok(next);
        }
        current = next;
    }

    Ok(current)
}

/// First match of `path`, if any.
///
/// # Errors
///
/// Returns a [`JsonPathError`] when the path cannot be parsed.
pub fn query_first<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, JsonPathError> {
    Ok(query(root, path)?.into_iter().next())
}

fn apply<'a>(segment: &Segment, value: &'a Value, out: &mut Vec<&'a Value>) {
    match segment {
        Segment::Child(name) => {
            if let Some(child) = value.as_object().and_then(|map| map.get(name)) {
                out.push(child);
            }
        }
        Segment::Index(index) => {
            if let Some(items) = value.as_array() {
                let resolved = if *index < 0 {
                    usize::try_from(index.unsigned_abs())
                        .ok()
                        .and_then(|back| items.len().checked_sub(back))
                } else {
                    usize::try_from(*index).ok()
                };
                if let Some(item) = resolved.and_then(|i| items.get(i)) {
                    out.push(item);
                }
            }
        }
        Segment::Wildcard => out.extend(children(value)),
        Segment::Descendant(name) => collect_named(value, name, out),
        Segment::DescendantWildcard => {
            for child in children(value) {
                out.push(child);
                apply(&Segment::DescendantWildcard, child, out);
            }
        }
    }
}

fn children(value: &Value) -> Vec<&Value> {
    match value {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    }
}

fn collect_named<'a>(value: &'a Value, name: &str, out: &mut Vec<&'a Value>) {
    if let Some(found) = value.as_object().and_then(|map| map.get(name)) {
        out.push(found);
    }
    for child in children(value) {
        collect_named(child, name, out);
    }
}

fn parse(path: &str) -> Result<Vec<Segment>, JsonPathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(JsonPathError::Empty);
    }

    let normalized = if let Some(rest) = path.strip_prefix('$') {
        rest.to_string()
    } else if path.starts_with('.') || path.starts_with('[') {
        path.to_string()
    } else {
        format!(".{path}")
    };

    let chars: Vec<char> = normalized.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        match chars[pos] {
            '.' if chars.get(pos + 1) == Some(&'.') => {
                pos += 2;
                if chars.get(pos) == Some(&'*') {
                    pos += 1;
                    segments.push(Segment::DescendantWildcard);
                } else {
                    let (name, end) = read_name(&chars, pos);
                    if name.is_empty() {
                        return Err(JsonPathError::MissingName(pos));
                    }
                    segments.push(Segment::Descendant(name));
                    pos = end;
                }
            }
            '.' => {
                pos += 1;
                if chars.get(pos) == Some(&'*') {
                    pos += 1;
                    segments.push(Segment::Wildcard);
                } else {
                    let (name, end) = read_name(&chars, pos);
                    if name.is_empty() {
                        return Err(JsonPathError::MissingName(pos));
                    }
                    segments.push(Segment::Child(name));
                    pos = end;
                }
            }
            '[' => {
                let (selector, end) = read_bracket(&chars, pos)?;
                segments.push(parse_selector(&selector)?);
                pos = end;
            }
            found => return Err(JsonPathError::UnexpectedChar { found, offset: pos }),
        }
    }

    Ok(segments)
}

fn read_name(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && chars[end] != '.' && chars[end] != '[' {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

/// Reads `[...]` starting at `start`, honoring quotes. Returns the inner text
/// and the offset just past `]`.
fn read_bracket(chars: &[char], start: usize) -> Result<(String, usize), JsonPathError> {
    let mut quote: Option<char> = None;
    let mut pos = start + 1;
    while pos < chars.len() {
        let c = chars[pos];
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ']' => {
                return Ok((chars[start + 1..pos].iter().collect(), pos + 1));
            }
            None => {}
        }
        pos += 1;
    }
    Err(JsonPathError::UnterminatedBracket(start))
}

fn parse_selector(selector: &str) -> Result<Segment, JsonPathError> {
    let inner = selector.trim();
    if inner == "*" {
        return Ok(Segment::Wildcard);
    }
    for quote in ['\'', '"'] {
        if inner.len() >= 2 && inner.starts_with(quote) && inner.ends_with(quote) {
            return Ok(Segment::Child(inner[1..inner.len() - 1].to_string()));
        }
    }
    inner
        .parse::<i64>()
        .map(Segment::Index)
        .map_err(|_| JsonPathError::InvalidSelector(selector.to_string()))
}
