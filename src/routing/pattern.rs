//! Route pattern parsing and per-segment matching.
//!
//! # Syntax
//! ```text
//! /items/:id[\d+]/tags/:tag
//!  ───── ───────── ──── ────
//!  literal  regex  literal named
//! ```
//!
//! # Design Decisions
//! - Paths are split on `/` after dropping one leading and one trailing slash,
//!   so `/items/` and `/items` address the same segments
//! - `/` inside a `[...]` constraint does not split the pattern
//! - Constraints are anchored: the whole segment has to match
//! - Interior empty segments (`/a//b`) are rejected in patterns; in request
//!   paths they simply fail to match named segments

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("pattern is empty")]
    Empty,

    /// The pattern contains `//`.
    #[error("pattern contains an empty segment")]
    EmptySegment,

    /// A `:name` segment has a missing or malformed identifier.
    #[error("invalid segment name `{0}` (expected [A-Za-z0-9_]+)")]
    InvalidName(String),

    /// The same capture name appears twice.
    #[error("segment name `{0}` is used more than once")]
    DuplicateName(String),

    /// A `[` constraint was never closed.
    #[error("unterminated `[` in segment `{0}`")]
    UnterminatedBracket(String),

    /// Text follows the closing `]` of a constraint.
    #[error("unexpected text after `]` in segment `{0}`")]
    TrailingAfterBracket(String),

    /// The constraint did not compile.
    #[error("invalid regex for segment `{name}`: {reason}")]
    InvalidRegex { name: String, reason: String },
}

/// One segment of a parsed route pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Matched by string equality.
    Literal(String),
    /// Matches any non-empty segment and captures it.
    Named(String),
    /// Matches a segment the constraint accepts in full and captures it.
    NamedRegex {
        name: String,
        source: String,
        regex: Regex,
    },
}

impl Segment {
    /// Capture name, if this segment captures.
    pub fn name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Named(name) | Segment::NamedRegex { name, .. } => Some(name),
        }
    }

    /// Returns true if `text` satisfies this segment.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == text,
            Segment::Named(_) => !text.is_empty(),
            Segment::NamedRegex { regex, .. } => regex.is_match(text),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(literal) => f.write_str(literal),
            Segment::Named(name) => write!(f, ":{}", name),
            Segment::NamedRegex { name, source, .. } => write!(f, ":{}[{}]", name, source),
        }
    }
}

/// Values captured from a request path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    entries: Vec<(String, String)>,
}

impl Captures {
    /// Look up a captured value by segment name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/items/:id[\d+]`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut segments = Vec::new();
        for raw in split_pattern(pattern)? {
            let segment = parse_segment(raw)?;
            if let Some(name) = segment.name() {
                if segments.iter().any(|s: &Segment| s.name() == Some(name)) {
                    return Err(PatternError::DuplicateName(name.to_string()));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match already-split path segments, returning the captures on success.
    pub fn match_segments(&self, parts: &[&str]) -> Option<Captures> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = Captures::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            if !segment.matches(part) {
                return None;
            }
            if let Some(name) = segment.name() {
                captures.push(name, part);
            }
        }
        Some(captures)
    }

    /// Match a raw request path.
    pub fn match_path(&self, path: &str) -> Option<Captures> {
        self.match_segments(&split_path(path))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a request path into segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let body = trim_slashes(path);
    if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    }
}

/// Segment-aware prefix test: `/admin` covers `/admin` and `/admin/x` but not `/administrator`.
pub fn has_path_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn trim_slashes(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

fn split_pattern(pattern: &str) -> Result<Vec<&str>, PatternError> {
    let body = trim_slashes(pattern);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if depth > 0 => escaped = true,
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            '/' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(PatternError::UnterminatedBracket(body[start..].to_string()));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

fn parse_segment(raw: &str) -> Result<Segment, PatternError> {
    let Some(rest) = raw.strip_prefix(':') else {
        if raw.is_empty() {
            return Err(PatternError::EmptySegment);
        }
        return Ok(Segment::Literal(raw.to_string()));
    };

    let Some(open) = rest.find('[') else {
        validate_name(rest)?;
        return Ok(Segment::Named(rest.to_string()));
    };

    let name = &rest[..open];
    validate_name(name)?;

    let inner = &rest[open + 1..];
    let close = closing_bracket(inner)
        .ok_or_else(|| PatternError::UnterminatedBracket(raw.to_string()))?;
    if close + 1 != inner.len() {
        return Err(PatternError::TrailingAfterBracket(raw.to_string()));
    }

    let source = &inner[..close];
    let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
        PatternError::InvalidRegex {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(Segment::NamedRegex {
        name: name.to_string(),
        source: source.to_string(),
        regex,
    })
}

/// Byte index of the `]` closing an already-opened `[`.
fn closing_bracket(inner: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn validate_name(name: &str) -> Result<(), PatternError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(PatternError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segment_kinds() {
        let pattern = RoutePattern::parse(r"/items/:id[\d+]/tags/:tag").unwrap();
        let segments = pattern.segments();
        assert_eq!(segments.len(), 4);
        assert!(matches!(&segments[0], Segment::Literal(s) if s == "items"));
        assert!(matches!(&segments[1], Segment::NamedRegex { name, source, .. } if name == "id" && source == r"\d+"));
        assert!(matches!(&segments[2], Segment::Literal(s) if s == "tags"));
        assert!(matches!(&segments[3], Segment::Named(s) if s == "tag"));
        assert_eq!(pattern.to_string(), r"/items/:id[\d+]/tags/:tag");
    }

    #[test]
    fn test_root_pattern_has_no_segments() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/x").is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(RoutePattern::parse("").unwrap_err(), PatternError::Empty);
        assert_eq!(
            RoutePattern::parse("/a/:id/b/:id").unwrap_err(),
            PatternError::DuplicateName("id".into())
        );
        assert_eq!(
            RoutePattern::parse("/a/:id/:id[\\d+]").unwrap_err(),
            PatternError::DuplicateName("id".into())
        );
        assert!(matches!(
            RoutePattern::parse(r"/a/:id[\d+").unwrap_err(),
            PatternError::UnterminatedBracket(_)
        ));
        assert!(matches!(
            RoutePattern::parse(r"/a/:id[\d+]x").unwrap_err(),
            PatternError::TrailingAfterBracket(_)
        ));
        assert!(matches!(
            RoutePattern::parse("/a/:[x]").unwrap_err(),
            PatternError::InvalidName(_)
        ));
        assert!(matches!(
            RoutePattern::parse("/a/:").unwrap_err(),
            PatternError::InvalidName(_)
        ));
        assert!(matches!(
            RoutePattern::parse("/a/:id[(]").unwrap_err(),
            PatternError::InvalidRegex { .. }
        ));
        assert_eq!(RoutePattern::parse("/a//b").unwrap_err(), PatternError::EmptySegment);
    }

    #[test]
    fn test_regex_is_anchored() {
        let digits = RoutePattern::parse(r"/:name[\d+]").unwrap();
        assert!(digits.match_path("/123").is_some());
        assert!(digits.match_path("/abc").is_none());
        assert!(digits.match_path("/12a").is_none());

        let world = RoutePattern::parse("/:name[world]").unwrap();
        assert_eq!(world.match_path("/world").unwrap().get("name"), Some("world"));
        assert!(world.match_path("/worlds").is_none());
        assert!(world.match_path("/hello").is_none());
    }

    #[test]
    fn test_brackets_inside_constraint() {
        let pattern = RoutePattern::parse("/:code[[A-Z]{2}[0-9]+]").unwrap();
        assert!(pattern.match_path("/AB12").is_some());
        assert!(pattern.match_path("/ab12").is_none());

        let escaped = RoutePattern::parse(r"/:tag[\[\w+\]]").unwrap();
        assert!(escaped.match_path("/[rust]").is_some());
    }

    #[test]
    fn test_slash_inside_constraint_does_not_split() {
        let pattern = RoutePattern::parse("/files/:name[a/b|c]").unwrap();
        assert_eq!(pattern.segments().len(), 2);
        assert!(pattern.match_path("/files/c").is_some());
    }

    #[test]
    fn test_named_rejects_empty_segment() {
        let pattern = RoutePattern::parse("/a/:x/b").unwrap();
        assert!(pattern.match_path("/a//b").is_none());
        assert_eq!(pattern.match_path("/a/1/b").unwrap().get("x"), Some("1"));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let pattern = RoutePattern::parse("/items/").unwrap();
        assert!(pattern.match_path("/items").is_some());
        assert!(pattern.match_path("/items/").is_some());
    }

    #[test]
    fn test_has_path_prefix() {
        assert!(has_path_prefix("/admin", "/admin"));
        assert!(has_path_prefix("/admin/users", "/admin"));
        assert!(has_path_prefix("/admin/users", "/admin/"));
        assert!(!has_path_prefix("/administrator", "/admin"));
        assert!(has_path_prefix("/anything", "/"));
    }
}
