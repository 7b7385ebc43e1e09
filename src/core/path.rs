//! Canonical bracket paths: `[authors][0][name]`, `[tags][:]`.
//!
//! Parsing is permissive. Only well-formed `[...]` groups contribute
//! segments; text outside brackets and unterminated groups are dropped.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

/// One step of a canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Zero-based array position.
    Index(usize),
    /// Every element of an array (`[:]`).
    Wildcard,
}

impl PathSegment {
    /// Classify the inner token of a bracket group.
    pub fn from_token(token: &str) -> Self {
        if token == ":" {
            return PathSegment::Wildcard;
        }
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            // Digit runs too large for usize stay addressable as keys
            if let Ok(index) = token.parse::<usize>() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(token.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "[{key}]"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::Wildcard => f.write_str("[:]"),
        }
    }
}

/// Ordered segments of one path. Most paths are short, so they stay inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CanonicalPath(SmallVec<[PathSegment; 4]>);

impl CanonicalPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PathSegment> for CanonicalPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("static bracket regex"));

/// Parse a canonical bracket path. Never fails; malformed input yields
/// fewer (possibly zero) segments.
pub fn parse(path: &str) -> CanonicalPath {
    BRACKET_GROUP
        .captures_iter(path)
        .filter_map(|caps| caps.get(1))
        .map(|token| PathSegment::from_token(token.as_str()))
        .collect()
}
