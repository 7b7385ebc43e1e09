//! Precedence-resolved selection masks compiled from canonical paths.
//!
//! The shortest path claiming a key wins, whatever the declaration order:
//! `[a]` and `[a][b]` compile to the same mask as `[a]` alone. Sibling
//! paths merge into one `Partial` level.

use indexmap::IndexMap;
use tracing::trace;

use super::path::{self, CanonicalPath, PathSegment};

/// Compiled selection. `SelectAll` covers the whole subtree at its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mask {
    SelectAll,
    /// Children keyed by segment, in first-declaration order.
    Partial(IndexMap<PathSegment, Mask>),
}

impl Default for Mask {
    fn default() -> Self {
        Mask::Partial(IndexMap::new())
    }
}

impl Mask {
    pub fn is_select_all(&self) -> bool {
        matches!(self, Mask::SelectAll)
    }

    /// Sub-mask recorded for `segment`, if any.
    pub fn get(&self, segment: &PathSegment) -> Option<&Mask> {
        match self {
            Mask::SelectAll => None,
            Mask::Partial(children) => children.get(segment),
        }
    }

    /// True for a `Partial` level with no entries.
    pub fn is_empty(&self) -> bool {
        matches!(self, Mask::Partial(children) if children.is_empty())
    }

    /// Insert one path, honoring ancestor precedence.
    pub fn insert(&mut self, path: &CanonicalPath) {
        let Mask::Partial(root) = self else {
            // Everything is already selected
            return;
        };
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };

        let mut level = root;
        for segment in parents {
            match level
                .entry(segment.clone())
                .or_insert_with(Mask::default)
            {
                Mask::SelectAll => {
                    trace!(%path, "path subsumed by an ancestor selection");
                    return;
                }
                Mask::Partial(children) => level = children,
            }
        }

        // A terminal segment replaces any deeper sub-mask built earlier
        level.insert(last.clone(), Mask::SelectAll);
    }
}

/// Compile parsed paths into one mask; empty paths are skipped.
pub fn build<I>(paths: I) -> Mask
where
    I: IntoIterator<Item = CanonicalPath>,
{
    let mut mask = Mask::default();
    for path in paths {
        if path.is_empty() {
            continue;
        }
        mask.insert(&path);
    }
    mask
}

/// Parse canonical path strings and compile them.
pub fn build_from_strs<I, S>(paths: I) -> Mask
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build(paths.into_iter().map(|p| path::parse(p.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    fn partial<const N: usize>(entries: [(PathSegment, Mask); N]) -> Mask {
        Mask::Partial(entries.into_iter().collect())
    }

    #[test]
    fn simple_paths_select_whole_keys() {
        let mask = build_from_strs(["[title]", "[year]"]);
        assert_eq!(
            mask,
            partial([(key("title"), Mask::SelectAll), (key("year"), Mask::SelectAll)])
        );
    }

    #[test]
    fn nested_siblings_share_one_level() {
        let mask = build_from_strs(["[venue][name]", "[venue][type]"]);
        assert_eq!(
            mask,
            partial([(
                key("venue"),
                partial([(key("name"), Mask::SelectAll), (key("type"), Mask::SelectAll)])
            )])
        );
    }

    #[test]
    fn array_paths_use_typed_segments() {
        let mask = build_from_strs(["[authors][:][name]", "[refs][0]"]);
        assert_eq!(
            mask,
            partial([
                (
                    key("authors"),
                    partial([(PathSegment::Wildcard, partial([(key("name"), Mask::SelectAll)]))])
                ),
                (key("refs"), partial([(PathSegment::Index(0), Mask::SelectAll)])),
            ])
        );
    }

    #[test]
    fn ancestor_wins_in_either_order() {
        let expected = build_from_strs(["[a]"]);
        assert_eq!(build_from_strs(["[a]", "[a][b]"]), expected);
        assert_eq!(build_from_strs(["[a][b]", "[a]"]), expected);
        assert_eq!(build_from_strs(["[a][b][c]", "[a][x]", "[a]"]), expected);
    }

    #[test]
    fn duplicates_are_idempotent() {
        assert_eq!(
            build_from_strs(["[a][b]", "[a][b]", "[c]"]),
            build_from_strs(["[a][b]", "[c]"])
        );
    }

    #[test]
    fn empty_and_malformed_paths_are_dropped() {
        assert!(build_from_strs(["", "title", "a.b"]).is_empty());
        assert!(build(Vec::new()).is_empty());
    }

    #[test]
    fn insert_into_select_all_is_a_no_op() {
        let mut mask = Mask::SelectAll;
        mask.insert(&path::parse("[a]"));
        assert!(mask.is_select_all());
    }

    #[test]
    fn get_looks_up_children() {
        let mask = build_from_strs(["[a][0]"]);
        let a = mask.get(&key("a")).expect("a present");
        assert!(a.get(&PathSegment::Index(0)).is_some_and(Mask::is_select_all));
        assert!(mask.get(&key("b")).is_none());
        assert!(Mask::SelectAll.get(&key("a")).is_none());
    }
}
