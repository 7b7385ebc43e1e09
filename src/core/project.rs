//! Keep semantics: project a tree down to the paths a mask selects.

use indexmap::IndexMap;

use super::mask::Mask;
use super::path::PathSegment;
use super::tree::Tree;

/// Minimal subset of `tree` selected by `mask`.
///
/// Object keys follow mask declaration order. Arrays under a wildcard keep
/// their length; arrays addressed by index are compacted in ascending index
/// order, and out-of-range indices vanish. Scalars are copied whatever the
/// mask asks for below them.
pub fn apply_keep(tree: &Tree, mask: &Mask) -> Tree {
    let children = match mask {
        Mask::SelectAll => return tree.clone(),
        Mask::Partial(children) => children,
    };

    match tree {
        Tree::Object(map) => Tree::Object(keep_members(map, children)),
        Tree::Array(items) => Tree::Array(keep_elements(items, children)),
        Tree::Scalar(_) => tree.clone(),
    }
}

fn keep_members(
    map: &IndexMap<String, Tree>,
    children: &IndexMap<PathSegment, Mask>,
) -> IndexMap<String, Tree> {
    children
        .iter()
        .filter_map(|(segment, sub)| match segment {
            PathSegment::Key(key) => map
                .get(key)
                .map(|value| (key.clone(), apply_keep(value, sub))),
            PathSegment::Index(_) | PathSegment::Wildcard => None,
        })
        .collect()
}

fn keep_elements(items: &[Tree], children: &IndexMap<PathSegment, Mask>) -> Vec<Tree> {
    // Wildcard overrides any index entries at the same level
    if let Some(sub) = children.get(&PathSegment::Wildcard) {
        return items.iter().map(|item| apply_keep(item, sub)).collect();
    }

    let mut picks: Vec<(usize, &Mask)> = children
        .iter()
        .filter_map(|(segment, sub)| match segment {
            PathSegment::Index(index) if *index < items.len() => Some((*index, sub)),
            _ => None,
        })
        .collect();
    picks.sort_unstable_by_key(|(index, _)| *index);

    picks
        .into_iter()
        .map(|(index, sub)| apply_keep(&items[index], sub))
        .collect()
}
