//! Exclude semantics: remove the paths a mask selects and keep the rest.

use indexmap::IndexMap;

use super::mask::Mask;
use super::path::PathSegment;
use super::tree::Tree;

/// Result of excluding below one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// What survives (possibly an emptied container).
    Kept(Tree),
    /// The node itself was selected for removal.
    Removed,
}

impl Exclusion {
    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Exclusion::Kept(tree) => Some(tree),
            Exclusion::Removed => None,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Exclusion::Removed)
    }
}

/// Complement of `mask` within `tree`.
///
/// Only a `SelectAll` removes a node. A `Partial` that strips every child
/// still leaves the (now empty) container in place. Removed array elements
/// are compacted out; the remaining ones keep their relative order.
pub fn apply_exclude(tree: &Tree, mask: &Mask) -> Exclusion {
    let children = match mask {
        Mask::SelectAll => return Exclusion::Removed,
        Mask::Partial(children) => children,
    };

    match tree {
        Tree::Object(map) => Exclusion::Kept(Tree::Object(exclude_members(map, children))),
        Tree::Array(items) => Exclusion::Kept(Tree::Array(exclude_elements(items, children))),
        Tree::Scalar(_) => Exclusion::Kept(tree.clone()),
    }
}

fn exclude_members(
    map: &IndexMap<String, Tree>,
    children: &IndexMap<PathSegment, Mask>,
) -> IndexMap<String, Tree> {
    let mut out = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        match children.get(&PathSegment::Key(key.clone())) {
            None => {
                out.insert(key.clone(), value.clone());
            }
            Some(sub) => {
                if let Exclusion::Kept(kept) = apply_exclude(value, sub) {
                    out.insert(key.clone(), kept);
                }
            }
        }
    }
    out
}

fn exclude_elements(items: &[Tree], children: &IndexMap<PathSegment, Mask>) -> Vec<Tree> {
    // Wildcard overrides any index entries at the same level
    if let Some(sub) = children.get(&PathSegment::Wildcard) {
        return items
            .iter()
            .filter_map(|item| apply_exclude(item, sub).into_tree())
            .collect();
    }

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match children.get(&PathSegment::Index(index)) {
            None => Some(item.clone()),
            Some(sub) => apply_exclude(item, sub).into_tree(),
        })
        .collect()
}
