//! `{keep | exclude}` filter specs and the entry point that applies them.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::mask::{self, Mask};
use super::path;
use super::project::apply_keep;
use super::shorthand;
use super::subtract::{Exclusion, apply_exclude};
use super::tree::Tree;

/// Caller-facing filter declaration.
///
/// Entries are canonical (`[a][0][:]`) or shorthand (`a[0][]`). A non-empty
/// `keep` wins over `exclude`; a spec with neither is a passthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub keep: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which pass a spec resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Keep,
    Exclude,
    Passthrough,
}

impl FilterSpec {
    pub fn keep<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keep: paths.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keep: Vec::new(),
            exclude: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.exclude.is_empty()
    }

    pub fn mode(&self) -> FilterMode {
        if !self.keep.is_empty() {
            FilterMode::Keep
        } else if !self.exclude.is_empty() {
            FilterMode::Exclude
        } else {
            FilterMode::Passthrough
        }
    }

    /// Mask for the effective path list; `None` for a passthrough.
    pub fn compile(&self) -> Option<Mask> {
        let entries = match self.mode() {
            FilterMode::Keep => &self.keep,
            FilterMode::Exclude => &self.exclude,
            FilterMode::Passthrough => return None,
        };
        Some(mask::build(
            entries
                .iter()
                .map(|entry| path::parse(&shorthand::canonicalize(entry))),
        ))
    }
}

/// Filter `tree` by `spec`, always returning a fresh tree.
///
/// With no spec, or an empty one, the result is a deep copy. An exclusion
/// that removes the root yields an empty container of the root's kind (a
/// copy for scalars).
pub fn filter_structure(tree: &Tree, spec: Option<&FilterSpec>) -> Tree {
    let Some(spec) = spec else {
        return tree.clone();
    };
    let mode = spec.mode();
    let Some(mask) = spec.compile() else {
        debug!("empty filter spec, passing tree through");
        return tree.clone();
    };
    debug!(?mode, root = %tree.kind(), "applying filter");

    match mode {
        FilterMode::Keep => apply_keep(tree, &mask),
        FilterMode::Exclude => match apply_exclude(tree, &mask) {
            Exclusion::Kept(kept) => kept,
            Exclusion::Removed => tree.empty_like(),
        },
        FilterMode::Passthrough => tree.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn run(value: Value, spec: &FilterSpec) -> Value {
        filter_structure(&Tree::from(value), Some(spec)).into()
    }

    #[test]
    fn keep_takes_priority_over_exclude() {
        let spec = FilterSpec {
            keep: vec!["[a]".into()],
            exclude: vec!["[a]".into()],
        };
        assert_eq!(spec.mode(), FilterMode::Keep);
        assert_eq!(run(json!({"a": 1, "b": 2}), &spec), json!({"a": 1}));
    }

    #[test]
    fn shorthand_entries_are_accepted() {
        let spec = FilterSpec::keep(["authors[].name", "year"]);
        let out = run(
            json!({"authors": [{"name": "A", "aff": "X"}], "year": 1, "t": 0}),
            &spec,
        );
        assert_eq!(out, json!({"authors": [{"name": "A"}], "year": 1}));
    }

    #[test]
    fn removed_root_becomes_an_empty_container() {
        // A lone `[:]` on a top-level array removes every element
        let spec = FilterSpec::exclude(["[:]"]);
        assert_eq!(run(json!([1, 2, 3]), &spec), json!([]));

        // Root removal can only come from a hand-built SelectAll mask; the
        // orchestrator must still never leak it
        let tree = Tree::from(json!({"a": 1}));
        assert!(apply_exclude(&tree, &Mask::SelectAll).is_removed());
    }

    #[test]
    fn passthrough_for_missing_or_empty_specs() {
        let tree = Tree::from(json!({"a": [1, {"b": 2}]}));
        assert_eq!(filter_structure(&tree, None), tree);
        assert_eq!(filter_structure(&tree, Some(&FilterSpec::default())), tree);
        assert_eq!(FilterSpec::default().compile(), None);
    }

    #[test]
    fn unparsable_paths_select_nothing() {
        // Keep with only garbage compiles to an empty mask
        let spec = FilterSpec::keep([""]);
        assert_eq!(run(json!({"a": 1}), &spec), json!({}));
    }

    #[test]
    fn spec_serde_omits_empty_fields_and_tolerates_null() {
        let spec = FilterSpec::keep(["[a]"]);
        assert_eq!(serde_json::to_string(&spec).unwrap(), r#"{"keep":["[a]"]}"#);

        let parsed: FilterSpec =
            serde_json::from_str(r#"{"keep": null, "exclude": ["[x]"]}"#).unwrap();
        assert_eq!(parsed, FilterSpec::exclude(["[x]"]));

        let parsed: FilterSpec = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }
}
