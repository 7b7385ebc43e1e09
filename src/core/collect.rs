//! Normalization of raw `--keep` / `--exclude` / `--fields` values.

use super::filter::FilterSpec;
use super::shorthand;

/// Flatten raw entries into canonical path strings.
///
/// `None` entries are skipped, each entry is split on `,` and trimmed, empty
/// fragments are dropped. Fragments starting with `[` are already canonical;
/// everything else goes through the shorthand translator. Order is kept and
/// duplicates are not removed.
pub fn collect<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    entries
        .into_iter()
        .flatten()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(shorthand::canonicalize)
        .collect()
}

/// `collect` over plain strings, as clap hands them over.
pub fn collect_all<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    collect(entries.iter().map(|entry| Some(entry.as_ref())))
}

/// Build a spec from the three flag lists. `fields` is an alias for `keep`;
/// keep paths shadow exclude paths entirely. `None` when nothing was given.
pub fn build_spec<S: AsRef<str>>(keep: &[S], fields: &[S], exclude: &[S]) -> Option<FilterSpec> {
    let mut keep_paths = collect_all(keep);
    keep_paths.extend(collect_all(fields));
    if !keep_paths.is_empty() {
        return Some(FilterSpec::keep(keep_paths));
    }

    let exclude_paths = collect_all(exclude);
    if !exclude_paths.is_empty() {
        return Some(FilterSpec::exclude(exclude_paths));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn skips_none_and_empty_inputs() {
        assert!(collect(Vec::<Option<&str>>::new()).is_empty());
        assert!(collect([None, Some(""), Some(" , ,")]).is_empty());
    }

    #[test]
    fn simple_and_comma_separated_fields() {
        assert_eq!(collect_all(&["title", "year"]), vec!["[title]", "[year]"]);
        assert_eq!(
            collect_all(&["title, year ,abstract"]),
            vec!["[title]", "[year]", "[abstract]"]
        );
    }

    #[test]
    fn mixed_formats_and_arrays() {
        assert_eq!(
            collect([Some("[title]"), None, Some("authors[].name,refs[0]")]),
            vec!["[title]", "[authors][:][name]", "[refs][0]"]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(collect_all(&["a", "a"]), vec!["[a]", "[a]"]);
    }

    #[test]
    fn build_spec_merges_keep_and_fields() {
        let spec = build_spec(&["title"], &["year"], NONE).unwrap();
        assert_eq!(spec, FilterSpec::keep(["[title]", "[year]"]));
    }

    #[test]
    fn build_spec_prefers_keep_over_exclude() {
        let spec = build_spec(&["title"], NONE, &["doi"]).unwrap();
        assert_eq!(spec, FilterSpec::keep(["[title]"]));
        assert!(spec.exclude.is_empty());
    }

    #[test]
    fn build_spec_exclude_only() {
        let spec = build_spec(NONE, NONE, &["doi,citation_count"]).unwrap();
        assert_eq!(spec, FilterSpec::exclude(["[doi]", "[citation_count]"]));
    }

    #[test]
    fn build_spec_without_paths_is_none() {
        assert_eq!(build_spec(NONE, NONE, NONE), None);
        assert_eq!(build_spec(&[" "], NONE, &[","]), None);
    }
}
