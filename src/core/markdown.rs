//! Render a tree as a Markdown document for quick reading.
//!
//! Object keys become headings (capped at `######`), array elements become
//! `Item n` headings or bullets, and scalars are inlined as code spans.

use super::tree::{Scalar, Tree};

const MAX_HEADING: usize = 6;

/// Render `tree` under a `# {title}` heading. Nesting deeper than
/// `max_depth` is elided with a marker.
pub fn render_markdown(tree: &Tree, title: &str, max_depth: usize) -> String {
    let renderer = Renderer { max_depth };
    format!("# {title}\n\n{}", renderer.value(tree, 1))
}

struct Renderer {
    max_depth: usize,
}

impl Renderer {
    fn heading(depth: usize, text: &str) -> String {
        format!("{} {text}\n", "#".repeat((depth + 1).min(MAX_HEADING)))
    }

    fn value(&self, tree: &Tree, depth: usize) -> String {
        if depth > self.max_depth {
            return format!("*(max depth {} reached)*", self.max_depth);
        }

        match tree {
            Tree::Object(map) if map.is_empty() => "*empty object*".to_string(),
            Tree::Object(map) => {
                let mut lines = Vec::with_capacity(map.len() * 2);
                for (key, child) in map {
                    lines.push(Self::heading(depth, key));
                    let rendered = self.value(child, depth + 1);
                    if is_populated_container(child) {
                        lines.push(rendered);
                    } else {
                        lines.push(format!("{rendered}\n"));
                    }
                }
                lines.join("\n")
            }
            Tree::Array(items) if items.is_empty() => "*empty array*".to_string(),
            Tree::Array(items) => {
                let mut lines = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Tree::Object(_) | Tree::Array(_) => {
                            lines.push(Self::heading(depth, &format!("Item {}", i + 1)));
                            lines.push(self.value(item, depth + 1));
                        }
                        Tree::Scalar(_) => lines.push(format!("- {}", self.value(item, depth + 1))),
                    }
                }
                lines.join("\n")
            }
            Tree::Scalar(scalar) => scalar_text(scalar),
        }
    }
}

fn is_populated_container(tree: &Tree) -> bool {
    match tree {
        Tree::Object(_) | Tree::Array(_) => !tree.is_empty(),
        Tree::Scalar(_) => false,
    }
}

fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "*null*".to_string(),
        Scalar::Bool(b) => format!("**{b}**"),
        Scalar::Number(n) => format!("`{n}`"),
        Scalar::String(s) => {
            let escaped = s.replace('`', "\\`").replace('*', "\\*").replace('_', "\\_");
            if escaped.contains('\n') {
                format!("```\n{escaped}\n```")
            } else {
                format!("`{escaped}`")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value, max_depth: usize) -> String {
        render_markdown(&Tree::from(value), "Doc", max_depth)
    }

    #[test]
    fn renders_objects_as_headings() {
        let out = render(json!({"title": "T", "year": 2023}), 6);
        assert_eq!(out, "# Doc\n\n## title\n\n`T`\n\n## year\n\n`2023`\n");
    }

    #[test]
    fn renders_arrays_as_items_and_bullets() {
        let out = render(json!({"tags": ["a", "b"], "refs": [{"t": 1}]}), 6);
        assert_eq!(
            out,
            "# Doc\n\n## tags\n\n- `a`\n- `b`\n## refs\n\n### Item 1\n\n#### t\n\n`1`\n"
        );
    }

    #[test]
    fn scalar_forms() {
        assert_eq!(render(json!(null), 6), "# Doc\n\n*null*");
        assert_eq!(render(json!(true), 6), "# Doc\n\n**true**");
        assert_eq!(render(json!("a_b*c`d"), 6), "# Doc\n\n`a\\_b\\*c\\`d`");
        assert_eq!(render(json!("l1\nl2"), 6), "# Doc\n\n```\nl1\nl2\n```");
    }

    #[test]
    fn empty_containers_and_depth_limit() {
        assert_eq!(render(json!({}), 6), "# Doc\n\n*empty object*");
        assert_eq!(render(json!([]), 6), "# Doc\n\n*empty array*");
        assert_eq!(
            render(json!({"a": {"b": 1}}), 1),
            "# Doc\n\n## a\n\n*(max depth 1 reached)*"
        );
    }

    #[test]
    fn heading_level_is_capped() {
        let out = render(json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}}), 10);
        assert!(out.contains("###### e\n"));
        assert!(out.contains("###### f\n"));
        assert!(!out.contains("#######"));
    }
}
