//! Dot/array shorthand (`authors[].name`, `refs[0].title`) rewritten into
//! canonical bracket form.

/// Split on top-level dots only; dots inside `[...]` stay in the component.
/// Empty components (`a..b`, leading or trailing dots) are skipped.
fn split_components(expr: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (pos, ch) in expr.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                if pos > start {
                    components.push(&expr[start..pos]);
                }
                start = pos + 1;
            }
            _ => {}
        }
    }
    if start < expr.len() {
        components.push(&expr[start..]);
    }
    components
}

/// Bracket token emitted for the content of a shorthand array group.
fn group_token(inner: &str) -> &str {
    match inner {
        "" | ":" => ":",
        other => other,
    }
}

/// Emit one component (`name`, `name[]`, `name[:]`, `name[3]`, `name[x]`).
fn push_component(out: &mut String, component: &str) {
    let Some(open) = component.find('[') else {
        out.push('[');
        out.push_str(component);
        out.push(']');
        return;
    };

    let (name, mut rest) = component.split_at(open);
    let mut groups = Vec::new();
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            break;
        };
        groups.push(group_token(&stripped[..close]));
        rest = &stripped[close + 1..];
    }
    // A dangling `[:` still means every element
    if rest == "[:" {
        groups.push(":");
    }

    // `name[` with nothing closed is not array syntax at all
    if groups.is_empty() {
        out.push('[');
        out.push_str(component);
        out.push(']');
        return;
    }

    out.push('[');
    out.push_str(name);
    out.push(']');
    for token in groups {
        out.push('[');
        out.push_str(token);
        out.push(']');
    }
}

/// Translate shorthand into canonical bracket syntax.
///
/// `translate("authors[].name") == "[authors][:][name]"`; empty input
/// translates to an empty string.
pub fn translate(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 8);
    for component in split_components(expr) {
        push_component(&mut out, component);
    }
    out
}

/// Canonical form of a user entry: bracketed entries pass through,
/// anything else is treated as shorthand.
pub fn canonicalize(entry: &str) -> String {
    if entry.starts_with('[') {
        entry.to_string()
    } else {
        translate(entry)
    }
}
