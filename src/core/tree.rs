//! Filepath: src/core/tree.rs
//! Semi-structured value model the filters operate on.
//!
//! A closed three-way split (object / array / scalar) so the projection and
//! subtraction passes can match exhaustively. Scalars are opaque to them.
//! JSON converts losslessly in both directions and object key order is kept.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

/// Leaf value; never descended into.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Tree {
    Object(IndexMap<String, Tree>),
    Array(Vec<Tree>),
    Scalar(Scalar),
}

/// Shape of a tree node, used for logging and empty-container fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Object,
    Array,
    Scalar,
}

impl std::fmt::Display for TreeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeKind::Object => write!(f, "object"),
            TreeKind::Array => write!(f, "array"),
            TreeKind::Scalar => write!(f, "scalar"),
        }
    }
}

impl Tree {
    pub fn null() -> Self {
        Tree::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> TreeKind {
        match self {
            Tree::Object(_) => TreeKind::Object,
            Tree::Array(_) => TreeKind::Array,
            Tree::Scalar(_) => TreeKind::Scalar,
        }
    }

    /// Empty container of the same kind; scalars are copied.
    pub fn empty_like(&self) -> Self {
        match self {
            Tree::Object(_) => Tree::Object(IndexMap::new()),
            Tree::Array(_) => Tree::Array(Vec::new()),
            Tree::Scalar(s) => Tree::Scalar(s.clone()),
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Tree>> {
        match self {
            Tree::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Tree]> {
        match self {
            Tree::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Member lookup on objects; `None` for arrays and scalars.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Number of direct children (0 for scalars).
    pub fn len(&self) -> usize {
        match self {
            Tree::Object(map) => map.len(),
            Tree::Array(items) => items.len(),
            Tree::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum nesting depth; a scalar has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Tree::Object(map) => 1 + map.values().map(Tree::depth).max().unwrap_or(0),
            Tree::Array(items) => 1 + items.iter().map(Tree::depth).max().unwrap_or(0),
            Tree::Scalar(_) => 0,
        }
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Tree::Object(map.into_iter().map(|(k, v)| (k, Tree::from(v))).collect())
            }
            Value::Array(items) => Tree::Array(items.into_iter().map(Tree::from).collect()),
            Value::Null => Tree::Scalar(Scalar::Null),
            Value::Bool(b) => Tree::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Tree::Scalar(Scalar::Number(n)),
            Value::String(s) => Tree::Scalar(Scalar::String(s)),
        }
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            Tree::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Tree::Scalar(Scalar::Null) => Value::Null,
            Tree::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Tree::Scalar(Scalar::Number(n)) => Value::Number(n),
            Tree::Scalar(Scalar::String(s)) => Value::String(s),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tree::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Tree::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
            Tree::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Tree::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Tree::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            Tree::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trip_preserves_key_order() {
        let value = json!({"z": 1, "a": [true, null, "s"], "m": {"y": 2.5, "b": {}}});
        let tree = Tree::from(value.clone());
        assert_eq!(Value::from(tree.clone()), value);

        let text = serde_json::to_string(&tree).unwrap();
        assert_eq!(text, r#"{"z":1,"a":[true,null,"s"],"m":{"y":2.5,"b":{}}}"#);

        let parsed: Tree = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn empty_like_keeps_kind() {
        assert_eq!(Tree::from(json!({"a": 1})).empty_like(), Tree::from(json!({})));
        assert_eq!(Tree::from(json!([1, 2])).empty_like(), Tree::from(json!([])));
        assert_eq!(Tree::from(json!("x")).empty_like(), Tree::from(json!("x")));
    }

    #[test]
    fn accessors_and_depth() {
        let tree = Tree::from(json!({"a": {"b": [1, [2]]}, "c": 3}));
        assert_eq!(tree.kind(), TreeKind::Object);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.get("c"), Some(&Tree::from(json!(3))));
        assert!(tree.get("zz").is_none());
        assert!(Tree::null().is_empty());
        assert_eq!(Tree::null().kind().to_string(), "scalar");
    }
}
