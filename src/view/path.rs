//! view/path — addressing into a value tree.
//!
//! A path is a sequence of segments (mapping key or sequence index) from the
//! state root down to one member. Resolution is explicit: the addressed node
//! is re-looked-up against the live tree on every operation, so a view built
//! over a not-yet-existing path stays legal (reads there yield None).

use std::fmt;

use serde_json::Value;

/// One step into the tree: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, ".{k}"),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Render a path as `$.a[0].b` for error messages and trace logs.
pub fn path_display(path: &[Segment]) -> String {
    let mut out = String::from("$");
    for seg in path {
        out.push_str(&seg.to_string());
    }
    out
}

/// True for the two container shapes (mapping, sequence).
#[inline]
pub fn is_container(v: &Value) -> bool {
    v.is_object() || v.is_array()
}

/// Walk `path` down from `root`. None if any segment is absent or addresses
/// into a non-container.
pub(crate) fn resolve<'a>(root: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path {
        cur = match (seg, cur) {
            (Segment::Key(k), Value::Object(map)) => map.get(k)?,
            (Segment::Index(i), Value::Array(arr)) => arr.get(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

/// Mutable variant of [`resolve`].
pub(crate) fn resolve_mut<'a>(root: &'a mut Value, path: &[Segment]) -> Option<&'a mut Value> {
    let mut cur = root;
    for seg in path {
        cur = match (seg, cur) {
            (Segment::Key(k), Value::Object(map)) => map.get_mut(k)?,
            (Segment::Index(i), Value::Array(arr)) => arr.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_walks_keys_and_indices() {
        let tree = json!({"b": {"c": {"arr": [34, 45]}}});
        let path = vec![
            Segment::Key("b".into()),
            Segment::Key("c".into()),
            Segment::Key("arr".into()),
            Segment::Index(1),
        ];
        assert_eq!(resolve(&tree, &path), Some(&json!(45)));
    }

    #[test]
    fn resolve_missing_segment_is_none() {
        let tree = json!({"a": 1});
        let path = vec![Segment::Key("missing".into()), Segment::Key("x".into())];
        assert!(resolve(&tree, &path).is_none());
    }

    #[test]
    fn resolve_through_scalar_is_none() {
        let tree = json!({"a": 1});
        let path = vec![Segment::Key("a".into()), Segment::Key("x".into())];
        assert!(resolve(&tree, &path).is_none());
    }

    #[test]
    fn display_shape() {
        let path = vec![Segment::Key("b".into()), Segment::Index(0), Segment::Key("r".into())];
        assert_eq!(path_display(&path), "$.b[0].r");
    }
}
