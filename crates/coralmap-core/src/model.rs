use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// The only top-level key the document format recognizes.
pub const ROOT_KEY: &str = "Mindmap";

/// A single mindmap tree element.
///
/// `text` stays `None` when the source document omitted it or supplied a
/// non-string value. The validator keeps such nodes structurally valid;
/// substituting a visible placeholder is a render-time concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child order is render order (left to right).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, self included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MindmapNode::node_count)
            .sum::<usize>()
    }

    /// Depth of the deepest node in this subtree, with `self` at depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A validated mindmap document. Exactly one root; immutable once produced
/// by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapDocument {
    #[serde(rename = "Mindmap")]
    pub root: MindmapNode,
}

/// Validates a parsed JSON value against the mindmap schema and normalizes
/// it into a canonical in-memory tree.
///
/// Pure over its input. Structural mismatches (missing or extra top-level
/// keys, non-object node values, non-array `children`) return a
/// [`Error::Schema`] naming the failed constraint; weak leaf content
/// (missing or non-string `text`) is preserved as `None` instead.
pub fn normalize(raw: &Value) -> Result<MindmapDocument> {
    let Some(top) = raw.as_object() else {
        return Err(Error::schema("top-level value is not an object"));
    };
    let Some(root_value) = top.get(ROOT_KEY) else {
        return Err(Error::schema(format!(
            "missing required root key \"{ROOT_KEY}\""
        )));
    };
    if top.len() != 1 {
        let extra = top
            .keys()
            .filter(|k| k.as_str() != ROOT_KEY)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::schema(format!(
            "unexpected top-level keys next to \"{ROOT_KEY}\": {extra}"
        )));
    }

    let root = node_from_value(root_value, ROOT_KEY)?;
    Ok(MindmapDocument { root })
}

fn node_from_value(value: &Value, path: &str) -> Result<MindmapNode> {
    let Some(obj) = value.as_object() else {
        return Err(Error::schema(format!("{path}: node is not an object")));
    };

    // A `"text"` that is absent or not a string normalizes to `None`; the
    // renderer substitutes its placeholder there.
    let text = obj.get("text").and_then(Value::as_str).map(str::to_owned);

    let mut children = Vec::new();
    if let Some(raw_children) = obj.get("children") {
        let Some(items) = raw_children.as_array() else {
            return Err(Error::schema(format!(
                "{path}.children: expected an array"
            )));
        };
        children.reserve(items.len());
        for (index, item) in items.iter().enumerate() {
            children.push(node_from_value(
                item,
                &format!("{path}.children[{index}]"),
            )?);
        }
    }

    Ok(MindmapNode { text, children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_single_root() {
        let doc = normalize(&json!({"Mindmap": {"text": "root"}})).unwrap();
        assert_eq!(doc.root.text.as_deref(), Some("root"));
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn normalize_keeps_child_order() {
        let doc = normalize(&json!({
            "Mindmap": {
                "text": "root",
                "children": [
                    {"text": "a"},
                    {"text": "b", "children": [{"text": "b1"}]},
                    {"text": "c"}
                ]
            }
        }))
        .unwrap();
        let labels: Vec<_> = doc
            .root
            .children
            .iter()
            .map(|c| c.text.as_deref().unwrap())
            .collect();
        assert_eq!(labels, ["a", "b", "c"]);
        assert_eq!(doc.root.children[1].children[0].text.as_deref(), Some("b1"));
        assert_eq!(doc.root.node_count(), 5);
        assert_eq!(doc.root.depth(), 2);
    }

    #[test]
    fn normalize_rejects_wrong_root_key() {
        let err = normalize(&json!({"NotMindmap": {}})).unwrap_err();
        assert!(err.to_string().contains("missing required root key"));
    }

    #[test]
    fn normalize_rejects_extra_top_level_keys() {
        let err = normalize(&json!({"Mindmap": {"text": "a"}, "meta": 1})).unwrap_err();
        assert!(err.to_string().contains("unexpected top-level keys"));
    }

    #[test]
    fn normalize_rejects_non_object_root_value() {
        let err = normalize(&json!({"Mindmap": "just text"})).unwrap_err();
        assert!(err.to_string().contains("not an object"));
    }

    #[test]
    fn normalize_rejects_non_array_children() {
        let err = normalize(&json!({
            "Mindmap": {"text": "a", "children": {"text": "b"}}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Mindmap.children"));
    }

    #[test]
    fn normalize_rejects_scalar_child_with_path() {
        let err = normalize(&json!({
            "Mindmap": {"text": "a", "children": [{"text": "b"}, 42]}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Mindmap.children[1]"));
    }

    #[test]
    fn normalize_defers_weak_text_to_render() {
        let doc = normalize(&json!({
            "Mindmap": {
                "children": [
                    {"text": null},
                    {"text": 7},
                    {"text": ""}
                ]
            }
        }))
        .unwrap();
        assert_eq!(doc.root.text, None);
        assert_eq!(doc.root.children[0].text, None);
        assert_eq!(doc.root.children[1].text, None);
        // An empty string survives normalization; the renderer decides.
        assert_eq!(doc.root.children[2].text.as_deref(), Some(""));
    }

    #[test]
    fn document_round_trips_through_serde() {
        let doc = normalize(&json!({
            "Mindmap": {"text": "root", "children": [{"text": "a"}]}
        }))
        .unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        let back = normalize(&value).unwrap();
        assert_eq!(doc, back);
    }
}
