//! Taxonomy tree model.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a taxonomy node.
///
/// Taxonomy files use either integer or string ids; both are kept verbatim
/// so the rendered payload refers to the same ids as the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(id) => write!(f, "{}", id),
            NodeId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Int(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        NodeId::Int(i64::from(id))
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::Text(id.to_string())
    }
}

/// One entry of the label hierarchy.
///
/// `name` may carry comma-separated synonyms (`"tabby, tabby cat"`); only the
/// first segment is displayed. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    /// Unique id across the whole tree.
    pub id: NodeId,
    /// Raw label, possibly with synonyms.
    pub name: String,
    /// Ordered child nodes. Absent or `null` at leaves.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<TaxonomyNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TaxonomyNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaxonomyNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaxonomyNode {
    /// Creates a leaf node.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Replaces the children of this node.
    pub fn with_children(mut self, children: Vec<TaxonomyNode>) -> Self {
        self.children = children;
        self
    }

    /// Display label: the first comma-separated segment of the name, as
    /// written. Surrounding whitespace is kept.
    pub fn display_label(&self) -> &str {
        self.name.split(',').next().unwrap_or_default()
    }

    /// Keys tried, in order, when looking up this node's score.
    ///
    /// The full lowercased name comes first; the lowercased display label is
    /// the fallback for names that carry synonyms.
    pub fn score_keys(&self) -> Vec<String> {
        let full = self.name.to_lowercase();
        let label = self.display_label().to_lowercase();
        if label == full {
            vec![full]
        } else {
            vec![full, label]
        }
    }

    /// Total number of nodes in the subtree, including duplicates.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of distinct ids in the subtree.
    pub fn unique_ids(&self) -> usize {
        self.iter()
            .map(|(node, _)| &node.id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Depth of the deepest node (the root is at depth 0).
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Pre-order iterator over `(node, depth)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&TaxonomyNode, usize)> + '_ {
        PreOrder {
            stack: vec![(self, 0)],
        }
    }
}

impl Drop for TaxonomyNode {
    // Iterative, so dropping a very deep tree cannot exhaust the stack
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order walk backed by an explicit stack.
struct PreOrder<'a> {
    stack: Vec<(&'a TaxonomyNode, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a TaxonomyNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TaxonomyNode {
        TaxonomyNode::new(0, "root").with_children(vec![
            TaxonomyNode::new(1, "a, synonym")
                .with_children(vec![TaxonomyNode::new(3, "c")]),
            TaxonomyNode::new(2, "b"),
        ])
    }

    #[test]
    fn test_display_label_takes_first_segment() {
        let node = TaxonomyNode::new(7, "tabby, tabby cat");
        assert_eq!(node.display_label(), "tabby");

        let plain = TaxonomyNode::new(8, "dog");
        assert_eq!(plain.display_label(), "dog");
    }

    #[test]
    fn test_display_label_keeps_whitespace() {
        let node = TaxonomyNode::new(9, " padded , other");
        assert_eq!(node.display_label(), " padded ");
        assert_eq!(node.score_keys(), vec![" padded , other", " padded "]);
    }

    #[test]
    fn test_score_keys_fall_back_to_label() {
        let node = TaxonomyNode::new(1, "Tabby, Tabby Cat");
        assert_eq!(node.score_keys(), vec!["tabby, tabby cat", "tabby"]);

        let plain = TaxonomyNode::new(2, "Dog");
        assert_eq!(plain.score_keys(), vec!["dog"]);
    }

    #[test]
    fn test_pre_order_iteration() {
        let tree = sample_tree();
        let order: Vec<(String, usize)> = tree
            .iter()
            .map(|(n, d)| (n.id.to_string(), d))
            .collect();
        assert_eq!(
            order,
            vec![
                ("0".to_string(), 0),
                ("1".to_string(), 1),
                ("3".to_string(), 2),
                ("2".to_string(), 1),
            ]
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn test_unique_ids_ignores_duplicates() {
        let tree = TaxonomyNode::new(0, "root").with_children(vec![
            TaxonomyNode::new(1, "a"),
            TaxonomyNode::new(1, "a again"),
        ]);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.unique_ids(), 2);
    }

    #[test]
    fn test_deserialize_mixed_ids_and_missing_children() {
        let json = r#"{"id": "n0", "name": "root", "children": [
            {"id": 1, "name": "leaf"},
            {"id": 2, "name": "null leaf", "children": null}
        ]}"#;
        let tree: TaxonomyNode = serde_json::from_str(json).unwrap();
        assert_eq!(tree.id, NodeId::from("n0"));
        assert_eq!(tree.children[0].id, NodeId::Int(1));
        assert!(tree.children[0].children.is_empty());
        assert!(tree.children[1].children.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_missing_name() {
        let json = r#"{"id": 0, "children": []}"#;
        assert!(serde_json::from_str::<TaxonomyNode>(json).is_err());
    }
}
