//! Depth-first taxonomy traversal with a node budget.

use std::collections::HashSet;

use crate::models::{GraphEdge, GraphNode, NodeBudget, NodeId, TaxonomyNode, Traversal};
use crate::scores::ScoreTable;
use crate::visualization::constants::{NODE_SHAPE, NODE_SIZE};

/// Pending visit: a node, its depth and the parent it was reached from.
struct Frame<'a> {
    node: &'a TaxonomyNode,
    depth: usize,
    parent: Option<&'a NodeId>,
}

/// Walks a taxonomy in pre-order and materializes graph nodes and edges.
///
/// Per visited node, in order:
/// 1. the edge from its parent is recorded,
/// 2. its score (if any) is sampled at its depth,
/// 3. if the budget is exhausted the node and its subtree are skipped,
/// 4. otherwise the node is materialized on first visit of its id and its
///    children are queued.
///
/// Because edges are recorded before the budget check, edges may point at
/// children that were never materialized. Duplicate ids are materialized
/// once; later occurrences still contribute their subtrees.
///
/// The walk uses an explicit stack, so tree depth is bounded only by memory.
pub struct TreeTraverser<'s> {
    scores: &'s ScoreTable,
    budget: NodeBudget,
}

impl<'s> TreeTraverser<'s> {
    pub fn new(scores: &'s ScoreTable, budget: NodeBudget) -> Self {
        Self { scores, budget }
    }

    pub fn traverse(&self, root: &TaxonomyNode) -> Traversal {
        let mut traversal = Traversal::default();
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut stack = vec![Frame {
            node: root,
            depth: 0,
            parent: None,
        }];

        while let Some(Frame {
            node,
            depth,
            parent,
        }) = stack.pop()
        {
            if let Some(parent) = parent {
                traversal
                    .edges
                    .push(GraphEdge::new(parent.clone(), node.id.clone()));
            }

            let score = self.scores.lookup_node(node);
            if let Some(score) = score {
                traversal.depth_samples.record(depth, score);
            }

            if self.budget.is_exhausted(visited.len()) {
                continue;
            }

            if visited.insert(&node.id) {
                traversal.nodes.push(GraphNode {
                    id: node.id.clone(),
                    label: node.display_label().to_string(),
                    shape: NODE_SHAPE.to_string(),
                    size: NODE_SIZE,
                    score,
                });
            }

            // Reverse push keeps source order on pop
            stack.extend(node.children.iter().rev().map(|child| Frame {
                node: child,
                depth: depth + 1,
                parent: Some(&node.id),
            }));
        }

        tracing::debug!(
            nodes = traversal.nodes.len(),
            edges = traversal.edges.len(),
            samples = traversal.depth_samples.total(),
            budget = %self.budget,
            "Traversal finished"
        );
        traversal
    }
}
