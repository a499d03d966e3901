//! Builds the renderer payload from traversal output.

use super::color::{ColorMapper, RedGreenScale};
use super::constants::COLOR_MISSING;
use crate::models::{GraphEdge, GraphNode, GraphPayload, RenderEdge, RenderNode, Traversal};
use crate::scores::MISSING_SCORE;

/// Combines materialized nodes, their colors and edges into a payload.
///
/// Edges pass through untouched; dangling targets are left for the
/// renderer to tolerate.
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler<M = RedGreenScale> {
    mapper: M,
}

impl<M: ColorMapper> GraphAssembler<M> {
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }

    /// Color every node and assemble the payload.
    ///
    /// Unscored nodes are gray without consulting the mapper.
    pub fn assemble(&self, traversal: &Traversal) -> GraphPayload {
        let colors: Vec<String> = traversal
            .nodes
            .iter()
            .map(|node| match node.score {
                Some(score) => self.mapper.color(score),
                None => COLOR_MISSING.to_string(),
            })
            .collect();
        Self::zip(&traversal.nodes, colors, &traversal.edges)
    }

    /// Pair nodes with precomputed colors, position by position.
    pub fn zip(nodes: &[GraphNode], colors: Vec<String>, edges: &[GraphEdge]) -> GraphPayload {
        let nodes = nodes
            .iter()
            .zip(colors)
            .map(|(node, color)| RenderNode {
                id: node.id.clone(),
                label: node.label.clone(),
                shape: node.shape.clone(),
                size: node.size,
                value: node.score.unwrap_or(MISSING_SCORE),
                color,
            })
            .collect();

        let edges = edges
            .iter()
            .map(|edge| RenderEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
            })
            .collect();

        GraphPayload { nodes, edges }
    }
}
