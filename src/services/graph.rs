//! Graph service: scores + taxonomy → colored graph payload.

use std::sync::Arc;

use crate::config::InputConfig;
use crate::error::AppError;
use crate::models::{DepthSamples, GraphPayload, NodeBudget, TaxonomyNode};
use crate::repositories::ScoreRepository;
use crate::scores::{RawScores, ScoreTable};
use crate::visualization::{ColorMapper, GraphAssembler, RedGreenScale};

use super::TreeTraverser;

/// Per-run graph construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Cap on materialized nodes.
    pub budget: NodeBudget,
    /// Min-max rescale raw scores before lookup.
    pub standardize: bool,
}

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct GraphBuild {
    /// Renderer-ready nodes and edges.
    pub payload: GraphPayload,
    /// Scores sampled per depth during traversal.
    pub depth_samples: DepthSamples,
    /// Edges whose target was cut by the budget.
    pub dangling_edges: usize,
    /// Materialized nodes that found a score.
    pub scored_nodes: usize,
    /// Labels with a score in the effective table.
    pub scored_labels: usize,
    /// Labels overridden by a later score file.
    pub label_collisions: usize,
}

/// Service running the score → traversal → payload pipeline.
///
/// Holds the raw scores of one pipeline run; each build derives its own
/// effective table and traversal state, so builds never influence each
/// other.
#[derive(Debug, Clone)]
pub struct GraphService {
    scores: Arc<RawScores>,
}

impl GraphService {
    pub fn new(scores: RawScores) -> Self {
        Self {
            scores: Arc::new(scores),
        }
    }

    /// Load and merge the score files named by the input config.
    pub fn from_config(input: &InputConfig) -> Result<Self, AppError> {
        let sources = ScoreRepository::from_config(input).load_sources()?;
        let scores = RawScores::from_sources(input.policy, &sources)?;
        Ok(Self::new(scores))
    }

    pub fn raw_scores(&self) -> &RawScores {
        &self.scores
    }

    /// Score table used for lookups under `options`.
    pub fn score_table(&self, options: &GraphOptions) -> Result<ScoreTable, AppError> {
        let table = self.scores.effective(options.standardize)?;
        if let Some((min, max)) = table.range() {
            tracing::debug!(
                standardize = options.standardize,
                min,
                max,
                "Effective score range"
            );
        }
        Ok(table)
    }

    /// Build the payload with the default red → green color scale.
    pub fn build(&self, root: &TaxonomyNode, options: &GraphOptions) -> Result<GraphBuild, AppError> {
        self.build_with(root, options, RedGreenScale)
    }

    /// Build the payload with a custom color mapper.
    pub fn build_with<M: ColorMapper>(
        &self,
        root: &TaxonomyNode,
        options: &GraphOptions,
        mapper: M,
    ) -> Result<GraphBuild, AppError> {
        let table = self.score_table(options)?;
        let traversal = TreeTraverser::new(&table, options.budget).traverse(root);
        let dangling_edges = traversal.dangling_edges().len();
        let scored_nodes = traversal
            .nodes
            .iter()
            .filter(|n| n.score.is_some())
            .count();
        let payload = GraphAssembler::new(mapper).assemble(&traversal);

        tracing::info!(
            nodes = payload.nodes.len(),
            edges = payload.edges.len(),
            dangling_edges,
            budget = %options.budget,
            standardize = options.standardize,
            "Please wait for the rendering of {} nodes and {} edges",
            payload.nodes.len(),
            payload.edges.len()
        );

        Ok(GraphBuild {
            payload,
            depth_samples: traversal.depth_samples,
            dangling_edges,
            scored_nodes,
            scored_labels: table.len(),
            label_collisions: self.scores.collisions().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeId;
    use crate::scores::{ScorePolicy, MISSING_SCORE};

    fn options(budget: NodeBudget, standardize: bool) -> GraphOptions {
        GraphOptions {
            budget,
            standardize,
        }
    }

    fn sample_tree() -> TaxonomyNode {
        TaxonomyNode::new(0, "root").with_children(vec![
            TaxonomyNode::new(1, "a, synonym"),
            TaxonomyNode::new(2, "b"),
        ])
    }

    #[test]
    fn test_build_sample_graph() {
        let table: ScoreTable = [("a", 1.0), ("b", 0.0)].into_iter().collect();
        let service = GraphService::new(RawScores::new(ScorePolicy::Single, table));

        let build = service
            .build(
                &sample_tree(),
                &GraphOptions {
                    budget: NodeBudget::Unbounded,
                    standardize: false,
                },
            )
            .unwrap();

        let nodes = &build.payload.nodes;
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].label, "root");
        assert_eq!(nodes[0].value, MISSING_SCORE);
        assert_eq!(nodes[0].color, "#808080");
        assert_eq!(nodes[1].label, "a");
        assert_eq!(nodes[1].value, 1.0);
        assert_eq!(nodes[1].color, "#00ff00");
        assert_eq!(nodes[2].label, "b");
        assert_eq!(nodes[2].value, 0.0);
        assert_eq!(nodes[2].color, "#ff0000");

        let edges: Vec<(NodeId, NodeId)> = build
            .payload
            .edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect();
        assert_eq!(
            edges,
            vec![
                (NodeId::from(0), NodeId::from(1)),
                (NodeId::from(0), NodeId::from(2))
            ]
        );
        assert_eq!(build.dangling_edges, 0);
        assert_eq!(build.scored_nodes, 2);
        assert_eq!(build.scored_labels, 2);
    }

    #[test]
    fn test_standardize_rescales_raw_scores() {
        let table: ScoreTable = [("a", 30.0), ("b", 10.0)].into_iter().collect();
        let service = GraphService::new(RawScores::new(ScorePolicy::Single, table));
        let tree = sample_tree();

        let raw = service
            .build(&tree, &options(NodeBudget::Unbounded, false))
            .unwrap();
        // Raw values outside [0, 1] fall back to gray
        assert_eq!(raw.payload.nodes[1].value, 30.0);
        assert_eq!(raw.payload.nodes[1].color, "#808080");

        let standardized = options(NodeBudget::Unbounded, true);
        let first = service.build(&tree, &standardized).unwrap();
        let second = service.build(&tree, &standardized).unwrap();
        assert_eq!(first.payload, second.payload);
        assert_eq!(first.payload.nodes[1].value, 1.0);
        assert_eq!(first.payload.nodes[2].value, 0.0);
    }

    #[test]
    fn test_degenerate_scores_fail_the_build() {
        let table: ScoreTable = [("a", 2.0), ("b", 2.0)].into_iter().collect();
        let service = GraphService::new(RawScores::new(ScorePolicy::Aggregate, table));
        let result = service.build(&sample_tree(), &GraphOptions::default());
        assert!(matches!(result, Err(AppError::DegenerateRange { .. })));
    }

    #[test]
    fn test_budget_reports_dangling_edges() {
        let table: ScoreTable = [("a", 1.0), ("b", 0.0)].into_iter().collect();
        let service = GraphService::new(RawScores::new(ScorePolicy::Single, table));
        let build = service
            .build(&sample_tree(), &options(NodeBudget::Limited(2), false))
            .unwrap();
        assert_eq!(build.payload.nodes.len(), 2);
        assert_eq!(build.payload.edges.len(), 2);
        assert_eq!(build.dangling_edges, 1);
    }

    #[test]
    fn test_raw_score_equal_to_missing_marker_still_counts() {
        let table: ScoreTable = [("a", -1.0), ("b", 3.0)].into_iter().collect();
        let service = GraphService::new(RawScores::new(ScorePolicy::Single, table));
        let build = service
            .build(&sample_tree(), &options(NodeBudget::Unbounded, false))
            .unwrap();

        assert_eq!(build.payload.nodes[1].value, -1.0);
        assert_eq!(build.scored_nodes, 2);
    }

    #[test]
    fn test_build_reports_label_collisions() {
        use crate::models::{ConsistencyRecord, ScoreSource};

        let source = |path: &str, label: &str, score: f64| {
            ScoreSource::new(
                path,
                vec![(label.to_string(), ConsistencyRecord::new(score, score, score))],
            )
        };
        let sources = vec![
            source("a.json", "a", 1.0),
            source("b.json", "A", 0.0),
            source("c.json", "b", 2.0),
        ];
        let service =
            GraphService::new(RawScores::from_sources(ScorePolicy::Aggregate, &sources).unwrap());
        let build = service
            .build(&sample_tree(), &GraphOptions::default())
            .unwrap();
        assert_eq!(build.label_collisions, 1);
    }
}
