//! Graph models produced by the traversal and consumed by renderers.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Default cap on materialized nodes.
pub const DEFAULT_NODE_BUDGET: usize = 512;

// ============================================================================
// Node Budget
// ============================================================================

/// Maximum number of distinct taxonomy nodes materialized into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BudgetRepr")]
pub enum NodeBudget {
    /// Stop materializing once this many nodes exist.
    Limited(usize),
    /// Materialize every reachable node.
    Unbounded,
}

impl NodeBudget {
    /// True once `visited` distinct nodes exhaust the budget.
    pub fn is_exhausted(&self, visited: usize) -> bool {
        match self {
            NodeBudget::Limited(limit) => visited >= *limit,
            NodeBudget::Unbounded => false,
        }
    }
}

impl Default for NodeBudget {
    fn default() -> Self {
        NodeBudget::Limited(DEFAULT_NODE_BUDGET)
    }
}

impl fmt::Display for NodeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeBudget::Limited(limit) => write!(f, "{}", limit),
            NodeBudget::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl FromStr for NodeBudget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(NodeBudget::Unbounded);
        }
        s.parse::<usize>().map(NodeBudget::Limited).map_err(|_| {
            format!(
                "invalid node budget '{}': expected a non-negative integer or 'unbounded'",
                s
            )
        })
    }
}

/// Config representation: an integer or the `unbounded` keyword.
#[derive(Deserialize)]
#[serde(untagged)]
enum BudgetRepr {
    Limit(usize),
    Keyword(String),
}

impl TryFrom<BudgetRepr> for NodeBudget {
    type Error = String;

    fn try_from(repr: BudgetRepr) -> Result<Self, Self::Error> {
        match repr {
            BudgetRepr::Limit(limit) => Ok(NodeBudget::Limited(limit)),
            BudgetRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

// ============================================================================
// Traversal Output
// ============================================================================

/// A materialized taxonomy node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Taxonomy node id.
    pub id: NodeId,
    /// First comma segment of the taxonomy name.
    pub label: String,
    /// Renderer shape.
    pub shape: String,
    /// Renderer size.
    pub size: u32,
    /// Score found for the node, if any.
    pub score: Option<f64>,
}

/// A directed parent → child relation.
///
/// The target may never have been materialized when the node budget ran
/// out before the child was visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

/// Scores sampled per tree depth during traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthSamples(BTreeMap<usize, Vec<f64>>);

impl DepthSamples {
    /// Record a score seen at `depth`.
    pub fn record(&mut self, depth: usize, score: f64) {
        self.0.entry(depth).or_default().push(score);
    }

    /// Samples recorded at `depth`, in traversal order.
    pub fn at(&self, depth: usize) -> &[f64] {
        self.0.get(&depth).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of samples across all depths.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Per-depth summary statistics, shallowest first.
    pub fn summaries(&self) -> Vec<DepthSummary> {
        self.0
            .iter()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(&depth, samples)| {
                let count = samples.len();
                let sum: f64 = samples.iter().sum();
                let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
                let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                DepthSummary {
                    depth,
                    count,
                    mean: sum / count as f64,
                    min,
                    max,
                }
            })
            .collect()
    }
}

/// Statistics of the scores sampled at one depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSummary {
    pub depth: usize,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of walking a taxonomy tree.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    /// Materialized nodes, in first-visit order.
    pub nodes: Vec<GraphNode>,
    /// Parent → child edges, in visit order.
    pub edges: Vec<GraphEdge>,
    /// Scores seen at each depth, including nodes cut by the budget.
    pub depth_samples: DepthSamples,
}

impl Traversal {
    /// Edges whose target was never materialized.
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        let materialized: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        self.edges
            .iter()
            .filter(|e| !materialized.contains(&e.target))
            .collect()
    }
}

// ============================================================================
// Render Payload
// ============================================================================

/// A node record as consumed by the graph renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub label: String,
    pub shape: String,
    pub size: u32,
    pub value: f64,
    /// `#RRGGBB` color derived from `value`.
    pub color: String,
}

/// An edge record as consumed by the graph renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Renderer-ready graph: ordered nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}
