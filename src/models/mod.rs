//! Domain models for taxonomies, score records and rendered graphs.

mod graph;
mod scores;
mod taxonomy;

pub use graph::{
    DepthSamples, DepthSummary, GraphEdge, GraphNode, GraphPayload, NodeBudget, RenderEdge,
    RenderNode, Traversal,
};
pub use scores::{ConsistencyRecord, ScoreSource, TYPE_1_FIELD, TYPE_2_FIELD, TYPE_3_FIELD};
pub use taxonomy::{NodeId, TaxonomyNode};
