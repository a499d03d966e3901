//! Business logic services.
//!
//! The traverser walks a taxonomy; the graph service runs the whole
//! score → traversal → payload pipeline on top of it.

mod graph;
mod traversal;

pub use graph::{GraphBuild, GraphOptions, GraphService};
pub use traversal::TreeTraverser;
