//! Visual constants for the rendered graph.

// =============================================================================
// Node Colors
// =============================================================================

/// Nodes without a score (Gray).
pub const COLOR_MISSING: &str = "#808080";
/// Values outside the score range (Gray).
pub const COLOR_FALLBACK: &str = "#808080";

// =============================================================================
// Node Styling
// =============================================================================

/// Shape of every node.
pub const NODE_SHAPE: &str = "dot";
/// Size of every node.
pub const NODE_SIZE: u32 = 25;
/// Label font size.
pub const NODE_FONT_SIZE: u32 = 15;

// =============================================================================
// Edge Styling
// =============================================================================

/// Edge line width.
pub const EDGE_WIDTH: u32 = 2;

// =============================================================================
// Layout
// =============================================================================

/// Hierarchical layout direction (left to right).
pub const LAYOUT_DIRECTION: &str = "LR";
/// Hierarchical layout sort method.
pub const LAYOUT_SORT_METHOD: &str = "hubsize";
/// Canvas height in pixels.
pub const CANVAS_HEIGHT_PX: u32 = 800;

/// Legend shown above the graph.
pub const LEGEND: &str = "Green = High Score, Red = Low Score, Gray = N/A";
