use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// One laid-out node box. `x`/`y` is the box center; the same point doubles
/// as the connector anchor for edges to and from this node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Wrapped label lines, top to bottom. Never empty.
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Pixel height of one label line, as measured during layout.
    pub line_height: f64,
    /// 0-based tree depth; selects the fill color.
    pub depth: usize,
}

impl LayoutNode {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }
}

/// A straight parent→child connector between two box centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: LayoutPoint,
    pub to: LayoutPoint,
    /// Depth of the child end; used for styling classes.
    pub depth: usize,
}

/// A per-node failure captured during layout or paint. Recording it here
/// instead of returning `Err` keeps sibling subtrees rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeError {
    /// Display label of the node that failed (post-placeholder).
    pub label: String,
    pub message: String,
}

/// What happened beyond the happy path: isolated node failures and whether
/// the depth bound truncated any subtree. Returned alongside the layout so
/// callers can surface a notice next to the (possibly partial) image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderReport {
    pub node_errors: Vec<NodeError>,
    pub depth_truncated: bool,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.node_errors.is_empty() && !self.depth_truncated
    }
}

/// The ephemeral result of one layout pass over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindmapLayout {
    /// Pre-order over the rendered tree.
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub report: RenderReport,
}
