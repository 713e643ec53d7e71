use coralmap_core::{MindmapDocument, MindmapNode};

use crate::config::RenderConfig;
use crate::model::{LayoutEdge, LayoutNode, LayoutPoint, MindmapLayout, NodeError, RenderReport};
use crate::text::{TextMeasurer, TextStyle, wrap_label_lines};
use crate::Result;

/// Substituted for labels that are missing, non-string, or blank, so every
/// painted box has visible content.
pub const PLACEHOLDER_LABEL: &str = "(no text)";

/// Resolves the text a node displays, falling back to the placeholder.
pub fn display_text(node: &MindmapNode) -> &str {
    match node.text.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => PLACEHOLDER_LABEL,
    }
}

/// Computes per-node geometry for a whole document in one pre-order pass.
///
/// The root box is centered at `(canvas_width / 2, root_anchor_y)`; each
/// node's children share one row below it at the fixed spacing from
/// `config`. Per-node measurement failures land in the returned report and
/// skip only that subtree; the depth bound truncates silently apart from the
/// report flag.
pub fn layout_document(
    document: &MindmapDocument,
    config: &RenderConfig,
    measurer: &dyn TextMeasurer,
) -> Result<MindmapLayout> {
    config.validate()?;

    let style = TextStyle {
        font_family: Some(config.font_family.clone()),
        font_size: config.font_size,
    };
    let mut layout = MindmapLayout {
        nodes: Vec::with_capacity(document.root.node_count()),
        edges: Vec::new(),
        report: RenderReport::default(),
    };
    let root_center = LayoutPoint {
        x: f64::from(config.canvas_width) / 2.0,
        y: config.root_anchor_y,
    };
    layout_node(
        &document.root,
        root_center,
        None,
        0,
        config,
        measurer,
        &style,
        &mut layout,
    );
    Ok(layout)
}

/// Lays out one node at the given center, then recurses into its children.
///
/// Deliberately a free function with value parameters (center, depth) and
/// explicit `&mut` sinks rather than a closure over mutable state; the depth
/// bound is read from `config`, never counted down.
#[allow(clippy::too_many_arguments)]
fn layout_node(
    node: &MindmapNode,
    center: LayoutPoint,
    parent_anchor: Option<LayoutPoint>,
    depth: usize,
    config: &RenderConfig,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    layout: &mut MindmapLayout,
) {
    let label = display_text(node);
    let lines = wrap_label_lines(label, measurer, style, config.max_label_width);

    let mut label_width = 0.0_f64;
    let mut line_height = 0.0_f64;
    for line in &lines {
        let metrics = measurer.measure(line, style);
        label_width = label_width.max(metrics.width);
        line_height = line_height.max(metrics.height);
    }
    let label_height = line_height * lines.len() as f64;

    let width = label_width + 2.0 * config.padding_x;
    let height = label_height + 2.0 * config.padding_y;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        // Isolated failure: report it and keep rendering the siblings. The
        // children have no usable row position without this box, so the
        // subtree is dropped with it.
        tracing::warn!(label, width, height, "skipping node with degenerate box");
        layout.report.node_errors.push(NodeError {
            label: label.to_string(),
            message: format!("degenerate box geometry ({width} x {height})"),
        });
        return;
    }

    layout.nodes.push(LayoutNode {
        lines,
        x: center.x,
        y: center.y,
        width,
        height,
        line_height,
        depth,
    });
    if let Some(from) = parent_anchor {
        layout.edges.push(LayoutEdge {
            from,
            to: center,
            depth,
        });
    }

    if node.children.is_empty() {
        return;
    }
    if depth + 1 > config.max_depth {
        if !layout.report.depth_truncated {
            tracing::debug!(
                depth,
                max_depth = config.max_depth,
                "mindmap deeper than the depth bound; truncating"
            );
        }
        layout.report.depth_truncated = true;
        return;
    }

    // One shared row, centered under the parent: fixed sibling spacing, no
    // content-aware packing. Keeps layout O(nodes) with a single pass.
    let child_count = node.children.len();
    let row_y = (center.y - height / 2.0) + height + config.level_spacing;
    let first_x = center.x - (child_count as f64 - 1.0) * config.sibling_spacing / 2.0;
    for (index, child) in node.children.iter().enumerate() {
        let child_center = LayoutPoint {
            x: first_x + index as f64 * config.sibling_spacing,
            y: row_y,
        };
        layout_node(
            child,
            child_center,
            Some(center),
            depth + 1,
            config,
            measurer,
            style,
            layout,
        );
    }
}
