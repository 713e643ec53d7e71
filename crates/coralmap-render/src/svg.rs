use std::fmt::Write as _;

use crate::config::RenderConfig;
use crate::model::MindmapLayout;

/// Baseline offset of a text line from its row top, as a fraction of the
/// font size. Approximates the ascent of common sans-serif faces; the
/// rasterizer's actual font metrics are an accepted variance.
const BASELINE_FACTOR: f64 = 0.8;

/// Paints a laid-out mindmap as a standalone SVG document.
///
/// Connectors are emitted before boxes; since every connector joins two box
/// centers, the stacking is visually identical to interleaved painting.
pub fn render_svg(layout: &MindmapLayout, config: &RenderConfig) -> String {
    let canvas_w = f64::from(config.canvas_width);
    let canvas_h = f64::from(config.canvas_height);
    let font_family = escape_xml(&config.font_family);
    let stroke = escape_xml(&config.stroke);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="mindmap">"#,
        w = fmt(canvas_w),
        h = fmt(canvas_h),
    );
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
        w = fmt(canvas_w),
        h = fmt(canvas_h),
        fill = escape_xml(&config.background),
    );

    for edge in &layout.edges {
        let _ = write!(
            &mut out,
            r#"<line class="edge edge-depth-{depth}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="2"/>"#,
            depth = edge.depth,
            x1 = fmt(edge.from.x),
            y1 = fmt(edge.from.y),
            x2 = fmt(edge.to.x),
            y2 = fmt(edge.to.y),
            stroke = stroke,
        );
    }

    for node in &layout.nodes {
        let fill = &config.palette[node.depth % config.palette.len()];
        let _ = write!(
            &mut out,
            r#"<g class="mindmap-node depth-{depth}"><rect x="{x}" y="{y}" rx="{r}" ry="{r}" width="{w}" height="{h}" fill="{fill}" stroke="{stroke}" stroke-width="1.5"/>"#,
            depth = node.depth,
            x = fmt(node.left()),
            y = fmt(node.top()),
            r = fmt(config.corner_radius),
            w = fmt(node.width),
            h = fmt(node.height),
            fill = escape_xml(fill),
            stroke = stroke,
        );
        for (index, line) in node.lines.iter().enumerate() {
            let baseline = node.top()
                + config.padding_y
                + index as f64 * node.line_height
                + BASELINE_FACTOR * config.font_size;
            let _ = write!(
                &mut out,
                r#"<text x="{x}" y="{y}" text-anchor="middle" font-family="{ff}" font-size="{fs}px" fill="{fill}">{text}</text>"#,
                x = fmt(node.x),
                y = fmt(baseline),
                ff = font_family,
                fs = fmt(config.font_size),
                fill = stroke,
                text = escape_xml(line),
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Stringifies a coordinate for an SVG attribute: round-trippable decimal
/// form, with `-0` and sub-pixel float noise flattened away.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_flattens_noise() {
        assert_eq!(fmt(599.9999999), "600");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escape_xml_covers_markup_chars() {
        assert_eq!(escape_xml(r#"a<b&"c"'d'>"#), "a&lt;b&amp;&quot;c&quot;&#39;d&#39;&gt;");
    }
}
