use coralmap_core::parse_document;
use coralmap_render::config::RenderConfig;
use coralmap_render::layout::PLACEHOLDER_LABEL;
use coralmap_render::{LayoutOptions, render_document_svg};

fn render(json: &str) -> String {
    render_with(json, &RenderConfig::default()).0
}

fn render_with(json: &str, config: &RenderConfig) -> (String, coralmap_render::model::RenderReport) {
    let doc = parse_document(json).unwrap();
    render_document_svg(&doc, config, &LayoutOptions::default()).unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn single_node_svg_has_one_box_on_the_background() {
    let svg = render(r#"{"Mindmap": {"text": "Hello"}}"#);
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 1200 800""#));
    // Background rect + exactly one node box.
    assert_eq!(count(&svg, "<rect"), 2);
    assert_eq!(count(&svg, "<line"), 0);
    assert_eq!(count(&svg, ">Hello</text>"), 1);
}

#[test]
fn connector_per_parent_child_pair() {
    let svg = render(
        r#"{"Mindmap": {"text": "r", "children": [
            {"text": "a", "children": [{"text": "a1"}]},
            {"text": "b"}
        ]}}"#,
    );
    assert_eq!(count(&svg, "<rect"), 5);
    assert_eq!(count(&svg, "<line"), 3);
    assert_eq!(count(&svg, r#"class="edge edge-depth-1""#), 2);
    assert_eq!(count(&svg, r#"class="edge edge-depth-2""#), 1);
    // Connectors are painted before any node box.
    assert!(svg.find("<line").unwrap() < svg.find(r#"class="mindmap-node"#).unwrap());
}

#[test]
fn fill_color_cycles_with_depth() {
    let config = RenderConfig {
        palette: vec!["#aaaaaa".to_string(), "#bbbbbb".to_string()],
        ..RenderConfig::default()
    };
    let (svg, _) = render_with(
        r#"{"Mindmap": {"text": "r", "children": [
            {"text": "a", "children": [{"text": "a1"}]}
        ]}}"#,
        &config,
    );
    // Depth 0 and depth 2 share palette[0]; depth 1 takes palette[1].
    assert_eq!(count(&svg, r##"fill="#aaaaaa""##), 2);
    assert_eq!(count(&svg, r##"fill="#bbbbbb""##), 1);
}

#[test]
fn placeholder_is_painted_for_empty_text() {
    let svg = render(r#"{"Mindmap": {"text": ""}}"#);
    assert!(svg.contains(&format!(">{PLACEHOLDER_LABEL}</text>")));
}

#[test]
fn label_markup_is_escaped() {
    let svg = render(r#"{"Mindmap": {"text": "A & B <test>"}}"#);
    assert!(svg.contains("A &amp; B &lt;test&gt;"));
    assert!(!svg.contains("<test>"));
}

#[test]
fn wrapped_label_emits_one_text_element_per_line() {
    let svg = render(r#"{"Mindmap": {"text": "one two three four five six"}}"#);
    assert_eq!(count(&svg, "<text"), 2);
    assert!(svg.contains(">one two three</text>"));
    assert!(svg.contains(">four five six</text>"));
}

#[test]
fn truncation_is_reported_alongside_the_svg() {
    let mut json = String::from(r#"{"Mindmap": {"text": "n0""#);
    for index in 1..=11 {
        json.push_str(&format!(r#", "children": [{{"text": "n{index}""#));
    }
    json.push_str(&"}]".repeat(11));
    json.push_str("}}");

    let (svg, report) = render_with(&json, &RenderConfig::default());
    assert!(report.depth_truncated);
    assert!(!svg.contains(">n11</text>"));
    assert!(svg.contains(">n10</text>"));
}

#[test]
fn custom_canvas_and_background() {
    let config = RenderConfig {
        canvas_width: 640,
        canvas_height: 480,
        background: "#102030".to_string(),
        ..RenderConfig::default()
    };
    let (svg, report) = render_with(r#"{"Mindmap": {"text": "x"}}"#, &config);
    assert!(report.is_clean());
    assert!(svg.contains(r#"viewBox="0 0 640 480""#));
    assert!(svg.contains(r##"fill="#102030""##));
}
