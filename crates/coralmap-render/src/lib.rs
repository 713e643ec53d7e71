#![forbid(unsafe_code)]

//! Headless layout + SVG painter for mindmap documents.
//!
//! Input is a validated [`coralmap_core::MindmapDocument`]; output is a
//! [`model::MindmapLayout`] (per-node geometry plus a failure report) and,
//! from [`svg::render_svg`], a standalone SVG string. Rasterization lives in
//! the `coralmap` facade crate behind its `raster` feature.
//!
//! Layout is one synchronous recursive pass with fixed per-level spacing:
//! O(nodes), no two-pass width pre-computation. The tradeoff — wide sibling
//! subtrees can visually collide — is accepted because the wrap width caps
//! worst-case box width.

pub mod config;
pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use std::sync::Arc;

use coralmap_core::MindmapDocument;

use crate::config::RenderConfig;
use crate::model::MindmapLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid render config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Lays out a document with the measurer from `options`.
pub fn layout_document(
    document: &MindmapDocument,
    config: &RenderConfig,
    options: &LayoutOptions,
) -> Result<MindmapLayout> {
    layout::layout_document(document, config, options.text_measurer.as_ref())
}

/// Layout + paint in one call: the common path for SVG consumers.
pub fn render_document_svg(
    document: &MindmapDocument,
    config: &RenderConfig,
    options: &LayoutOptions,
) -> Result<(String, model::RenderReport)> {
    let layout = layout_document(document, config, options)?;
    let svg = svg::render_svg(&layout, config);
    Ok((svg, layout.report))
}
