#![forbid(unsafe_code)]

//! `coralmap` is a headless mindmap renderer.
//!
//! It consumes a JSON document shaped `{"Mindmap": {"text": "...",
//! "children": [...]}}` — typically produced by an upstream text-model
//! collaborator — validates it into a canonical tree, lays the tree out with
//! fixed per-level spacing, and paints it to SVG or raster bytes. The
//! generation step and any UI around it are out of scope; this crate starts
//! at raw JSON text and ends at image bytes.
//!
//! # Features
//!
//! - `render`: layout + SVG painting (`coralmap::render`)
//! - `raster` (default): PNG/JPEG output via pure-Rust SVG rasterization

pub use coralmap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use coralmap_render::config::RenderConfig;
    pub use coralmap_render::layout::PLACEHOLDER_LABEL;
    pub use coralmap_render::model::{
        LayoutEdge, LayoutNode, MindmapLayout, NodeError, RenderReport,
    };
    pub use coralmap_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use coralmap_render::{LayoutOptions, layout_document, render_document_svg};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum RenderError {
        #[error(transparent)]
        Parse(#[from] coralmap_core::Error),
        #[error(transparent)]
        Render(#[from] coralmap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, RenderError>;

    /// A painted SVG document plus everything that went wrong while painting
    /// it (isolated node failures, depth truncation).
    #[derive(Debug, Clone)]
    pub struct RenderedSvg {
        pub svg: String,
        pub report: RenderReport,
    }

    /// Synchronous parse + layout helper (executor-free).
    pub fn layout_sync(
        text: &str,
        config: &RenderConfig,
        options: &LayoutOptions,
    ) -> Result<MindmapLayout> {
        let document = coralmap_core::parse_document(text)?;
        Ok(layout_document(&document, config, options)?)
    }

    /// Synchronous parse + layout + paint helper (executor-free).
    pub fn render_svg_sync(
        text: &str,
        config: &RenderConfig,
        options: &LayoutOptions,
    ) -> Result<RenderedSvg> {
        let document = coralmap_core::parse_document(text)?;
        let (svg, report) = render_document_svg(&document, config, options)?;
        Ok(RenderedSvg { svg, report })
    }

    pub async fn render_svg(
        text: &str,
        config: &RenderConfig,
        options: &LayoutOptions,
    ) -> Result<RenderedSvg> {
        render_svg_sync(text, config, options)
    }

    /// Convenience wrapper bundling a [`RenderConfig`] and [`LayoutOptions`]
    /// for embedders that render repeatedly.
    ///
    /// Runtime-agnostic: all work is CPU-bound, the `async` methods are
    /// plain passthroughs with no suspension points. Reentrant — every call
    /// paints onto its own canvas.
    #[derive(Clone, Default)]
    pub struct Renderer {
        pub config: RenderConfig,
        pub layout: LayoutOptions,
    }

    impl Renderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: RenderConfig) -> Self {
            self.config = config;
            self
        }

        pub fn layout_sync(&self, text: &str) -> Result<MindmapLayout> {
            layout_sync(text, &self.config, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<RenderedSvg> {
            render_svg_sync(text, &self.config, &self.layout)
        }

        pub async fn render_svg(&self, text: &str) -> Result<RenderedSvg> {
            self.render_svg_sync(text)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<raster::RasterOutcome> {
            raster::render_png_sync(text, &self.config, &self.layout, raster)
        }

        #[cfg(feature = "raster")]
        pub async fn render_png(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<raster::RasterOutcome> {
            self.render_png_sync(text, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<raster::RasterOutcome> {
            raster::render_jpeg_sync(text, &self.config, &self.layout, raster)
        }
    }
}
