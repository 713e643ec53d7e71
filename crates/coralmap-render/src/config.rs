use crate::{Error, Result};

/// Everything the layout and paint passes are allowed to know about the
/// output: canvas size, spacing policy, palette, typography.
///
/// All fields have usable defaults; construct with struct-update syntax:
///
/// ```
/// use coralmap_render::config::RenderConfig;
///
/// let config = RenderConfig {
///     max_depth: 4,
///     ..RenderConfig::default()
/// };
/// # assert_eq!(config.canvas_width, 1200);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Canvas background. Any SVG color keyword or `#rgb`/`#rrggbb` hex.
    pub background: String,
    /// Node fill colors assigned by tree depth: `palette[depth % len]`.
    pub palette: Vec<String>,
    /// Box outline color, shared by all depths.
    pub stroke: String,
    pub font_family: String,
    pub font_size: f64,
    /// Maximum pixel width of one rendered label line before wrapping.
    pub max_label_width: f64,
    /// Fixed horizontal distance between adjacent sibling centers.
    pub sibling_spacing: f64,
    /// Fixed vertical gap between a box's bottom edge and its children's row.
    pub level_spacing: f64,
    /// Horizontal padding per side between label and box edge.
    pub padding_x: f64,
    /// Vertical padding per side between label and box edge.
    pub padding_y: f64,
    pub corner_radius: f64,
    /// Nodes deeper than this are truncated (root is depth 0).
    pub max_depth: usize,
    /// Vertical center of the root box.
    pub root_anchor_y: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 800,
            background: "white".to_string(),
            palette: vec![
                "#ffd966".to_string(),
                "#9fc5e8".to_string(),
                "#b6d7a8".to_string(),
                "#f4cccc".to_string(),
                "#d9d2e9".to_string(),
            ],
            stroke: "#333333".to_string(),
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 16.0,
            max_label_width: 150.0,
            sibling_spacing: 200.0,
            level_spacing: 80.0,
            padding_x: 15.0,
            padding_y: 10.0,
            corner_radius: 10.0,
            max_depth: 10,
            root_anchor_y: 100.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidConfig {
                message: "canvas dimensions must be non-zero".to_string(),
            });
        }
        if self.palette.is_empty() {
            return Err(Error::InvalidConfig {
                message: "palette must contain at least one color".to_string(),
            });
        }
        if !(self.font_size.is_finite() && self.font_size >= 1.0) {
            return Err(Error::InvalidConfig {
                message: format!("font size must be at least 1px, got {}", self.font_size),
            });
        }
        if !(self.max_label_width.is_finite() && self.max_label_width > 0.0) {
            return Err(Error::InvalidConfig {
                message: "max label width must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        RenderConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_palette_is_rejected() {
        let config = RenderConfig {
            palette: Vec::new(),
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let config = RenderConfig {
            canvas_width: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
