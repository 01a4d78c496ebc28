//! Diagram engine configuration
//!
//! Every tunable constant of the canvas and layout subsystems lives here so
//! the host (or a config file handed to the binary) can override it, and so
//! tests can pin deterministic values. Field defaults match the reference
//! visual design.

use serde::{Deserialize, Serialize};

use scope_core::Size;

// ============================================================================
// Canvas Configuration
// ============================================================================

/// Configuration for the viewport, grid, interaction feel, and node metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Minimum zoom factor
    pub min_zoom: f32,
    /// Maximum zoom factor
    pub max_zoom: f32,
    /// Multiplicative step for the zoom in/out buttons
    pub zoom_step: f32,

    /// Grid dot spacing in world units
    pub grid_size: f32,
    /// Base grid dot opacity at neutral zoom
    pub grid_opacity: f32,
    /// Parallax factor applied to grid offset relative to pan
    pub grid_parallax: f32,

    /// Per-frame decay multiplier for momentum panning
    pub momentum_decay: f32,
    /// Momentum magnitude below which the animation stops
    pub momentum_threshold: f32,
    /// Fraction of each drag delta folded into the momentum velocity
    pub momentum_smoothing: f32,

    /// Node card width in world units
    pub node_width: f32,
    /// Minimum node card height in world units
    pub node_min_height: f32,
    /// Node card header height
    pub node_header_height: f32,
    /// Height of one field row
    pub node_field_height: f32,
    /// Node card corner radius
    pub node_corner_radius: f32,
    /// Fields shown before the card must be expanded
    pub node_field_limit: usize,

    /// Default edge stroke width
    pub edge_width: f32,
    /// Hovered edge stroke width (intentionally the thickest tier)
    pub edge_width_hover: f32,
    /// Selected edge stroke width
    pub edge_width_selected: f32,
    /// Perpendicular bezier control offset as a fraction of edge length
    pub edge_curve_offset: f32,
    /// Arrowhead size in world units
    pub arrow_size: f32,

    /// Extra world-space buffer around the viewport for culling
    pub cull_buffer: f32,
    /// Edge hit-test distance in screen pixels
    pub edge_hit_distance: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 4.0,
            zoom_step: 1.1,

            grid_size: 40.0,
            grid_opacity: 0.15,
            grid_parallax: 0.98,

            momentum_decay: 0.95,
            momentum_threshold: 0.1,
            momentum_smoothing: 0.1,

            node_width: 320.0,
            node_min_height: 180.0,
            node_header_height: 72.0,
            node_field_height: 44.0,
            node_corner_radius: 16.0,
            node_field_limit: 5,

            edge_width: 2.5,
            edge_width_hover: 3.5,
            edge_width_selected: 3.0,
            edge_curve_offset: 0.3,
            arrow_size: 12.0,

            cull_buffer: 500.0,
            edge_hit_distance: 8.0,
        }
    }
}

impl CanvasConfig {
    /// Footprint of a collapsed node card
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_min_height)
    }
}

// ============================================================================
// Layout Configuration
// ============================================================================

/// Configuration for initial grid placement and force-directed auto-arrange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Nodes per row during initial grid placement
    pub grid_columns: usize,
    /// Horizontal spacing of the placement grid
    pub grid_spacing_x: f32,
    /// Vertical spacing of the placement grid
    pub grid_spacing_y: f32,
    /// Origin of the placement grid
    pub grid_origin_x: f32,
    pub grid_origin_y: f32,

    /// Fixed iteration count for the force simulation
    pub iterations: usize,
    /// Pairwise repulsion constant
    pub repulsion: f32,
    /// Per-edge attraction constant
    pub attraction: f32,
    /// Force-to-velocity damping factor
    pub damping: f32,
    /// Per-iteration velocity decay
    pub velocity_decay: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_columns: 4,
            grid_spacing_x: 400.0,
            grid_spacing_y: 300.0,
            grid_origin_x: 100.0,
            grid_origin_y: 100.0,

            iterations: 50,
            repulsion: 50_000.0,
            attraction: 0.1,
            damping: 0.01,
            velocity_decay: 0.9,
        }
    }
}

// ============================================================================
// Diagram Configuration
// ============================================================================

/// Combined engine configuration, deserializable from a single TOML table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub canvas: CanvasConfig,
    pub layout: LayoutConfig,
}

// ============================================================================
// Colors
// ============================================================================

/// RGBA color carried through the display list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` representation
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Colors for the reference dark theme
pub mod colors {
    use super::Rgba;

    /// Canvas background
    pub const BACKGROUND: Rgba = Rgba::new(0, 0, 0, 1.0);

    /// Grid dots (alpha modulated by zoom at render time)
    pub const GRID_DOT: Rgba = Rgba::new(255, 255, 255, 0.15);

    /// Default edge stroke
    pub const EDGE: Rgba = Rgba::new(255, 255, 255, 0.25);

    /// Hovered edge stroke
    pub const EDGE_HOVER: Rgba = Rgba::new(255, 255, 255, 0.6);

    /// Selected edge stroke (accent)
    pub const EDGE_SELECTED: Rgba = Rgba::new(96, 165, 250, 1.0);

    /// Node card fill
    pub const NODE_FILL: Rgba = Rgba::new(255, 255, 255, 0.05);

    /// Node card border
    pub const NODE_BORDER: Rgba = Rgba::new(255, 255, 255, 0.15);

    /// Node card border when hovered
    pub const NODE_BORDER_HOVER: Rgba = Rgba::new(255, 255, 255, 0.3);

    /// Node card border when selected (accent)
    pub const NODE_BORDER_SELECTED: Rgba = Rgba::new(96, 165, 250, 1.0);

    /// Primary text
    pub const TEXT: Rgba = Rgba::new(255, 255, 255, 1.0);

    /// Muted text (glyphs, footers, badges)
    pub const TEXT_MUTED: Rgba = Rgba::new(255, 255, 255, 0.4);

    /// Type badge background
    pub const BADGE_FILL: Rgba = Rgba::new(96, 165, 250, 0.15);

    /// Type badge text
    pub const BADGE_TEXT: Rgba = Rgba::new(96, 165, 250, 1.0);

    /// Edge label backing plate
    pub const LABEL_PLATE: Rgba = Rgba::new(18, 18, 18, 0.85);

    /// Marquee border
    pub const MARQUEE_BORDER: Rgba = Rgba::new(96, 165, 250, 0.6);

    /// Marquee fill
    pub const MARQUEE_FILL: Rgba = Rgba::new(96, 165, 250, 0.15);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom_bounds() {
        let config = CanvasConfig::default();
        assert_eq!(config.min_zoom, 0.25);
        assert_eq!(config.max_zoom, 4.0);
    }

    #[test]
    fn test_default_layout_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.repulsion, 50_000.0);
        assert_eq!(config.attraction, 0.1);
    }

    #[test]
    fn test_rgba_css() {
        assert_eq!(
            colors::EDGE_SELECTED.css(),
            "rgba(96, 165, 250, 1)".to_string()
        );
        assert_eq!(colors::EDGE.with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: DiagramConfig =
            serde_json::from_str(r#"{"layout": {"iterations": 10}}"#).unwrap();
        assert_eq!(config.layout.iterations, 10);
        assert_eq!(config.layout.repulsion, 50_000.0);
        assert_eq!(config.canvas.max_zoom, 4.0);
    }
}
