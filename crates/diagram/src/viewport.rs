//! Viewport transform between screen space and world space
//!
//! The viewport owns the zoom factor and pan offset. Every operation is a
//! pure update on the viewport itself; callers decide when to re-render.
//! Zoom is always anchored: `zoom_at` recomputes pan so the world point
//! under the given screen point stays fixed, which keeps wheel zoom glued
//! to the cursor instead of the canvas origin.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use scope_core::{Position, Rect, Size, clamp};

use crate::config::CanvasConfig;

/// Camera state for the diagram canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom factor, clamped to the configured bounds
    pub zoom: f32,
    /// Pan offset in screen pixels, unbounded
    pub pan: Position,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Position::zero(),
        }
    }
}

impl Viewport {
    /// Create a viewport at neutral zoom and origin pan
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Coordinate Transforms
    // ========================================================================

    /// Convert a world-space point to screen space
    pub fn world_to_screen(&self, world: Position) -> Position {
        Position::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }

    /// Convert a screen-space point to world space
    pub fn screen_to_world(&self, screen: Position) -> Position {
        Position::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    // ========================================================================
    // Camera Operations
    // ========================================================================

    /// Multiply zoom by `factor`, anchored at `screen_point`.
    ///
    /// The pan is recomputed so that the world point under `screen_point`
    /// maps to the same screen point before and after the zoom change.
    pub fn zoom_at(&mut self, screen_point: Position, factor: f32, config: &CanvasConfig) {
        let old_zoom = self.zoom;
        let new_zoom = clamp(old_zoom * factor, config.min_zoom, config.max_zoom);

        if (new_zoom - old_zoom).abs() < f32::EPSILON {
            return;
        }

        let ratio = new_zoom / old_zoom;
        self.pan = Position::new(
            screen_point.x - (screen_point.x - self.pan.x) * ratio,
            screen_point.y - (screen_point.y - self.pan.y) * ratio,
        );
        self.zoom = new_zoom;
    }

    /// Step zoom in by the configured factor (zoom-indicator button)
    pub fn zoom_in(&mut self, config: &CanvasConfig) {
        self.zoom = clamp(
            self.zoom * config.zoom_step,
            config.min_zoom,
            config.max_zoom,
        );
    }

    /// Step zoom out by the configured factor
    pub fn zoom_out(&mut self, config: &CanvasConfig) {
        self.zoom = clamp(
            self.zoom / config.zoom_step,
            config.min_zoom,
            config.max_zoom,
        );
    }

    /// Reset to neutral zoom and origin pan
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fit all node positions into the container.
    ///
    /// The bounding box of the positions is expanded by one node footprint
    /// on each side; zoom is chosen to contain it without ever zooming past
    /// 100%, and pan centers the box. No-op when there are no nodes.
    pub fn fit_view(
        &mut self,
        positions: &HashMap<String, Position>,
        node_size: Size,
        container: Size,
    ) {
        if positions.is_empty() || container.width <= 0.0 || container.height <= 0.0 {
            return;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for pos in positions.values() {
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x);
            max_y = max_y.max(pos.y);
        }

        let width = (max_x - min_x) + node_size.width * 2.0;
        let height = (max_y - min_y) + node_size.height * 2.0;

        let zoom = (container.width / width)
            .min(container.height / height)
            .min(1.0);

        let center = Position::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        self.zoom = zoom;
        self.pan = Position::new(
            container.width / 2.0 - center.x * zoom,
            container.height / 2.0 - center.y * zoom,
        );
    }

    // ========================================================================
    // Culling
    // ========================================================================

    /// World-space rectangle currently visible in the container
    pub fn visible_world_bounds(&self, container: Size) -> Rect {
        let top_left = self.screen_to_world(Position::zero());
        let bottom_right = self.screen_to_world(Position::new(container.width, container.height));
        Rect::from_corners(top_left, bottom_right)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CanvasConfig {
        CanvasConfig::default()
    }

    #[test]
    fn test_round_trip_transform() {
        let viewport = Viewport {
            zoom: 1.7,
            pan: Position::new(-40.0, 95.0),
        };
        let world = Position::new(123.0, -456.0);
        let back = viewport.screen_to_world(viewport.world_to_screen(world));
        assert!((back.x - world.x).abs() < 1e-3);
        assert!((back.y - world.y).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_at_anchors_world_point() {
        let mut viewport = Viewport {
            zoom: 1.0,
            pan: Position::new(50.0, -20.0),
        };
        let anchor = Position::new(300.0, 200.0);
        let world_before = viewport.screen_to_world(anchor);

        viewport.zoom_at(anchor, 1.5, &config());
        let world_after = viewport.screen_to_world(anchor);

        assert!((world_before.x - world_after.x).abs() < 1e-3);
        assert!((world_before.y - world_after.y).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_at_anchors_across_repeated_zooms() {
        let mut viewport = Viewport::new();
        let anchor = Position::new(640.0, 360.0);
        let world_before = viewport.screen_to_world(anchor);

        for _ in 0..5 {
            viewport.zoom_at(anchor, 1.1, &config());
        }
        for _ in 0..3 {
            viewport.zoom_at(anchor, 0.9, &config());
        }

        let world_after = viewport.screen_to_world(anchor);
        assert!((world_before.x - world_after.x).abs() < 1e-2);
        assert!((world_before.y - world_after.y).abs() < 1e-2);
    }

    #[test]
    fn test_zoom_clamped_at_bounds() {
        let mut viewport = Viewport::new();
        for _ in 0..100 {
            viewport.zoom_in(&config());
        }
        assert_eq!(viewport.zoom, 4.0);

        for _ in 0..100 {
            viewport.zoom_out(&config());
        }
        assert_eq!(viewport.zoom, 0.25);
    }

    #[test]
    fn test_zoom_at_clamped_at_bounds() {
        let mut viewport = Viewport::new();
        let anchor = Position::new(100.0, 100.0);
        for _ in 0..100 {
            viewport.zoom_at(anchor, 1.5, &config());
        }
        assert_eq!(viewport.zoom, 4.0);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport {
            zoom: 2.0,
            pan: Position::new(10.0, 10.0),
        };
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_fit_view_empty_is_noop() {
        let mut viewport = Viewport {
            zoom: 2.0,
            pan: Position::new(33.0, 44.0),
        };
        let before = viewport;
        viewport.fit_view(&HashMap::new(), Size::new(320.0, 180.0), Size::new(800.0, 600.0));
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_fit_view_idempotent() {
        let mut positions = HashMap::new();
        positions.insert("users".to_string(), Position::new(100.0, 100.0));
        positions.insert("orders".to_string(), Position::new(900.0, 700.0));

        let node = Size::new(320.0, 180.0);
        let container = Size::new(800.0, 600.0);

        let mut viewport = Viewport::new();
        viewport.fit_view(&positions, node, container);
        let first = viewport;
        viewport.fit_view(&positions, node, container);
        assert_eq!(viewport, first);
    }

    #[test]
    fn test_fit_view_never_zooms_past_one() {
        let mut positions = HashMap::new();
        positions.insert("only".to_string(), Position::new(0.0, 0.0));

        let mut viewport = Viewport::new();
        viewport.fit_view(
            &positions,
            Size::new(320.0, 180.0),
            Size::new(4000.0, 4000.0),
        );
        assert_eq!(viewport.zoom, 1.0);
    }

    #[test]
    fn test_visible_world_bounds_follow_pan_and_zoom() {
        let viewport = Viewport {
            zoom: 2.0,
            pan: Position::new(-100.0, 0.0),
        };
        let bounds = viewport.visible_world_bounds(Size::new(800.0, 600.0));
        assert_eq!(bounds.position, Position::new(50.0, 0.0));
        assert_eq!(bounds.size, Size::new(400.0, 300.0));
    }
}
