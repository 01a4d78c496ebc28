//! Background dot grid
//!
//! Dots are laid out on a world-aligned lattice but their offset follows the
//! pan at a slightly smaller factor, giving a subtle parallax depth cue. Dot
//! opacity holds at its base value through the middle zoom band and ramps
//! darker below it and lighter above it, clamped so the grid never
//! disappears entirely nor overpowers the content.

use scope_core::{Position, Size};

use crate::config::{CanvasConfig, colors};
use crate::render::frame::{DrawCommand, Frame};
use crate::viewport::Viewport;

const MIN_OPACITY: f32 = 0.05;
const MAX_OPACITY: f32 = 0.25;
const DOT_RADIUS: f32 = 1.5;

/// Zoom band within which opacity stays at the configured base
const FLAT_BAND_LOW: f32 = 0.6;
const FLAT_BAND_HIGH: f32 = 1.5;

/// Dot opacity for a zoom level: flat at `base` inside the band, ramping
/// lighter above it (slope 0.05 per zoom unit) and darker below it
/// (slope 0.1 per zoom unit)
fn dot_opacity(zoom: f32, base: f32) -> f32 {
    if zoom > FLAT_BAND_HIGH {
        (base - (zoom - FLAT_BAND_HIGH) * 0.05).max(MIN_OPACITY)
    } else if zoom < FLAT_BAND_LOW {
        (base + (FLAT_BAND_LOW - zoom) * 0.1).min(MAX_OPACITY)
    } else {
        base
    }
}

/// Paint the dot grid across the container
pub fn paint(frame: &mut Frame, viewport: &Viewport, container: Size, config: &CanvasConfig) {
    let spacing = config.grid_size * viewport.zoom;
    if spacing <= 0.0 {
        return;
    }

    let opacity = dot_opacity(viewport.zoom, config.grid_opacity);
    let color = colors::GRID_DOT.with_alpha(opacity);

    // Parallax: the grid tracks the pan slightly slower than the content
    let offset_x = (viewport.pan.x * config.grid_parallax).rem_euclid(spacing);
    let offset_y = (viewport.pan.y * config.grid_parallax).rem_euclid(spacing);

    let mut y = offset_y - spacing;
    while y <= container.height + spacing {
        let mut x = offset_x - spacing;
        while x <= container.width + spacing {
            frame.push(DrawCommand::Dot {
                center: Position::new(x, y),
                radius: DOT_RADIUS,
                color,
            });
            x += spacing;
        }
        y += spacing;
    }
}
