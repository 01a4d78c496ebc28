//! Relationship edge rendering
//!
//! Edges are quadratic bezier curves between node card centers, with the
//! control point pushed perpendicular off the midpoint so overlapping
//! relationships stay distinguishable. Stroke styling is tiered: default,
//! hovered (widest, so the cursor target pops), and selected (accent color).
//! A field label with a backing plate appears at the curve midpoint only
//! while the edge is hovered or selected.

use std::collections::HashMap;

use scope_core::{Position, Rect, arrow_head, bezier_control_point, bezier_point};
use scope_schema::Schema;

use crate::config::{CanvasConfig, Rgba, colors};
use crate::render::frame::{DrawCommand, Frame, TextAlign};
use crate::selection::Selection;
use crate::viewport::Viewport;

const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_PLATE_HEIGHT: f32 = 22.0;
const LABEL_CHAR_WIDTH: f32 = 7.0;
const LABEL_PADDING: f32 = 16.0;

/// Paint every relationship edge whose span intersects the visible area
pub fn paint(
    frame: &mut Frame,
    schema: &Schema,
    positions: &HashMap<String, Position>,
    viewport: &Viewport,
    selection: &Selection,
    config: &CanvasConfig,
    visible: &Rect,
) {
    let footprint = config.node_size();

    for (edge_id, rel) in schema.edges() {
        // Relationships naming unknown collections are skipped, not drawn
        let (Some(from_pos), Some(to_pos)) = (positions.get(&rel.from), positions.get(&rel.to))
        else {
            continue;
        };

        let from_center = Position::new(
            from_pos.x + footprint.width / 2.0,
            from_pos.y + footprint.height / 2.0,
        );
        let to_center = Position::new(
            to_pos.x + footprint.width / 2.0,
            to_pos.y + footprint.height / 2.0,
        );

        let span = Rect::from_corners(from_center, to_center).expand(config.cull_buffer);
        if !span.intersects(visible) {
            continue;
        }

        let selected = selection.is_edge_selected(&edge_id);
        let hovered = selection.hovered_edge.as_deref() == Some(edge_id.as_str());

        let (width, color) = stroke_tier(selected, hovered, config);

        let control = bezier_control_point(from_center, to_center, config.edge_curve_offset);

        let from_s = viewport.world_to_screen(from_center);
        let to_s = viewport.world_to_screen(to_center);
        // Affine transforms commute with bezier evaluation, so transforming
        // the control point transforms the whole curve
        let control_s = viewport.world_to_screen(control);

        frame.push(DrawCommand::QuadBezier {
            from: from_s,
            control: control_s,
            to: to_s,
            width: width * viewport.zoom,
            color,
        });

        paint_arrow_head(frame, control_s, to_s, color, config.arrow_size * viewport.zoom);

        if hovered || selected {
            let label = format!("{} ({})", rel.field, rel.kind.cardinality());
            paint_label(frame, from_s, control_s, to_s, &label, viewport.zoom);
        }
    }
}

fn stroke_tier(selected: bool, hovered: bool, config: &CanvasConfig) -> (f32, Rgba) {
    if selected {
        (config.edge_width_selected, colors::EDGE_SELECTED)
    } else if hovered {
        (config.edge_width_hover, colors::EDGE_HOVER)
    } else {
        (config.edge_width, colors::EDGE)
    }
}

fn paint_arrow_head(frame: &mut Frame, control: Position, to: Position, color: Rgba, size: f32) {
    let head = arrow_head(control, to, size);
    let angle = head.angle_degrees.to_radians();
    let perp = angle + std::f32::consts::FRAC_PI_2;
    let half_width = size * 0.5;

    frame.push(DrawCommand::Polygon {
        points: vec![
            to,
            Position::new(
                head.position.x + perp.cos() * half_width,
                head.position.y + perp.sin() * half_width,
            ),
            Position::new(
                head.position.x - perp.cos() * half_width,
                head.position.y - perp.sin() * half_width,
            ),
        ],
        color,
    });
}

fn paint_label(
    frame: &mut Frame,
    from: Position,
    control: Position,
    to: Position,
    label: &str,
    zoom: f32,
) {
    let mid = bezier_point(from, control, to, 0.5);

    let plate_width = (label.len() as f32 * LABEL_CHAR_WIDTH + LABEL_PADDING) * zoom;
    let plate_height = LABEL_PLATE_HEIGHT * zoom;

    frame.push(DrawCommand::RoundedRect {
        rect: Rect::from_xywh(
            mid.x - plate_width / 2.0,
            mid.y - plate_height / 2.0,
            plate_width,
            plate_height,
        ),
        radius: plate_height / 2.0,
        fill: colors::LABEL_PLATE,
        stroke: colors::NODE_BORDER,
        stroke_width: 1.0 * zoom,
    });
    frame.push(DrawCommand::Text {
        position: mid,
        content: label.to_string(),
        size: LABEL_FONT_SIZE * zoom,
        color: colors::TEXT,
        align: TextAlign::Center,
    });
}

/// Minimum distance from a point to a quadratic bezier, by dense sampling.
/// Used for edge hit-testing in screen space.
pub(crate) fn distance_to_curve(
    point: Position,
    from: Position,
    control: Position,
    to: Position,
) -> f32 {
    const SAMPLES: usize = 32;

    let mut best = f32::INFINITY;
    for i in 0..=SAMPLES {
        let t = i as f32 / SAMPLES as f32;
        let sample = bezier_point(from, control, to, t);
        best = best.min(point.distance_to(&sample));
    }
    best
}
