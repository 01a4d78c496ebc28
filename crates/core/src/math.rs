//! Pure math helpers used by the layout engine and renderer
//!
//! Everything here is stateless: scalar interpolation and easing, and the
//! small pieces of curve geometry behind relationship edges (quadratic
//! bezier control points, midpoint evaluation, arrowhead placement).

use crate::geometry::Position;

// ============================================================================
// Scalars
// ============================================================================

/// Clamp a value between min and max
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between two values
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-out curve
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out curve
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ============================================================================
// Bezier Curves
// ============================================================================

/// Compute the control point for a quadratic bezier between two endpoints.
///
/// The control point sits perpendicular to the straight line connecting the
/// endpoints, offset by `offset_ratio` of their distance. This produces the
/// gentle arc that keeps overlapping relationship edges visually distinct.
pub fn bezier_control_point(from: Position, to: Position, offset_ratio: f32) -> Position {
    let distance = from.distance_to(&to);
    let control_offset = distance * offset_ratio;

    let mid = from.midpoint(&to);
    let angle = from.angle_to(&to) + std::f32::consts::FRAC_PI_2;

    Position::new(
        mid.x + angle.cos() * control_offset,
        mid.y + angle.sin() * control_offset,
    )
}

/// Evaluate a quadratic bezier at parameter `t` in [0, 1]
pub fn bezier_point(from: Position, control: Position, to: Position, t: f32) -> Position {
    let u = 1.0 - t;
    Position::new(
        u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
        u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
    )
}

// ============================================================================
// Arrowheads
// ============================================================================

/// Arrowhead placement at the end of a directed edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    /// Base point of the arrowhead, pulled back from the target along the edge
    pub position: Position,
    /// Direction of the edge at the target, in degrees
    pub angle_degrees: f32,
}

/// Compute where an arrowhead of the given size sits on the segment
/// approaching `to` from `from`.
pub fn arrow_head(from: Position, to: Position, size: f32) -> ArrowHead {
    let angle = from.angle_to(&to);

    ArrowHead {
        position: Position::new(to.x - angle.cos() * size, to.y - angle.sin() * size),
        angle_degrees: angle.to_degrees(),
    }
}

// ============================================================================
// Tests
// ============================================================================
