//! Geometry primitives for the diagram canvas
//!
//! These types are shared between the viewport transform, the layout engine
//! and the renderer. Positions are expressed either in world space (the
//! unscaled coordinate system node layout lives in) or in screen space
//! (pixels of the rendering surface); the types themselves are agnostic.

use serde::{Deserialize, Serialize};

// ============================================================================
// Position
// ============================================================================

/// A point on the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Calculate the Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Angle in radians of the vector from this position to another
    pub fn angle_to(&self, other: &Position) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Midpoint between this position and another
    pub fn midpoint(&self, other: &Position) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Linear interpolation between two positions
    pub fn lerp(&self, other: &Position, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Scale both components by a factor
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Magnitude of this position treated as a vector
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

// ============================================================================
// Size
// ============================================================================

/// Size of an element on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a zero size
    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Calculate the area
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from coordinates and dimensions
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle spanning two arbitrary corner points
    ///
    /// The corners may be given in any order; the result is normalized so
    /// that `position` is the top-left corner. This is how the marquee
    /// rectangle is built from its press and release points.
    pub fn from_corners(a: Position, b: Position) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self {
            position: Position::new(min_x, min_y),
            size: Size::new((a.x - b.x).abs(), (a.y - b.y).abs()),
        }
    }

    /// Check if a point is contained within this rectangle
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.position.x < other.position.x + other.size.width
            && self.position.x + self.size.width > other.position.x
            && self.position.y < other.position.y + other.size.height
            && self.position.y + self.size.height > other.position.y
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Position {
        Position {
            x: self.position.x + self.size.width / 2.0,
            y: self.position.y + self.size.height / 2.0,
        }
    }

    /// Expand the rectangle by a uniform amount on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            position: Position::new(self.position.x - amount, self.position.y - amount),
            size: Size::new(
                self.size.width + amount * 2.0,
                self.size.height + amount * 2.0,
            ),
        }
    }

    /// Get the union of two rectangles (bounding box containing both)
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.position.x.min(other.position.x);
        let min_y = self.position.y.min(other.position.y);
        let max_x = (self.position.x + self.size.width).max(other.position.x + other.size.width);
        let max_y = (self.position.y + self.size.height).max(other.position.y + other.size.height);

        Self {
            position: Position::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            position: Position::default(),
            size: Size::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
