//! Display list produced by the renderer
//!
//! A frame is an ordered list of drawing commands in screen space. The
//! engine never touches a drawing API; the embedding host replays the
//! commands against whatever surface it has (canvas 2D, skia, a test
//! assertion).

use serde::{Deserialize, Serialize};

use scope_core::{Position, Rect};

use crate::config::Rgba;

/// Horizontal text alignment relative to the anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One drawing command, already transformed into screen space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled circle (grid dots)
    Dot {
        center: Position,
        radius: f32,
        color: Rgba,
    },
    /// Stroked quadratic bezier (relationship edges)
    QuadBezier {
        from: Position,
        control: Position,
        to: Position,
        width: f32,
        color: Rgba,
    },
    /// Filled polygon (arrowheads)
    Polygon { points: Vec<Position>, color: Rgba },
    /// Filled and stroked rounded rectangle (node cards, badges, plates)
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text run
    Text {
        position: Position,
        content: String,
        size: f32,
        color: Rgba,
        align: TextAlign,
    },
    /// Dash-stroked rectangle (marquee)
    DashedRect {
        rect: Rect,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    },
}

/// A complete rendered frame: background color plus ordered commands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub background: Option<Rgba>,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of commands in the frame
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the frame has no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Count commands matching a predicate, for assertions and stats
    pub fn count_where(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}
