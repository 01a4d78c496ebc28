//! Pure renderer
//!
//! `build_frame` turns the current scene into a [`Frame`] of screen-space
//! drawing commands, back to front: background, grid, edges, node cards,
//! marquee. No drawing API is touched and nothing is mutated, so a frame
//! can be built (and asserted on) anywhere.

use std::collections::{HashMap, HashSet};

use scope_core::{Position, Rect, Size};
use scope_schema::Schema;

use crate::config::{CanvasConfig, colors};
use crate::selection::Selection;
use crate::viewport::Viewport;

pub mod edge;
pub mod frame;
pub mod grid;
pub mod node;

pub use frame::{DrawCommand, Frame, TextAlign};

/// Borrowed view of everything the renderer needs for one frame
pub struct Scene<'a> {
    pub schema: &'a Schema,
    pub positions: &'a HashMap<String, Position>,
    pub viewport: &'a Viewport,
    pub selection: &'a Selection,
    /// Names of collections whose cards are expanded
    pub expanded: &'a HashSet<String>,
    /// Marquee rectangle in screen space, while one is being drawn
    pub marquee: Option<Rect>,
    /// Rendering surface size in pixels
    pub container: Size,
    pub config: &'a CanvasConfig,
}

/// Render the scene into a display list
pub fn build_frame(scene: &Scene<'_>) -> Frame {
    let mut frame = Frame::new();
    frame.background = Some(colors::BACKGROUND);

    grid::paint(&mut frame, scene.viewport, scene.container, scene.config);

    let visible = scene
        .viewport
        .visible_world_bounds(scene.container);

    edge::paint(
        &mut frame,
        scene.schema,
        scene.positions,
        scene.viewport,
        scene.selection,
        scene.config,
        &visible,
    );

    for collection in &scene.schema.collections {
        let Some(position) = scene.positions.get(&collection.name) else {
            continue;
        };
        node::paint(
            &mut frame,
            collection,
            *position,
            scene.viewport,
            scene.selection,
            scene.expanded.contains(&collection.name),
            scene.config,
            &visible,
        );
    }

    if let Some(rect) = scene.marquee {
        frame.push(DrawCommand::DashedRect {
            rect,
            fill: colors::MARQUEE_FILL,
            stroke: colors::MARQUEE_BORDER,
            stroke_width: 1.0,
        });
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_schema::{Collection, RelationKind, Relationship};

    fn scene_schema() -> Schema {
        Schema {
            collections: vec![Collection::new("users"), Collection::new("orders")],
            relationships: vec![Relationship {
                from: "orders".to_string(),
                to: "users".to_string(),
                field: "user_id".to_string(),
                kind: RelationKind::OneToMany,
            }],
        }
    }

    fn positions() -> HashMap<String, Position> {
        let mut map = HashMap::new();
        map.insert("users".to_string(), Position::new(100.0, 100.0));
        map.insert("orders".to_string(), Position::new(500.0, 100.0));
        map
    }

    #[test]
    fn test_frame_layering() {
        let schema = scene_schema();
        let positions = positions();
        let viewport = Viewport::new();
        let selection = Selection::new();
        let expanded = HashSet::new();
        let config = CanvasConfig::default();

        let frame = build_frame(&Scene {
            schema: &schema,
            positions: &positions,
            viewport: &viewport,
            selection: &selection,
            expanded: &expanded,
            marquee: None,
            container: Size::new(1280.0, 720.0),
            config: &config,
        });

        assert_eq!(frame.background, Some(colors::BACKGROUND));

        // Edges come after the last grid dot and before the first card
        let last_dot = frame
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Dot { .. }))
            .unwrap();
        let edge = frame
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::QuadBezier { .. }))
            .unwrap();
        let first_card = frame
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::RoundedRect { .. }))
            .unwrap();
        assert!(last_dot < edge);
        assert!(edge < first_card);
    }

    #[test]
    fn test_marquee_drawn_last() {
        let schema = scene_schema();
        let positions = positions();
        let viewport = Viewport::new();
        let selection = Selection::new();
        let expanded = HashSet::new();
        let config = CanvasConfig::default();

        let frame = build_frame(&Scene {
            schema: &schema,
            positions: &positions,
            viewport: &viewport,
            selection: &selection,
            expanded: &expanded,
            marquee: Some(Rect::from_xywh(10.0, 10.0, 100.0, 80.0)),
            container: Size::new(1280.0, 720.0),
            config: &config,
        });

        assert!(matches!(
            frame.commands.last(),
            Some(DrawCommand::DashedRect { .. })
        ));
    }

    #[test]
    fn test_collection_without_position_not_rendered() {
        let schema = scene_schema();
        let mut positions = positions();
        positions.remove("orders");
        let viewport = Viewport::new();
        let selection = Selection::new();
        let expanded = HashSet::new();
        let config = CanvasConfig::default();

        let frame = build_frame(&Scene {
            schema: &schema,
            positions: &positions,
            viewport: &viewport,
            selection: &selection,
            expanded: &expanded,
            marquee: None,
            container: Size::new(1280.0, 720.0),
            config: &config,
        });

        let names: Vec<&str> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert!(names.contains(&"users"));
        assert!(!names.contains(&"orders"));
    }
}
