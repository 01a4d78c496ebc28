//! Node card rendering
//!
//! Each collection renders as a rounded card: a header with the collection
//! name and document count, one row per field (glyph, name, type badge),
//! and a footer when fields are truncated. Collapsed cards show at most
//! `node_field_limit` fields; expanded cards show all of them, which is the
//! only thing that changes the card height.

use scope_core::{Position, Rect, Size};
use scope_schema::Collection;

use crate::config::{CanvasConfig, colors};
use crate::render::frame::{DrawCommand, Frame, TextAlign};
use crate::selection::Selection;
use crate::viewport::Viewport;

const PADDING: f32 = 16.0;
const HEADER_FONT_SIZE: f32 = 16.0;
const SUBTITLE_FONT_SIZE: f32 = 12.0;
const FIELD_FONT_SIZE: f32 = 13.0;
const BADGE_FONT_SIZE: f32 = 11.0;
const BADGE_HEIGHT: f32 = 20.0;
const BADGE_CHAR_WIDTH: f32 = 6.5;
const BADGE_PADDING: f32 = 12.0;
const GLYPH_COLUMN: f32 = 28.0;

/// Number of field rows a card shows given its expand state
pub fn visible_field_count(collection: &Collection, expanded: bool, config: &CanvasConfig) -> usize {
    if expanded {
        collection.fields.len()
    } else {
        collection.fields.len().min(config.node_field_limit)
    }
}

/// World-space bounding rectangle of a collection's card
pub fn card_rect(
    collection: &Collection,
    position: Position,
    expanded: bool,
    config: &CanvasConfig,
) -> Rect {
    let shown = visible_field_count(collection, expanded, config);
    let hidden = collection.fields.len() - shown;

    let mut height = config.node_header_height + shown as f32 * config.node_field_height;
    if hidden > 0 {
        height += config.node_field_height;
    }
    height = height.max(config.node_min_height);

    Rect::new(position, Size::new(config.node_width, height))
}

/// Paint one node card if it intersects the visible area
pub fn paint(
    frame: &mut Frame,
    collection: &Collection,
    position: Position,
    viewport: &Viewport,
    selection: &Selection,
    expanded: bool,
    config: &CanvasConfig,
    visible: &Rect,
) {
    let world_rect = card_rect(collection, position, expanded, config);
    if !world_rect.expand(config.cull_buffer).intersects(visible) {
        return;
    }

    let zoom = viewport.zoom;
    let origin = viewport.world_to_screen(position);
    let rect = Rect::new(
        origin,
        Size::new(world_rect.size.width * zoom, world_rect.size.height * zoom),
    );

    let selected = selection.is_node_selected(&collection.name);
    let hovered = selection.hovered_node.as_deref() == Some(collection.name.as_str());

    let (stroke, stroke_width) = if selected {
        (colors::NODE_BORDER_SELECTED, 2.0)
    } else if hovered {
        (colors::NODE_BORDER_HOVER, 1.5)
    } else {
        (colors::NODE_BORDER, 1.0)
    };

    frame.push(DrawCommand::RoundedRect {
        rect,
        radius: config.node_corner_radius * zoom,
        fill: colors::NODE_FILL,
        stroke,
        stroke_width: stroke_width * zoom,
    });

    // Header: name and document count
    frame.push(DrawCommand::Text {
        position: Position::new(origin.x + PADDING * zoom, origin.y + 28.0 * zoom),
        content: collection.name.clone(),
        size: HEADER_FONT_SIZE * zoom,
        color: colors::TEXT,
        align: TextAlign::Left,
    });
    frame.push(DrawCommand::Text {
        position: Position::new(origin.x + PADDING * zoom, origin.y + 50.0 * zoom),
        content: format!("{} docs", collection.document_count),
        size: SUBTITLE_FONT_SIZE * zoom,
        color: colors::TEXT_MUTED,
        align: TextAlign::Left,
    });

    let shown = visible_field_count(collection, expanded, config);
    for (row, field) in collection.fields.iter().take(shown).enumerate() {
        let row_top = origin.y
            + (config.node_header_height + row as f32 * config.node_field_height) * zoom;
        let baseline = row_top + (config.node_field_height / 2.0 + 5.0) * zoom;

        frame.push(DrawCommand::Text {
            position: Position::new(origin.x + PADDING * zoom, baseline),
            content: field.field_type.glyph().to_string(),
            size: FIELD_FONT_SIZE * zoom,
            color: colors::TEXT_MUTED,
            align: TextAlign::Left,
        });
        frame.push(DrawCommand::Text {
            position: Position::new(origin.x + (PADDING + GLYPH_COLUMN) * zoom, baseline),
            content: field.name.clone(),
            size: FIELD_FONT_SIZE * zoom,
            color: colors::TEXT,
            align: TextAlign::Left,
        });

        let badge_label = field.field_type.display_name();
        let badge_width = (badge_label.len() as f32 * BADGE_CHAR_WIDTH + BADGE_PADDING) * zoom;
        let badge_height = BADGE_HEIGHT * zoom;
        let badge_x = origin.x + rect.size.width - PADDING * zoom - badge_width;
        let badge_y = row_top + (config.node_field_height * zoom - badge_height) / 2.0;

        frame.push(DrawCommand::RoundedRect {
            rect: Rect::from_xywh(badge_x, badge_y, badge_width, badge_height),
            radius: badge_height / 2.0,
            fill: colors::BADGE_FILL,
            stroke: colors::BADGE_FILL,
            stroke_width: 0.0,
        });
        frame.push(DrawCommand::Text {
            position: Position::new(badge_x + badge_width / 2.0, badge_y + badge_height - 6.0 * zoom),
            content: badge_label.to_string(),
            size: BADGE_FONT_SIZE * zoom,
            color: colors::BADGE_TEXT,
            align: TextAlign::Center,
        });
    }

    let hidden = collection.fields.len() - shown;
    if hidden > 0 {
        let footer_top = origin.y
            + (config.node_header_height + shown as f32 * config.node_field_height) * zoom;
        frame.push(DrawCommand::Text {
            position: Position::new(
                origin.x + rect.size.width / 2.0,
                footer_top + (config.node_field_height / 2.0 + 5.0) * zoom,
            ),
            content: format!("+{hidden} more fields"),
            size: SUBTITLE_FONT_SIZE * zoom,
            color: colors::TEXT_MUTED,
            align: TextAlign::Center,
        });
    }
}
