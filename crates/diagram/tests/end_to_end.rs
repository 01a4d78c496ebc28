//! End-to-end scenario driven through the public host API only.

use scope_core::{Position, Size};
use scope_diagram::{
    CancelFlag, DiagramConfig, DiagramHost, DrawCommand, Modifiers, PointerInput,
};
use serde_json::json;

fn sample_schema() -> serde_json::Value {
    json!({
        "collections": [
            {
                "name": "users",
                "documentCount": 1200,
                "fields": [
                    {"name": "_id", "type": "ObjectId"},
                    {"name": "email", "type": "String", "sampleValues": ["ada@example.com"]}
                ]
            },
            {
                "name": "orders",
                "documentCount": 8600,
                "fields": [
                    {"name": "_id", "type": "ObjectId"},
                    {"name": "userId", "type": "ObjectId"},
                    {"name": "total", "type": "Number"}
                ]
            },
            {
                "name": "products",
                "documentCount": 300,
                "fields": [
                    {"name": "_id", "type": "ObjectId"}
                ]
            }
        ],
        "relationships": [
            {"from": "orders", "to": "users", "field": "userId", "type": "one-to-many"}
        ]
    })
}

fn loaded_host() -> DiagramHost {
    let mut host = DiagramHost::new(DiagramConfig::default());
    host.load_schema(sample_schema()).unwrap();
    host
}

#[test]
fn test_grid_placement_on_load() {
    let host = loaded_host();
    assert_eq!(host.positions()["users"], Position::new(100.0, 100.0));
    assert_eq!(host.positions()["orders"], Position::new(500.0, 100.0));
    assert_eq!(host.positions()["products"], Position::new(900.0, 100.0));
}

#[test]
fn test_auto_arrange_moves_orders_strictly_closer_to_users() {
    let mut host = loaded_host();
    let before = host.positions()["orders"].distance_to(&host.positions()["users"]);

    host.auto_arrange(&CancelFlag::new());

    let after = host.positions()["orders"].distance_to(&host.positions()["users"]);
    assert!(
        after < before,
        "connected nodes must converge: {after} >= {before}"
    );
}

#[test]
fn test_marquee_covering_two_of_three_nodes() {
    let mut host = loaded_host();

    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    // Rect over the projected positions of users and orders, short of products
    host.pointer_down(
        PointerInput::primary(Position::new(50.0, 50.0)).with_modifiers(shift),
    );
    host.pointer_move(PointerInput::primary(Position::new(600.0, 200.0)));
    host.pointer_up();

    assert!(host.selection().is_node_selected("users"));
    assert!(host.selection().is_node_selected("orders"));
    assert!(!host.selection().is_node_selected("products"));
}

#[test]
fn test_selection_exclusivity_through_host() {
    let mut host = loaded_host();

    host.select_node("users", false);
    host.select_edge("orders-users-0", false);
    assert!(host.selection().nodes.is_empty());
    assert!(host.selection().is_edge_selected("orders-users-0"));

    host.select_node("orders", false);
    assert!(host.selection().edges.is_empty());
    assert!(host.selection().is_node_selected("orders"));
}

#[test]
fn test_fit_view_then_render_full_scene() {
    let mut host = loaded_host();
    let container = Size::new(1280.0, 720.0);

    host.fit_view(container);
    assert!(host.viewport().zoom <= 1.0);

    let frame = host.render(container);
    assert!(
        frame.count_where(|c| matches!(c, DrawCommand::QuadBezier { .. })) == 1,
        "one relationship edge expected"
    );
    // Three node cards plus badges mean several rounded rects
    assert!(frame.count_where(|c| matches!(c, DrawCommand::RoundedRect { .. })) >= 3);
}

#[test]
fn test_empty_schema_is_all_noops() {
    let mut host = DiagramHost::new(DiagramConfig::default());
    host.load_schema(json!({})).unwrap();

    host.auto_arrange(&CancelFlag::new());
    host.fit_view(Size::new(800.0, 600.0));
    assert!(host.positions().is_empty());
    assert_eq!(host.viewport().zoom, 1.0);

    let frame = host.render(Size::new(800.0, 600.0));
    // Only the background grid remains
    assert_eq!(
        frame.len(),
        frame.count_where(|c| matches!(c, DrawCommand::Dot { .. }))
    );
}
