//! Diagram host
//!
//! The host owns all mutable diagram state (schema, the node position map,
//! viewport, selection, interaction and expand state) and is the only
//! mutation surface. Embedders feed it raw pointer/keyboard/wheel input and
//! high-level commands, tick it once per frame, and ask it to render; the
//! renderer itself never mutates anything.
//!
//! Node positions are keyed by collection name and live apart from the
//! schema entities, so reloading a schema or dropping a collection can
//! never leave selection or layout pointing into freed data, just at stale
//! names that every consumer ignores.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, info};

use scope_core::{DiagramResult, Position, Size};
use scope_schema::{Collection, Schema};

use crate::config::DiagramConfig;
use crate::interaction::{
    ContextMenuRequest, InteractionController, InteractionCtx, InteractionState, PointerInput,
    PointerTarget, Tool,
};
use crate::layout::{self, CancelFlag, LayoutEdge, LayoutNode};
use crate::render::{self, Frame, Scene, edge, node};
use crate::selection::Selection;
use crate::viewport::Viewport;

/// The embeddable schema-diagram engine
#[derive(Debug, Default)]
pub struct DiagramHost {
    config: DiagramConfig,
    schema: Schema,
    positions: HashMap<String, Position>,
    viewport: Viewport,
    selection: Selection,
    interaction: InteractionController,
    expanded: HashSet<String>,
}

impl DiagramHost {
    /// Create a host with the given configuration and no schema
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ========================================================================
    // Schema Lifecycle
    // ========================================================================

    /// Load a schema from an arbitrary JSON value.
    ///
    /// The value is coerced defensively; only a non-object top level fails.
    /// Nodes get deterministic grid positions, and the viewport, selection
    /// and expand state are reset.
    pub fn load_schema(&mut self, value: serde_json::Value) -> DiagramResult<()> {
        let schema = Schema::from_value(&value)?;
        info!(
            collections = schema.collections.len(),
            relationships = schema.relationships.len(),
            "schema loaded"
        );

        self.positions = layout::grid_placement(
            schema.collections.iter().map(|c| c.name.as_str()),
            &self.config.layout,
        );
        self.schema = schema;
        self.viewport.reset();
        self.selection = Selection::default();
        self.expanded.clear();
        Ok(())
    }

    /// Load a schema from JSON text
    pub fn load_schema_json(&mut self, json: &str) -> DiagramResult<()> {
        self.load_schema(serde_json::from_str(json)?)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Switch the active tool
    pub fn set_tool(&mut self, tool: Tool) {
        self.interaction.set_tool(tool);
    }

    /// Step zoom in (zoom-indicator button)
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.config.canvas);
    }

    /// Step zoom out
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.config.canvas);
    }

    /// Reset the camera and clear all selection
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.selection.clear();
    }

    /// Fit every node into the container
    pub fn fit_view(&mut self, container: Size) {
        self.viewport
            .fit_view(&self.positions, self.config.canvas.node_size(), container);
    }

    /// Run force-directed layout over the current graph.
    ///
    /// Runs to completion or until `cancel` fires; either way the position
    /// map is replaced wholesale with the simulation output.
    pub fn auto_arrange(&mut self, cancel: &CancelFlag) {
        let nodes: Vec<LayoutNode> = self
            .schema
            .collections
            .iter()
            .filter_map(|c| {
                self.positions
                    .get(&c.name)
                    .map(|pos| LayoutNode::new(c.name.clone(), *pos))
            })
            .collect();
        let edges: Vec<LayoutEdge> = self
            .schema
            .relationships
            .iter()
            .map(|r| LayoutEdge::new(r.from.clone(), r.to.clone()))
            .collect();

        let start = Instant::now();
        self.positions = layout::arrange(&nodes, &edges, &self.config.layout, cancel);
        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            cancelled = cancel.is_cancelled(),
            "auto-arrange finished"
        );
    }

    /// Clear node and edge selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select a node (replace, or toggle when additive)
    pub fn select_node(&mut self, id: impl Into<String>, additive: bool) {
        self.selection.select_node(id, additive);
    }

    /// Select an edge (replace, or toggle when additive)
    pub fn select_edge(&mut self, id: impl Into<String>, additive: bool) {
        self.selection.select_edge(id, additive);
    }

    /// Move a node to an absolute world position. Unknown names are ignored.
    pub fn set_node_position(&mut self, name: &str, position: Position) {
        if let Some(pos) = self.positions.get_mut(name) {
            *pos = position;
        }
    }

    /// Toggle a node card between collapsed and expanded
    pub fn toggle_expanded(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.expanded.remove(&name) {
            self.expanded.insert(name);
        }
    }

    /// Set the hovered node directly (embedders with their own hit-testing)
    pub fn set_hovered_node(&mut self, name: Option<String>) {
        self.selection.hovered_node = name;
    }

    /// Set the hovered edge directly
    pub fn set_hovered_edge(&mut self, id: Option<String>) {
        self.selection.hovered_edge = id;
    }

    // ========================================================================
    // Input Intake
    // ========================================================================

    /// Pointer pressed; the press target is resolved by hit-testing
    pub fn pointer_down(&mut self, input: PointerInput) {
        let target = self.hit_test(input.screen);
        debug!(?target, "pointer down");
        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.pointer_down(target, input, &mut ctx);
    }

    /// Pointer moved; hover is re-resolved while no gesture is active
    pub fn pointer_move(&mut self, input: PointerInput) {
        if matches!(self.interaction.state(), InteractionState::Idle) {
            match self.hit_test(input.screen) {
                PointerTarget::Node(name) => {
                    self.selection.hovered_node = Some(name);
                    self.selection.hovered_edge = None;
                }
                PointerTarget::Edge(id) => {
                    self.selection.hovered_node = None;
                    self.selection.hovered_edge = Some(id);
                }
                PointerTarget::Canvas => {
                    self.selection.hovered_node = None;
                    self.selection.hovered_edge = None;
                }
            }
        }

        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.pointer_move(input, &mut ctx);
    }

    /// Pointer released
    pub fn pointer_up(&mut self) {
        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.pointer_up(&mut ctx);
    }

    /// Escape key
    pub fn escape(&mut self) {
        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.escape(&mut ctx);
    }

    /// Wheel input (ctrl/meta held zooms at the cursor)
    pub fn wheel(&mut self, input: PointerInput, delta_y: f32) {
        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.wheel(input, delta_y, &mut ctx);
    }

    /// Right-click: resolve the target and surface a request for the
    /// embedder's context-menu chrome
    pub fn context_menu(&self, screen: Position) -> ContextMenuRequest {
        self.interaction.context_menu(self.hit_test(screen), screen)
    }

    /// Advance per-frame animations (momentum pan). Returns true while
    /// another frame is needed.
    pub fn tick(&mut self) -> bool {
        let mut ctx = InteractionCtx {
            viewport: &mut self.viewport,
            positions: &mut self.positions,
            selection: &mut self.selection,
            config: &self.config.canvas,
        };
        self.interaction.tick(&mut ctx)
    }

    // ========================================================================
    // Hit Testing
    // ========================================================================

    /// Resolve what lies under a screen point: topmost node, else nearest
    /// edge within the hit distance, else the canvas.
    fn hit_test(&self, screen: Position) -> PointerTarget {
        let world = self.viewport.screen_to_world(screen);

        // Later collections render on top, so test them first
        for collection in self.schema.collections.iter().rev() {
            let Some(pos) = self.positions.get(&collection.name) else {
                continue;
            };
            let rect = node::card_rect(
                collection,
                *pos,
                self.expanded.contains(&collection.name),
                &self.config.canvas,
            );
            if rect.contains(world) {
                return PointerTarget::Node(collection.name.clone());
            }
        }

        let footprint = self.config.canvas.node_size();
        for (edge_id, rel) in self.schema.edges() {
            let (Some(from), Some(to)) =
                (self.positions.get(&rel.from), self.positions.get(&rel.to))
            else {
                continue;
            };
            let from_c = Position::new(
                from.x + footprint.width / 2.0,
                from.y + footprint.height / 2.0,
            );
            let to_c = Position::new(
                to.x + footprint.width / 2.0,
                to.y + footprint.height / 2.0,
            );
            let control =
                scope_core::bezier_control_point(from_c, to_c, self.config.canvas.edge_curve_offset);

            let distance = edge::distance_to_curve(
                screen,
                self.viewport.world_to_screen(from_c),
                self.viewport.world_to_screen(control),
                self.viewport.world_to_screen(to_c),
            );
            if distance <= self.config.canvas.edge_hit_distance {
                return PointerTarget::Edge(edge_id);
            }
        }

        PointerTarget::Canvas
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn positions(&self) -> &HashMap<String, Position> {
        &self.positions
    }

    pub fn tool(&self) -> Tool {
        self.interaction.tool()
    }

    /// Whether a node card is expanded
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    /// The collection behind the single selected node, for info-panel style
    /// consumers
    pub fn single_selected_collection(&self) -> Option<&Collection> {
        let name = self.selection.single_node()?;
        self.schema.collection(name)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the current scene into a display list
    pub fn render(&self, container: Size) -> Frame {
        render::build_frame(&Scene {
            schema: &self.schema,
            positions: &self.positions,
            viewport: &self.viewport,
            selection: &self.selection,
            expanded: &self.expanded,
            marquee: self.interaction.marquee_rect(),
            container,
            config: &self.config.canvas,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
