//! Selection & interaction controller
//!
//! All pointer, keyboard and wheel input funnels through an explicit state
//! machine: `Idle`, `PanningCanvas`, `DraggingNode` or `DrawingMarquee`.
//! Transitions happen only through the event methods here, which makes a
//! simultaneous canvas-drag and marquee-draw structurally impossible.
//!
//! Marquee selection is reached with shift + drag on empty canvas while the
//! select tool is active; a plain drag pans. The remaining tools are
//! selectable but drive no gestures yet.

use std::collections::HashMap;

use tracing::debug;

use scope_core::{Position, Rect};

use crate::config::CanvasConfig;
use crate::selection::Selection;
use crate::viewport::Viewport;

// ============================================================================
// Tools
// ============================================================================

/// Tool modes offered by the tool panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Select nodes/edges, drag nodes, pan canvas, shift-drag marquee
    #[default]
    Select,
    /// Pan the canvas
    Pan,
    /// Placeholder tools, selectable but without gestures
    Zoom,
    Create,
    Connect,
    Comment,
    Frame,
}

impl Tool {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Pan => "Pan",
            Tool::Zoom => "Zoom",
            Tool::Create => "Create",
            Tool::Connect => "Connect",
            Tool::Comment => "Comment",
            Tool::Frame => "Frame",
        }
    }

    /// All tools in panel order
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::Pan,
            Tool::Zoom,
            Tool::Create,
            Tool::Connect,
            Tool::Comment,
            Tool::Frame,
        ]
    }
}

// ============================================================================
// Input Events
// ============================================================================

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Whether the multi-select modifier (ctrl or meta) is held
    pub fn multi_select(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse buttons the controller distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event as delivered by the host's windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Cursor position in screen space
    pub screen: Position,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// Primary-button event with no modifiers
    pub fn primary(screen: Position) -> Self {
        Self {
            screen,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    /// Same event with different modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// What the pointer went down on, as resolved by hit-testing
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    Node(String),
    Edge(String),
}

/// An opaque right-click request surfaced to outside chrome.
///
/// The engine only reports where the click landed and on what; command
/// execution belongs to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuRequest {
    pub screen: Position,
    pub target: PointerTarget,
}

// ============================================================================
// Momentum
// ============================================================================

/// Inertial pan continuation after a canvas drag is released.
///
/// Modelled as a cancellable stepper the host ticks once per frame; it is
/// dropped (cancelled) whenever a new drag gesture begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumPan {
    velocity: Position,
}

impl MomentumPan {
    /// Start momentum with the velocity captured at release
    pub fn new(velocity: Position) -> Self {
        Self { velocity }
    }

    /// Advance one frame: decay the velocity and return the pan delta to
    /// apply, or `None` once the magnitude falls below the threshold.
    pub fn step(&mut self, decay: f32, threshold: f32) -> Option<Position> {
        self.velocity = self.velocity.scale(decay);
        if self.velocity.magnitude() > threshold {
            Some(self.velocity)
        } else {
            None
        }
    }
}

// ============================================================================
// Interaction State Machine
// ============================================================================

/// The active gesture, if any
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Canvas pan drag; `anchor` is screen position minus pan at press,
    /// `velocity` is the smoothed per-move delta feeding momentum
    PanningCanvas { anchor: Position, velocity: Position },
    /// Node drag; `offset` is the world-space distance from the node origin
    /// to the cursor at press time, so the node never snaps to the cursor
    DraggingNode { id: String, offset: Position },
    /// Marquee drag, both corners in screen space
    DrawingMarquee { start: Position, current: Position },
}

/// Mutable canvas state the controller operates on, owned by the host
pub struct InteractionCtx<'a> {
    pub viewport: &'a mut Viewport,
    pub positions: &'a mut HashMap<String, Position>,
    pub selection: &'a mut Selection,
    pub config: &'a CanvasConfig,
}

/// The interaction controller: active tool, gesture state, momentum
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    tool: Tool,
    state: InteractionState,
    momentum: Option<MomentumPan>,
}

impl InteractionController {
    /// Create a controller in the select tool, idle
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Currently active tool
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current gesture state
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The marquee rectangle while one is being drawn (screen space)
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.state {
            InteractionState::DrawingMarquee { start, current } => {
                Some(Rect::from_corners(*start, *current))
            }
            _ => None,
        }
    }

    /// Whether a momentum animation is in flight
    pub fn has_momentum(&self) -> bool {
        self.momentum.is_some()
    }

    /// Switch the active tool. Any in-progress gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!(tool = tool.display_name(), "tool changed");
        self.tool = tool;
        self.state = InteractionState::Idle;
    }

    // ========================================================================
    // Pointer Events
    // ========================================================================

    /// Pointer pressed on `target`
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        input: PointerInput,
        ctx: &mut InteractionCtx<'_>,
    ) {
        if input.button != PointerButton::Primary {
            return;
        }

        // Any new press cancels in-flight momentum
        self.momentum = None;

        match target {
            PointerTarget::Node(id) => {
                ctx.selection
                    .select_node(id.clone(), input.modifiers.multi_select());

                if let Some(pos) = ctx.positions.get(&id) {
                    let world = ctx.viewport.screen_to_world(input.screen);
                    self.state = InteractionState::DraggingNode {
                        offset: world - *pos,
                        id,
                    };
                }
            }
            PointerTarget::Edge(id) => {
                ctx.selection.select_edge(id, input.modifiers.multi_select());
            }
            PointerTarget::Canvas => match self.tool {
                Tool::Select if input.modifiers.shift => {
                    self.state = InteractionState::DrawingMarquee {
                        start: input.screen,
                        current: input.screen,
                    };
                }
                Tool::Select | Tool::Pan => {
                    self.state = InteractionState::PanningCanvas {
                        anchor: input.screen - ctx.viewport.pan,
                        velocity: Position::zero(),
                    };
                }
                _ => {}
            },
        }
    }

    /// Pointer moved
    pub fn pointer_move(&mut self, input: PointerInput, ctx: &mut InteractionCtx<'_>) {
        match &mut self.state {
            InteractionState::PanningCanvas { anchor, velocity } => {
                let new_pan = input.screen - *anchor;
                let delta = new_pan - ctx.viewport.pan;
                *velocity = delta.scale(ctx.config.momentum_smoothing);
                ctx.viewport.pan = new_pan;
            }
            InteractionState::DraggingNode { id, offset } => {
                let world = ctx.viewport.screen_to_world(input.screen);
                // A node removed mid-drag is ignored silently
                if let Some(pos) = ctx.positions.get_mut(id.as_str()) {
                    *pos = world - *offset;
                }
            }
            InteractionState::DrawingMarquee { current, .. } => {
                *current = input.screen;
            }
            InteractionState::Idle => {}
        }
    }

    /// Pointer released
    pub fn pointer_up(&mut self, ctx: &mut InteractionCtx<'_>) {
        let state = std::mem::take(&mut self.state);

        match state {
            InteractionState::PanningCanvas { velocity, .. } => {
                if velocity.magnitude() > ctx.config.momentum_threshold {
                    self.momentum = Some(MomentumPan::new(velocity));
                }
            }
            InteractionState::DrawingMarquee { start, current } => {
                let rect = Rect::from_corners(start, current);
                // Toggle every node whose projected position falls inside;
                // collect first so selection mutation stays orderly
                let contained: Vec<String> = ctx
                    .positions
                    .iter()
                    .filter(|(_, pos)| rect.contains(ctx.viewport.world_to_screen(**pos)))
                    .map(|(name, _)| name.clone())
                    .collect();

                for name in contained {
                    ctx.selection.select_node(name, true);
                }
            }
            // Node position was committed continuously during the drag
            InteractionState::DraggingNode { .. } | InteractionState::Idle => {}
        }
    }

    // ========================================================================
    // Keyboard & Wheel
    // ========================================================================

    /// Escape clears all selection unconditionally and aborts any gesture
    pub fn escape(&mut self, ctx: &mut InteractionCtx<'_>) {
        ctx.selection.clear();
        self.state = InteractionState::Idle;
        self.momentum = None;
    }

    /// Wheel input. With ctrl/meta held this zooms anchored at the cursor;
    /// a plain wheel is not mapped to anything.
    pub fn wheel(&mut self, input: PointerInput, delta_y: f32, ctx: &mut InteractionCtx<'_>) {
        if !input.modifiers.multi_select() {
            return;
        }
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        ctx.viewport.zoom_at(input.screen, factor, ctx.config);
    }

    /// Build the opaque context-menu event for a right-click
    pub fn context_menu(&self, target: PointerTarget, screen: Position) -> ContextMenuRequest {
        ContextMenuRequest { screen, target }
    }

    // ========================================================================
    // Frame Tick
    // ========================================================================

    /// Advance the momentum animation one frame. Returns true while the
    /// animation is still running, so the host knows to keep scheduling
    /// redraws.
    pub fn tick(&mut self, ctx: &mut InteractionCtx<'_>) -> bool {
        let Some(momentum) = self.momentum.as_mut() else {
            return false;
        };

        match momentum.step(ctx.config.momentum_decay, ctx.config.momentum_threshold) {
            Some(delta) => {
                ctx.viewport.pan = ctx.viewport.pan + delta;
                true
            }
            None => {
                self.momentum = None;
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        viewport: Viewport,
        positions: HashMap<String, Position>,
        selection: Selection,
        config: CanvasConfig,
        controller: InteractionController,
    }

    impl Harness {
        fn new() -> Self {
            let mut positions = HashMap::new();
            positions.insert("users".to_string(), Position::new(100.0, 100.0));
            positions.insert("orders".to_string(), Position::new(500.0, 100.0));
            positions.insert("items".to_string(), Position::new(900.0, 100.0));
            Self {
                viewport: Viewport::new(),
                positions,
                selection: Selection::new(),
                config: CanvasConfig::default(),
                controller: InteractionController::new(),
            }
        }

        fn down(&mut self, target: PointerTarget, input: PointerInput) {
            let mut ctx = InteractionCtx {
                viewport: &mut self.viewport,
                positions: &mut self.positions,
                selection: &mut self.selection,
                config: &self.config,
            };
            self.controller.pointer_down(target, input, &mut ctx);
        }

        fn mv(&mut self, input: PointerInput) {
            let mut ctx = InteractionCtx {
                viewport: &mut self.viewport,
                positions: &mut self.positions,
                selection: &mut self.selection,
                config: &self.config,
            };
            self.controller.pointer_move(input, &mut ctx);
        }

        fn up(&mut self) {
            let mut ctx = InteractionCtx {
                viewport: &mut self.viewport,
                positions: &mut self.positions,
                selection: &mut self.selection,
                config: &self.config,
            };
            self.controller.pointer_up(&mut ctx);
        }

        fn tick(&mut self) -> bool {
            let mut ctx = InteractionCtx {
                viewport: &mut self.viewport,
                positions: &mut self.positions,
                selection: &mut self.selection,
                config: &self.config,
            };
            self.controller.tick(&mut ctx)
        }
    }

    #[test]
    fn test_canvas_drag_pans() {
        let mut h = Harness::new();
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(200.0, 200.0)));
        h.mv(PointerInput::primary(Position::new(250.0, 230.0)));
        assert_eq!(h.viewport.pan, Position::new(50.0, 30.0));
    }

    #[test]
    fn test_shift_drag_draws_marquee_not_pan() {
        let mut h = Harness::new();
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        h.down(
            PointerTarget::Canvas,
            PointerInput::primary(Position::new(50.0, 50.0)).with_modifiers(shift),
        );
        h.mv(PointerInput::primary(Position::new(700.0, 300.0)));

        assert!(h.controller.marquee_rect().is_some());
        assert_eq!(h.viewport.pan, Position::zero());
    }

    #[test]
    fn test_marquee_release_selects_contained_nodes() {
        let mut h = Harness::new();
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        // Covers users (100,100) and orders (500,100) but not items (900,100)
        h.down(
            PointerTarget::Canvas,
            PointerInput::primary(Position::new(50.0, 50.0)).with_modifiers(shift),
        );
        h.mv(PointerInput::primary(Position::new(600.0, 200.0)));
        h.up();

        assert!(h.selection.is_node_selected("users"));
        assert!(h.selection.is_node_selected("orders"));
        assert!(!h.selection.is_node_selected("items"));
        assert_eq!(h.selection.nodes.len(), 2);
    }

    #[test]
    fn test_node_drag_keeps_press_offset() {
        let mut h = Harness::new();
        // Press 10,20 inside the node at (100,100)
        h.down(
            PointerTarget::Node("users".to_string()),
            PointerInput::primary(Position::new(110.0, 120.0)),
        );
        h.mv(PointerInput::primary(Position::new(200.0, 220.0)));
        assert_eq!(h.positions["users"], Position::new(190.0, 200.0));
    }

    #[test]
    fn test_node_drag_selects_and_clears_edges() {
        let mut h = Harness::new();
        h.selection.select_edge("orders-users-0", false);
        h.down(
            PointerTarget::Node("users".to_string()),
            PointerInput::primary(Position::new(110.0, 120.0)),
        );
        assert!(h.selection.is_node_selected("users"));
        assert!(h.selection.edges.is_empty());
    }

    #[test]
    fn test_stale_node_drag_ignored() {
        let mut h = Harness::new();
        h.down(
            PointerTarget::Node("users".to_string()),
            PointerInput::primary(Position::new(110.0, 120.0)),
        );
        h.positions.remove("users");
        // Must not panic or resurrect the node
        h.mv(PointerInput::primary(Position::new(300.0, 300.0)));
        h.up();
        assert!(!h.positions.contains_key("users"));
    }

    #[test]
    fn test_momentum_after_fast_release() {
        let mut h = Harness::new();
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(0.0, 0.0)));
        h.mv(PointerInput::primary(Position::new(100.0, 0.0)));
        h.up();

        assert!(h.controller.has_momentum());
        let pan_before = h.viewport.pan;
        assert!(h.tick());
        assert!(h.viewport.pan.x > pan_before.x);
    }

    #[test]
    fn test_momentum_decays_to_stop() {
        let mut h = Harness::new();
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(0.0, 0.0)));
        h.mv(PointerInput::primary(Position::new(100.0, 0.0)));
        h.up();

        let mut frames = 0;
        while h.tick() {
            frames += 1;
            assert!(frames < 1000, "momentum must terminate");
        }
        assert!(!h.controller.has_momentum());
    }

    #[test]
    fn test_new_drag_cancels_momentum() {
        let mut h = Harness::new();
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(0.0, 0.0)));
        h.mv(PointerInput::primary(Position::new(100.0, 0.0)));
        h.up();
        assert!(h.controller.has_momentum());

        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(50.0, 50.0)));
        assert!(!h.controller.has_momentum());
    }

    #[test]
    fn test_escape_clears_selection_and_gesture() {
        let mut h = Harness::new();
        h.selection.select_node("users", false);
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(0.0, 0.0)));

        let mut ctx = InteractionCtx {
            viewport: &mut h.viewport,
            positions: &mut h.positions,
            selection: &mut h.selection,
            config: &h.config,
        };
        h.controller.escape(&mut ctx);

        assert!(h.selection.is_empty());
        assert_eq!(*h.controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_ctrl_wheel_zooms_anchored() {
        let mut h = Harness::new();
        let anchor = Position::new(400.0, 300.0);
        let world_before = h.viewport.screen_to_world(anchor);

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let mut ctx = InteractionCtx {
            viewport: &mut h.viewport,
            positions: &mut h.positions,
            selection: &mut h.selection,
            config: &h.config,
        };
        h.controller.wheel(
            PointerInput::primary(anchor).with_modifiers(ctrl),
            -1.0,
            &mut ctx,
        );

        assert!((h.viewport.zoom - 1.1).abs() < 1e-6);
        let world_after = h.viewport.screen_to_world(anchor);
        assert!((world_before.x - world_after.x).abs() < 1e-3);
    }

    #[test]
    fn test_plain_wheel_ignored() {
        let mut h = Harness::new();
        let mut ctx = InteractionCtx {
            viewport: &mut h.viewport,
            positions: &mut h.positions,
            selection: &mut h.selection,
            config: &h.config,
        };
        h.controller
            .wheel(PointerInput::primary(Position::new(0.0, 0.0)), -1.0, &mut ctx);
        assert_eq!(h.viewport.zoom, 1.0);
    }

    #[test]
    fn test_placeholder_tools_do_not_start_gestures() {
        let mut h = Harness::new();
        h.controller.set_tool(Tool::Connect);
        h.down(PointerTarget::Canvas, PointerInput::primary(Position::new(0.0, 0.0)));
        assert_eq!(*h.controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_secondary_button_ignored_by_state_machine() {
        let mut h = Harness::new();
        let input = PointerInput {
            screen: Position::new(0.0, 0.0),
            button: PointerButton::Secondary,
            modifiers: Modifiers::default(),
        };
        h.down(PointerTarget::Canvas, input);
        assert_eq!(*h.controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_context_menu_request_carries_target() {
        let controller = InteractionController::new();
        let req = controller.context_menu(
            PointerTarget::Node("users".to_string()),
            Position::new(12.0, 34.0),
        );
        assert_eq!(req.target, PointerTarget::Node("users".to_string()));
        assert_eq!(req.screen, Position::new(12.0, 34.0));
    }
}
