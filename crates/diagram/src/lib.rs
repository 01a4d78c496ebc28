//! # MongoScope Diagram
//!
//! The interactive schema-diagram engine: viewport transform, layout,
//! selection and interaction state machine, pure display-list renderer, and
//! the [`DiagramHost`] facade that ties them together.
//!
//! ## Architecture
//!
//! - **Viewport**: world/screen transform with anchored zoom and fit-view
//! - **Layout**: deterministic grid placement plus cancellable
//!   force-directed auto-arrange
//! - **Selection / Interaction**: mode-exclusive selection sets and a tagged
//!   gesture state machine fed by raw pointer/keyboard/wheel input
//! - **Render**: builds a screen-space [`render::Frame`] of draw commands;
//!   never mutates state
//! - **Host**: owns all mutable state; the only mutation surface embedders
//!   see
//!
//! The engine draws nothing itself and owns no window. An embedder forwards
//! input events to the host, ticks it once per frame while animations run,
//! and replays the rendered frame on its own surface.

pub mod config;
pub mod host;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod selection;
pub mod viewport;

// Re-export commonly used types at crate root
pub use config::{CanvasConfig, DiagramConfig, LayoutConfig, Rgba, colors};
pub use host::DiagramHost;
pub use interaction::{
    ContextMenuRequest, InteractionController, InteractionCtx, InteractionState, Modifiers,
    MomentumPan, PointerButton, PointerInput, PointerTarget, Tool,
};
pub use layout::{CancelFlag, LayoutEdge, LayoutNode, arrange, grid_placement};
pub use render::{DrawCommand, Frame, Scene, TextAlign, build_frame};
pub use selection::Selection;
pub use viewport::Viewport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
