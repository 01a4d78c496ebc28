//! # MongoScope Core
//!
//! Foundation crate for the MongoScope diagram engine: geometry primitives
//! (positions, sizes, rectangles), pure math helpers (interpolation, easing,
//! bezier geometry) and the shared error type. Everything here is stateless
//! and free of rendering or interaction concerns.

pub mod error;
pub mod geometry;
pub mod math;

// Re-export commonly used types at crate root
pub use error::{DiagramError, DiagramResult};
pub use geometry::{Position, Rect, Size};
pub use math::{
    ArrowHead, arrow_head, bezier_control_point, bezier_point, clamp, ease_in_out_cubic,
    ease_out_cubic, lerp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
