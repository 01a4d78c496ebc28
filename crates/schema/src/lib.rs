//! # MongoScope Schema
//!
//! The normalized schema data model consumed by the diagram engine.
//!
//! ## Core Concepts
//!
//! - **Collection**: a document collection, the source of a diagram node
//! - **Field**: a named, typed property of a collection, with display-only
//!   sample values
//! - **Relationship**: a directed join between two collections, the source
//!   of a diagram edge
//! - **Schema**: the root container, built by defensively coercing whatever
//!   JSON the extraction service returned
//!
//! Schema data is immutable for the lifetime of a diagram session. Node
//! positions and expand/collapse state are projections owned by the diagram
//! crate and keyed by collection name, so the schema itself never changes
//! under layout or interaction.

pub mod collection;
pub mod field;
pub mod relationship;
pub mod schema;

// Re-export commonly used types at crate root
pub use collection::Collection;
pub use field::{Field, FieldType, MAX_SAMPLE_VALUES, format_sample_value};
pub use relationship::{RelationKind, Relationship};
pub use schema::Schema;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
