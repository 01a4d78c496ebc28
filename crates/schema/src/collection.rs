//! Collections - the diagram's node sources
//!
//! A collection is immutable during a diagram session; expand/collapse and
//! position are projections owned elsewhere and keyed by collection name.

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A document collection extracted from the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique name within a schema; doubles as the diagram node identifier
    pub name: String,
    /// Number of documents, display only
    #[serde(default, rename = "documentCount")]
    pub document_count: u64,
    /// Ordered fields as extracted
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Index descriptors flattened to display strings
    #[serde(default)]
    pub indexes: Vec<String>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document_count: 0,
            fields: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
