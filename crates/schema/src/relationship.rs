//! Relationships - the diagram's edge sources
//!
//! Multiple relationships may exist between the same collection pair, so
//! edge identity is derived from (from, to, ordinal index in the source
//! list), never from the pair alone.

use serde::{Deserialize, Serialize};

// ============================================================================
// Relation Kind
// ============================================================================

/// Kind of relationship between two collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    /// One document relates to exactly one other
    OneToOne,
    /// One document relates to many others
    #[default]
    OneToMany,
    /// Many documents relate to many others
    ManyToMany,
}

impl RelationKind {
    /// Parse an upstream kind label; unknown labels fall back to the default
    pub fn parse(label: &str) -> Self {
        match label {
            "one-to-one" => RelationKind::OneToOne,
            "one-to-many" => RelationKind::OneToMany,
            "many-to-many" => RelationKind::ManyToMany,
            _ => RelationKind::default(),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "One to One",
            RelationKind::OneToMany => "One to Many",
            RelationKind::ManyToMany => "Many to Many",
        }
    }

    /// Get the short cardinality label
    pub fn cardinality(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "1:1",
            RelationKind::OneToMany => "1:N",
            RelationKind::ManyToMany => "N:M",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Relationship
// ============================================================================

/// A directed relationship between two collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source collection name
    pub from: String,
    /// Target collection name
    pub to: String,
    /// Field establishing the join, shown as the edge label
    pub field: String,
    /// Relationship kind
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

impl Relationship {
    /// Create a new relationship
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        field: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            field: field.into(),
            kind,
        }
    }

    /// Derive the edge identifier for this relationship at the given ordinal
    pub fn edge_id(&self, index: usize) -> String {
        format!("{}-{}-{}", self.from, self.to, index)
    }
}

// ============================================================================
// Tests
// ============================================================================
