//! Selection and hover state
//!
//! Node and edge selection are mode-exclusive: selecting in node space
//! clears edge space and vice versa. Hover is single-valued per space and
//! carries no exclusivity rule.

use std::collections::HashSet;

/// Tracks what is currently selected and hovered on the canvas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected node identifiers (collection names)
    pub nodes: HashSet<String>,
    /// Selected edge identifiers
    pub edges: HashSet<String>,
    /// Hovered node, if any
    pub hovered_node: Option<String>,
    /// Hovered edge, if any
    pub hovered_edge: Option<String>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all selection (hover is left alone)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Select a node. Non-additive selection replaces the node set;
    /// additive selection toggles membership. Either way edge selection
    /// is cleared.
    pub fn select_node(&mut self, id: impl Into<String>, additive: bool) {
        let id = id.into();
        if additive {
            if !self.nodes.remove(&id) {
                self.nodes.insert(id);
            }
        } else {
            self.nodes.clear();
            self.nodes.insert(id);
        }
        self.edges.clear();
    }

    /// Select an edge, mirroring the node rules with the spaces swapped
    pub fn select_edge(&mut self, id: impl Into<String>, additive: bool) {
        let id = id.into();
        if additive {
            if !self.edges.remove(&id) {
                self.edges.insert(id);
            }
        } else {
            self.edges.clear();
            self.edges.insert(id);
        }
        self.nodes.clear();
    }

    /// Check if a node is selected
    pub fn is_node_selected(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Check if an edge is selected
    pub fn is_edge_selected(&self, id: &str) -> bool {
        self.edges.contains(id)
    }

    /// The single selected node, if exactly one is selected
    pub fn single_node(&self) -> Option<&str> {
        if self.nodes.len() == 1 {
            self.nodes.iter().next().map(String::as_str)
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
