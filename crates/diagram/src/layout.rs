//! Layout engine: initial grid placement and force-directed auto-arrange
//!
//! The simulation runs a fixed iteration count with no convergence check,
//! trading guaranteed convergence for bounded, predictable run time on the
//! UI thread. Node order is taken from the caller's slice, never from map
//! iteration order, so two runs over the same input produce identical
//! output.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use scope_core::Position;

use crate::config::LayoutConfig;

// ============================================================================
// Cancellation
// ============================================================================

/// Shared flag for aborting an in-flight layout run between iterations.
///
/// A cancelled run returns the positions computed so far; since the engine
/// works on its own copy, the caller's position map is never corrupted by
/// an abort.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, un-cancelled flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Grid Placement
// ============================================================================

/// Deterministic initial placement: left to right, wrapping to a new row
/// every `grid_columns` nodes.
pub fn grid_placement<'a, I>(names: I, config: &LayoutConfig) -> HashMap<String, Position>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let col = index % config.grid_columns;
            let row = index / config.grid_columns;
            (
                name.to_string(),
                Position::new(
                    config.grid_origin_x + col as f32 * config.grid_spacing_x,
                    config.grid_origin_y + row as f32 * config.grid_spacing_y,
                ),
            )
        })
        .collect()
}

// ============================================================================
// Force-Directed Layout
// ============================================================================

/// A node handed to the simulation: identifier plus starting position
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub position: Position,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// An undirected attraction edge between two node identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
}

impl LayoutEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Run the force simulation and return the new positions.
///
/// Every unordered node pair repels with `repulsion / dist²` and every edge
/// attracts its endpoints with `dist * attraction`; forces integrate into
/// per-node velocities damped each iteration. Edges whose endpoints are
/// unknown are skipped. An empty node list returns an empty map.
pub fn arrange(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    config: &LayoutConfig,
    cancel: &CancelFlag,
) -> HashMap<String, Position> {
    if nodes.is_empty() {
        return HashMap::new();
    }

    let index_of: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    // Resolve edges to index pairs once, dropping stale endpoints
    let edge_indices: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| {
            let from = *index_of.get(e.from.as_str())?;
            let to = *index_of.get(e.to.as_str())?;
            Some((from, to))
        })
        .collect();

    let mut positions: Vec<Position> = nodes.iter().map(|n| n.position).collect();
    let mut velocities: Vec<Position> = vec![Position::zero(); nodes.len()];

    for _ in 0..config.iterations {
        if cancel.is_cancelled() {
            break;
        }

        let mut forces: Vec<Position> = vec![Position::zero(); nodes.len()];

        // Repulsion between all unordered pairs
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let delta = positions[j] - positions[i];
                // Coincident nodes still repel; unit distance avoids the
                // division by zero
                let dist = delta.magnitude().max(1.0);

                let force = config.repulsion / (dist * dist);
                let fx = (delta.x / dist) * force;
                let fy = (delta.y / dist) * force;

                forces[i].x -= fx;
                forces[i].y -= fy;
                forces[j].x += fx;
                forces[j].y += fy;
            }
        }

        // Attraction along edges
        for &(from, to) in &edge_indices {
            if from == to {
                continue;
            }
            let delta = positions[to] - positions[from];
            let dist = delta.magnitude().max(1.0);

            let force = dist * config.attraction;
            let fx = (delta.x / dist) * force;
            let fy = (delta.y / dist) * force;

            forces[from].x += fx;
            forces[from].y += fy;
            forces[to].x -= fx;
            forces[to].y -= fy;
        }

        // Integrate with damping and velocity decay
        for i in 0..positions.len() {
            velocities[i].x = (velocities[i].x + forces[i].x * config.damping)
                * config.velocity_decay;
            velocities[i].y = (velocities[i].y + forces[i].y * config.damping)
                * config.velocity_decay;

            positions[i].x += velocities[i].x;
            positions[i].y += velocities[i].y;
        }
    }

    nodes
        .iter()
        .zip(positions)
        .map(|(node, pos)| (node.id.clone(), pos))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
