//! Detection of the edges a branch node may be spliced into.
//!
//! Insertion points are derived state. They are recomputed from the current
//! nodes and edges and never treated as authoritative.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::workflow::{
    edge::{Edge, EdgeId},
    node::{Node, NodeId, Position},
};

/// A candidate edge where a new branch node may be inserted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BranchInsertionPoint {
    /// `{source}-{target}`
    pub id: String,
    /// edge the branch would replace
    pub edge_id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// midpoint between source and target
    pub position: Position,
    pub is_valid: bool,
}

fn index_nodes(nodes: &[Node]) -> HashMap<&str, &Node> {
    nodes.iter().map(|n| (n.id.as_str(), n)).collect()
}

/// Whether a branch may be inserted on an edge between `source` and `target`.
fn accepts_branch(
    edge: &Edge,
    source: &Node,
    target: &Node,
) -> bool {
    !edge.is_arm() && !source.is_branch() && !source.is_end() && !target.placeholder && !target.is_branch()
}

/// Find every edge a branch node can be inserted on, in edge order.
pub fn detect_insertion_points(
    nodes: &[Node],
    edges: &[Edge],
) -> Vec<BranchInsertionPoint> {
    let by_id = index_nodes(nodes);

    let points: Vec<BranchInsertionPoint> = edges
        .iter()
        .filter_map(|edge| {
            let source = by_id.get(edge.source.as_str())?;
            let target = by_id.get(edge.target.as_str())?;
            if !accepts_branch(edge, source, target) {
                return None;
            }

            Some(BranchInsertionPoint {
                id: format!("{}-{}", source.id, target.id),
                edge_id: edge.id.clone(),
                source: source.id.clone(),
                target: target.id.clone(),
                position: source.position.midpoint(&target.position),
                is_valid: true,
            })
        })
        .collect();

    trace!("insertion::detect({} edges) -> {} points", edges.len(), points.len());
    points
}

/// Whether both endpoints and the edge of `point` still exist.
pub fn is_insertion_point_valid(
    point: &BranchInsertionPoint,
    nodes: &[Node],
    edges: &[Edge],
) -> bool {
    let source_exists = nodes.iter().any(|n| n.id == point.source);
    let target_exists = nodes.iter().any(|n| n.id == point.target);
    let edge_exists = edges.iter().any(|e| e.id == point.edge_id);

    source_exists && target_exists && edge_exists
}

/// Recompute midpoints after nodes moved. Points whose nodes are gone pass through unchanged.
pub fn update_insertion_point_positions(
    points: &[BranchInsertionPoint],
    nodes: &[Node],
) -> Vec<BranchInsertionPoint> {
    let by_id = index_nodes(nodes);

    points
        .iter()
        .map(|point| match (by_id.get(point.source.as_str()), by_id.get(point.target.as_str())) {
            (Some(source), Some(target)) => BranchInsertionPoint {
                position: source.position.midpoint(&target.position),
                ..point.clone()
            },
            _ => point.clone(),
        })
        .collect()
}
