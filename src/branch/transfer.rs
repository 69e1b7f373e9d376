//! Step transfer analysis.
//!
//! When a branch is inserted on `source -> target`, everything reachable from
//! `target` moves onto the first arm of the new branch. The analyzer walks
//! that subgraph; the validator decides whether the move is structurally
//! sound before any edit is made.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    FlowbranchError, Result,
    workflow::{
        edge::Edge,
        node::{Node, NodeId},
    },
};

/// Steps and edges downstream of a split point.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StepAnalysisResult {
    /// nodes reachable from the target, the target first
    pub following_steps: Vec<Node>,
    /// outgoing edges of the following steps
    pub following_edges: Vec<Edge>,
    /// edges entering the following steps from outside the transferred chain
    pub affected_edges: Vec<Edge>,
}

impl StepAnalysisResult {
    pub fn step_ids(&self) -> Vec<&str> {
        self.following_steps.iter().map(|n| n.id.as_str()).collect()
    }
}

/// Walk forward from `target_id` and collect what has to move with it.
pub fn analyze_transfer(
    source_id: &str,
    target_id: &str,
    nodes: &[Node],
    edges: &[Edge],
) -> StepAnalysisResult {
    trace!("transfer::analyze({} -> {})", source_id, target_id);

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = VecDeque::from([target_id.to_string()]);
    let mut result = StepAnalysisResult::default();
    let mut incoming: Vec<&Edge> = Vec::new();

    while let Some(current) = queue.pop_front() {
        if visited.contains(&current) {
            continue;
        }
        visited.insert(current.clone());

        let Some(node) = nodes.iter().find(|n| n.id == current) else {
            continue;
        };
        result.following_steps.push(node.clone());

        for edge in edges.iter().filter(|e| e.source == current) {
            result.following_edges.push(edge.clone());
            if !visited.contains(&edge.target) {
                queue.push_back(edge.target.clone());
            }
        }
        incoming.extend(edges.iter().filter(|e| e.target == current));
    }

    // The edge from the split point is replaced by the branch node, and edges
    // between transferred steps travel with them.
    result.affected_edges = incoming.into_iter().filter(|e| e.source != source_id && !visited.contains(&e.source)).cloned().collect();

    result
}

/// A reason a proposed transfer cannot be applied.
#[derive(Serialize, Deserialize, Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferIssue {
    #[error("Source node {0} not found")]
    SourceNotFound(NodeId),

    #[error("Target node {0} not found")]
    TargetNotFound(NodeId),

    #[error("No direct edge found between {from} and {to}")]
    NoDirectEdge {
        from: NodeId,
        to: NodeId,
    },

    #[error("Circular dependency detected: source node {0} is reachable from the target")]
    CircularDependency(NodeId),

    #[error("No steps found to transfer")]
    NothingToTransfer,
}

/// Outcome of [`validate_transfer`], carrying every issue found.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransferValidation {
    pub is_valid: bool,
    pub errors: Vec<TransferIssue>,
}

impl TransferValidation {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(FlowbranchError::Transfer(self.messages().join("; ")))
        }
    }
}

/// Check a transfer without short-circuiting, so callers can show all problems at once.
pub fn validate_transfer(
    source_id: &str,
    target_id: &str,
    analysis: &StepAnalysisResult,
    nodes: &[Node],
    edges: &[Edge],
) -> TransferValidation {
    let mut errors = Vec::new();

    if !nodes.iter().any(|n| n.id == source_id) {
        errors.push(TransferIssue::SourceNotFound(source_id.to_string()));
    }
    if !nodes.iter().any(|n| n.id == target_id) {
        errors.push(TransferIssue::TargetNotFound(target_id.to_string()));
    }
    if !edges.iter().any(|e| e.connects(source_id, target_id)) {
        errors.push(TransferIssue::NoDirectEdge {
            from: source_id.to_string(),
            to: target_id.to_string(),
        });
    }
    if analysis.following_steps.iter().any(|n| n.id == source_id) {
        errors.push(TransferIssue::CircularDependency(source_id.to_string()));
    }
    if analysis.following_steps.is_empty() {
        errors.push(TransferIssue::NothingToTransfer);
    }

    if !errors.is_empty() {
        debug!(source = source_id, target = target_id, issues = errors.len(), "transfer rejected");
    }

    TransferValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::node::{NodeKind, Position};

    fn step(id: &str) -> Node {
        Node::new(id, NodeKind::step(id), Position::default())
    }

    fn edge_ids(edges: &[Edge]) -> Vec<&str> {
        edges.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_analyze_linear() {
        let nodes = vec![step("a"), step("b"), step("c")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")];

        let result = analyze_transfer("a", "b", &nodes, &edges);
        assert_eq!(result.step_ids(), vec!["b", "c"]);
        assert_eq!(edge_ids(&result.following_edges), vec!["e2"]);
        assert!(result.affected_edges.is_empty());
    }

    #[test]
    fn test_analyze_terminates_on_cycle() {
        let nodes = vec![step("s"), step("a"), step("b")];
        let edges = vec![Edge::new("e0", "s", "a"), Edge::new("e1", "a", "b"), Edge::new("e2", "b", "a")];

        let result = analyze_transfer("s", "a", &nodes, &edges);
        assert_eq!(result.step_ids(), vec!["a", "b"]);
        assert_eq!(edge_ids(&result.following_edges), vec!["e1", "e2"]);
        assert!(result.affected_edges.is_empty());
    }

    #[test]
    fn test_analyze_diamond_visits_once() {
        let nodes = vec![step("s"), step("t"), step("l"), step("r"), step("j")];
        let edges = vec![
            Edge::new("e0", "s", "t"),
            Edge::new("e1", "t", "l"),
            Edge::new("e2", "t", "r"),
            Edge::new("e3", "l", "j"),
            Edge::new("e4", "r", "j"),
        ];

        let result = analyze_transfer("s", "t", &nodes, &edges);
        assert_eq!(result.step_ids(), vec!["t", "l", "r", "j"]);
        assert_eq!(edge_ids(&result.following_edges), vec!["e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_affected_edges_from_outside() {
        let nodes = vec![step("a"), step("b"), step("c"), step("x")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c"), Edge::new("e3", "x", "c"), Edge::new("e4", "a", "c")];

        let result = analyze_transfer("a", "b", &nodes, &edges);
        assert_eq!(edge_ids(&result.affected_edges), vec!["e3"]);
        assert!(!result.affected_edges.iter().any(|e| e.connects("a", "b")));
    }

    #[test]
    fn test_analyze_tolerates_missing_nodes() {
        let nodes = vec![step("a"), step("b")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "ghost")];

        let result = analyze_transfer("a", "b", &nodes, &edges);
        assert_eq!(result.step_ids(), vec!["b"]);
        assert_eq!(edge_ids(&result.following_edges), vec!["e2"]);
    }

    #[test]
    fn test_validate_ok() {
        let nodes = vec![step("a"), step("b")];
        let edges = vec![Edge::new("e1", "a", "b")];
        let analysis = analyze_transfer("a", "b", &nodes, &edges);

        let validation = validate_transfer("a", "b", &analysis, &nodes, &edges);
        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
        assert!(validation.into_result().is_ok());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let validation = validate_transfer("a", "b", &StepAnalysisResult::default(), &[], &[]);

        assert!(!validation.is_valid);
        assert_eq!(
            validation.errors,
            vec![
                TransferIssue::SourceNotFound("a".to_string()),
                TransferIssue::TargetNotFound("b".to_string()),
                TransferIssue::NoDirectEdge {
                    from: "a".to_string(),
                    to: "b".to_string(),
                },
                TransferIssue::NothingToTransfer,
            ]
        );
        assert_eq!(validation.messages()[3], "No steps found to transfer");
    }

    #[test]
    fn test_validate_circular_dependency() {
        let nodes = vec![step("a"), step("b")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "a")];
        let analysis = analyze_transfer("a", "b", &nodes, &edges);
        assert_eq!(analysis.step_ids(), vec!["b", "a"]);

        let validation = validate_transfer("a", "b", &analysis, &nodes, &edges);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors, vec![TransferIssue::CircularDependency("a".to_string())]);

        let err = validation.into_result().unwrap_err();
        assert!(matches!(err, FlowbranchError::Transfer(ref msg) if msg.starts_with("Circular dependency")));
    }
}
