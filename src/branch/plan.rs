//! Branch insertion change sets.
//!
//! Planning runs detection, analysis, validation and layout against a
//! snapshot of the workflow and returns every edit the insertion needs.
//! Nothing is modified until the plan is handed to [`Workflow::apply`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Config, FlowbranchError, Result,
    branch::{
        insertion::{BranchInsertionPoint, is_insertion_point_valid},
        layout::{TransferLayoutOptions, calculate_transfer_positions},
        transfer::{StepAnalysisResult, analyze_transfer, validate_transfer},
    },
    workflow::{
        Workflow,
        consts::{BRANCH_LABEL, BRANCH_PILL_MARKER, DEFAULT_ARM_LABELS},
        edge::{Edge, EdgeId, FixedHandle, SourceHandle},
        node::{Node, NodeId, NodeKind, Position},
    },
};

/// Every edit needed to splice a branch node into an edge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BranchInsertion {
    /// the point the branch was planned on
    pub point: BranchInsertionPoint,
    /// new branch node
    pub branch_node: Node,
    /// placeholder for the empty second arm
    pub placeholder_node: Node,
    pub added_edges: Vec<Edge>,
    pub removed_edges: Vec<EdgeId>,
    /// new positions of the steps moved onto the first arm
    pub moved_nodes: HashMap<NodeId, Position>,
    /// transfer analysis the plan was built from
    pub analysis: StepAnalysisResult,
}

impl BranchInsertion {
    pub fn added_nodes(&self) -> impl Iterator<Item = &Node> {
        [&self.branch_node, &self.placeholder_node].into_iter()
    }

    /// Edges entering the moved steps from elsewhere in the flow; they stay attached after the move.
    pub fn affected_edges(&self) -> &[Edge] {
        &self.analysis.affected_edges
    }
}

fn edge_id(
    source: &str,
    target: &str,
) -> EdgeId {
    format!("e-{}-{}", source, target)
}

/// Plan the insertion of a branch node with id `branch_id` at `point`.
pub fn plan_branch_insertion(
    workflow: &Workflow,
    point: &BranchInsertionPoint,
    branch_id: &str,
    config: &Config,
) -> Result<BranchInsertion> {
    trace!("plan::branch_insertion({}, {})", point.id, branch_id);

    let (nodes, edges) = (workflow.nodes(), workflow.edges());
    if !is_insertion_point_valid(point, nodes, edges) {
        debug!(point = %point.id, "stale insertion point");
        return Err(FlowbranchError::Edge(format!("insertion point {} is stale: edge {} or its nodes no longer exist", point.id, point.edge_id)));
    }

    let analysis = analyze_transfer(&point.source, &point.target, nodes, edges);
    validate_transfer(&point.source, &point.target, &analysis, nodes, edges).into_result()?;

    let labels = &config.branch.labels;
    let branch_node = Node::new(branch_id, NodeKind::branch(BRANCH_LABEL, labels.clone()), point.position);

    let layout = &config.layout;
    let placeholder_label = labels.get(1).map(String::as_str).unwrap_or(DEFAULT_ARM_LABELS[1]);
    let placeholder_node = Node::placeholder(
        format!("{}{}2", branch_id, BRANCH_PILL_MARKER),
        placeholder_label,
        branch_node.position.offset(-layout.horizontal_offset, layout.anchor_offset_y),
    );

    let added_edges = vec![
        Edge::new(edge_id(&point.source, branch_id), point.source.as_str(), branch_id),
        Edge::new(edge_id(branch_id, &point.target), branch_id, point.target.as_str()).with_handle(SourceHandle::Fixed(FixedHandle::Branch1)),
        Edge::new(edge_id(branch_id, &placeholder_node.id), branch_id, placeholder_node.id.as_str())
            .with_handle(SourceHandle::Fixed(FixedHandle::Branch2)),
    ];

    let options = TransferLayoutOptions::from_config(branch_id, layout);
    let moved_nodes = calculate_transfer_positions(&branch_node, &analysis.following_steps, &options);

    Ok(BranchInsertion {
        point: point.clone(),
        branch_node,
        placeholder_node,
        added_edges,
        removed_edges: vec![point.edge_id.clone()],
        moved_nodes,
        analysis,
    })
}
