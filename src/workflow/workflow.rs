//! Editable workflow graph.
//!
//! The workflow is held as plain node and edge lists, the shape the editor
//! and the persisted document share. Analysis functions borrow these lists
//! as snapshots; only [`Workflow::apply`] mutates them.

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    algo::is_cyclic_directed,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use tracing::{debug, trace};

use crate::{
    FlowbranchError, Result,
    branch::BranchInsertion,
    workflow::{
        edge::{Edge, EdgeId},
        node::{Node, NodeId},
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Workflow {
    /// create an empty workflow
    pub fn new() -> Self {
        Self::default()
    }

    /// create a workflow from existing nodes and edges without validating them
    pub fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// add node to workflow
    pub fn add_node(
        &mut self,
        node: Node,
    ) {
        self.nodes.push(node);
    }

    /// add edge to workflow
    pub fn add_edge(
        &mut self,
        edge: Edge,
    ) {
        self.edges.push(edge);
    }

    /// get node by id
    pub fn get_node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// get edge by id
    pub fn get_edge(
        &self,
        id: &str,
    ) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Nodes without incoming edges.
    pub fn root_nodes(&self) -> Vec<&Node> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes.iter().filter(|n| !targets.contains(n.id.as_str())).collect()
    }

    /// Checks that node and edge ids are unique and every edge references existing nodes.
    pub fn validate(&self) -> Result<()> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(FlowbranchError::Workflow(format!("duplicate node id {}", node.id)));
            }
        }

        let mut edge_ids = HashSet::new();
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(FlowbranchError::Workflow(format!("duplicate edge id {}", edge.id)));
            }
            if !node_ids.contains(edge.source.as_str()) {
                return Err(FlowbranchError::Edge(format!("edge {}: source node {} not found", edge.id, edge.source)));
            }
            if !node_ids.contains(edge.target.as_str()) {
                return Err(FlowbranchError::Edge(format!("edge {}: target node {} not found", edge.id, edge.target)));
            }
        }

        Ok(())
    }

    /// Build a directed graph of node and edge ids. Edges with unknown endpoints are left out.
    pub fn graph(&self) -> DiGraph<NodeId, EdgeId> {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.id.clone());
            indices.insert(node.id.as_str(), idx);
        }
        for edge in &self.edges {
            if let (Some(source), Some(target)) = (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) {
                graph.add_edge(*source, *target, edge.id.clone());
            }
        }

        graph
    }

    /// Whether the flow loops back on itself anywhere.
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph())
    }

    /// Output a human-readable representation of the workflow graph
    pub fn schema(&self) -> String {
        let graph = self.graph();
        let mut lines = Vec::new();

        lines.push("=== Workflow Graph ===".to_string());
        lines.push(format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len()));
        lines.push(String::new());

        lines.push("--- Nodes ---".to_string());
        for node in &self.nodes {
            let placeholder = if node.placeholder { ", placeholder" } else { "" };
            lines.push(format!(
                "[{}] {} (variant: {}, at: {},{}{})",
                node.id,
                node.kind.label(),
                node.kind.tag(),
                node.position.x,
                node.position.y,
                placeholder
            ));
        }
        lines.push(String::new());

        lines.push("--- Edges ---".to_string());
        for edge in &self.edges {
            let handle = edge.source_handle.as_ref().map(|h| h.as_str()).unwrap_or("-");
            lines.push(format!("{} --[{}]--> {} (id: {})", edge.source, handle, edge.target, edge.id));
        }
        lines.push(String::new());

        lines.push("--- Graph Structure ---".to_string());
        for idx in graph.node_indices() {
            let mut outgoing: Vec<&str> = graph.edges_directed(idx, Direction::Outgoing).map(|e| graph[e.target()].as_str()).collect();
            // petgraph yields outgoing edges newest first
            outgoing.reverse();

            if outgoing.is_empty() {
                lines.push(format!("{} -> (end)", graph[idx]));
            } else {
                lines.push(format!("{} -> {}", graph[idx], outgoing.join(", ")));
            }
        }

        lines.join("\n")
    }

    /// Apply a planned branch insertion.
    ///
    /// Every precondition is checked before anything is touched, so the
    /// workflow is either fully rewritten or left exactly as it was.
    pub fn apply(
        &mut self,
        insertion: &BranchInsertion,
    ) -> Result<()> {
        trace!("workflow::apply({})", insertion.branch_node.id);

        for edge_id in &insertion.removed_edges {
            if self.get_edge(edge_id).is_none() {
                return Err(FlowbranchError::Edge(format!("edge {} to remove not found", edge_id)));
            }
        }
        for node_id in insertion.moved_nodes.keys() {
            if self.get_node(node_id).is_none() {
                return Err(FlowbranchError::Node(format!("node {} to move not found", node_id)));
            }
        }
        for node in insertion.added_nodes() {
            if self.get_node(&node.id).is_some() {
                return Err(FlowbranchError::Node(format!("node {} already exists", node.id)));
            }
        }

        let added_node_ids: HashSet<&str> = insertion.added_nodes().map(|n| n.id.as_str()).collect();
        for edge in &insertion.added_edges {
            if self.get_edge(&edge.id).is_some() && !insertion.removed_edges.contains(&edge.id) {
                return Err(FlowbranchError::Edge(format!("edge {} already exists", edge.id)));
            }
            for endpoint in [&edge.source, &edge.target] {
                if self.get_node(endpoint).is_none() && !added_node_ids.contains(endpoint.as_str()) {
                    return Err(FlowbranchError::Edge(format!("edge {}: node {} not found", edge.id, endpoint)));
                }
            }
        }

        self.edges.retain(|e| !insertion.removed_edges.contains(&e.id));
        for node in self.nodes.iter_mut() {
            if let Some(position) = insertion.moved_nodes.get(&node.id) {
                node.position = *position;
            }
        }
        self.nodes.extend(insertion.added_nodes().cloned());
        self.edges.extend(insertion.added_edges.iter().cloned());

        debug!(
            branch = %insertion.branch_node.id,
            removed = insertion.removed_edges.len(),
            added = insertion.added_edges.len(),
            moved = insertion.moved_nodes.len(),
            "branch insertion applied"
        );

        Ok(())
    }
}
