//! Workflow edge definitions for connecting nodes.
//!
//! Edges define the flow between nodes. An edge that carries a source handle
//! leaves a specific arm of a branch node; plain sequential edges have none.

use serde::{Deserialize, Serialize};

use crate::workflow::node::NodeId;

/// Unique identifier for an edge within a workflow.
pub type EdgeId = String;

/// Fixed arm handles of branch nodes created by the editor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
pub enum FixedHandle {
    /// First arm; receives the transferred steps on insertion.
    #[serde(rename = "branch_1")]
    #[strum(serialize = "branch_1")]
    Branch1,
    /// Second arm; starts out empty.
    #[serde(rename = "branch_2")]
    #[strum(serialize = "branch_2")]
    Branch2,
}

/// Source handle identifying which output port of a node an edge originates from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum SourceHandle {
    /// Arm handles: branch_1, branch_2.
    Fixed(FixedHandle),
    /// Any other handle name found in a document.
    Named(String),
}

impl SourceHandle {
    pub fn as_str(&self) -> &str {
        match self {
            SourceHandle::Fixed(h) => h.as_ref(),
            SourceHandle::Named(n) => n,
        }
    }
}

impl From<&str> for SourceHandle {
    fn from(value: &str) -> Self {
        value.parse::<FixedHandle>().map(SourceHandle::Fixed).unwrap_or_else(|_| SourceHandle::Named(value.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// Which branch arm this edge leaves from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<SourceHandle>,
}

impl Edge {
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
        }
    }

    pub fn with_handle(
        mut self,
        handle: SourceHandle,
    ) -> Self {
        self.source_handle = Some(handle);
        self
    }

    /// Whether the edge leaves a branch arm.
    pub fn is_arm(&self) -> bool {
        self.source_handle.is_some()
    }

    pub fn connects(
        &self,
        source: &str,
        target: &str,
    ) -> bool {
        self.source == source && self.target == target
    }
}
