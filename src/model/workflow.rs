use serde::{Deserialize, Serialize};

use crate::{
    FlowbranchError, Result,
    model::{EdgeModel, NodeModel},
    workflow::{Workflow, edge::Edge, node::Node},
};

/// Persisted agent workflow document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowModel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub nodes: Vec<NodeModel>,
    #[serde(default)]
    pub edges: Vec<EdgeModel>,
}

impl WorkflowModel {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<WorkflowModel>(s).map_err(|e| FlowbranchError::Workflow(format!("{}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the document graph with the nodes and edges of `workflow`.
    pub fn update_graph(
        &mut self,
        workflow: &Workflow,
    ) {
        self.nodes = workflow.nodes().iter().map(NodeModel::from).collect();
        self.edges = workflow.edges().iter().map(EdgeModel::from).collect();
    }
}

impl TryFrom<&WorkflowModel> for Workflow {
    type Error = FlowbranchError;

    fn try_from(model: &WorkflowModel) -> Result<Self> {
        let nodes = model.nodes.iter().map(Node::try_from).collect::<Result<Vec<_>>>()?;
        let edges = model.edges.iter().map(Edge::from).collect();
        Ok(Workflow::from_parts(nodes, edges))
    }
}
