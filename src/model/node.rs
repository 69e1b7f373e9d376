use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    FlowbranchError, Result,
    workflow::{
        consts::BRANCH_PILL_MARKER,
        node::{Node, NodeKind, NodeVariant, Position},
    },
};

const PLACEHOLDER_KEY: &str = "placeholder";
const VARIANT_KEY: &str = "variant";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeModel {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Value,
}

impl TryFrom<&NodeModel> for Node {
    type Error = FlowbranchError;

    fn try_from(model: &NodeModel) -> Result<Self> {
        let mut data = match &model.data {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => return Err(FlowbranchError::Node(format!("node {}: data must be an object, got {}", model.id, other))),
        };

        // documents written before the explicit flag only mark pills by id
        let placeholder = match data.remove(PLACEHOLDER_KEY) {
            Some(Value::Bool(flag)) => flag,
            _ => model.id.contains(BRANCH_PILL_MARKER),
        };

        let variant = data.remove(VARIANT_KEY).unwrap_or_else(|| Value::String(NodeVariant::Step.as_ref().to_string()));
        let mut tagged = Map::new();
        // keys the variant does not declare stay with the opaque attributes
        for key in variant.as_str().map(NodeKind::fields_of).unwrap_or_default() {
            if let Some(value) = data.remove(*key) {
                tagged.insert(key.to_string(), value);
            }
        }
        tagged.insert(VARIANT_KEY.to_string(), variant);

        let kind: NodeKind =
            serde_json::from_value(Value::Object(tagged)).map_err(|e| FlowbranchError::Node(format!("invalid node {}: {}", model.id, e)))?;

        if let Some(node_type) = &model.node_type {
            data.insert("type".to_string(), Value::String(node_type.clone()));
        }

        Ok(Node {
            id: model.id.clone(),
            position: model.position,
            kind,
            placeholder,
            attributes: data,
        })
    }
}

impl From<&Node> for NodeModel {
    fn from(node: &Node) -> Self {
        let mut data = node.attributes.clone();
        let node_type = match data.remove("type") {
            Some(Value::String(t)) => Some(t),
            _ => None,
        };

        if let Ok(Value::Object(kind)) = serde_json::to_value(&node.kind) {
            data.extend(kind);
        }
        // an explicit `false` must survive on ids that look like legacy pills
        if node.placeholder || node.id.contains(BRANCH_PILL_MARKER) {
            data.insert(PLACEHOLDER_KEY.to_string(), Value::Bool(node.placeholder));
        }

        Self {
            id: node.id.clone(),
            node_type,
            position: node.position,
            data: Value::Object(data),
        }
    }
}
