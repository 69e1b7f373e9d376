//! Workflow node definitions.
//!
//! A node is one stage of an agent's process. Its [`NodeKind`] decides how
//! the branch algorithms treat it: steps can be split and moved, branch
//! nodes fork the flow into labeled arms, and end nodes terminate it.

use serde::{Deserialize, Serialize};

/// node id
pub type NodeId = String;

/// Canvas coordinate of a node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self { x, y }
    }

    /// Arithmetic midpoint between two positions.
    pub fn midpoint(
        &self,
        other: &Position,
    ) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub fn offset(
        &self,
        dx: f64,
        dy: f64,
    ) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Variant tag of a node, as stored in `data.variant` of a workflow document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeVariant {
    #[default]
    Step,
    Branch,
    End,
    /// any tag the editor does not interpret, e.g. `start`
    Other,
}

/// Variant-specific payload of a node.
///
/// Documents use an open set of `variant` tags. Tags other than `step`,
/// `branch` and `end` are kept verbatim in [`NodeKind::Other`], which the
/// branch algorithms treat like a step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "TaggedKind", into = "TaggedKind")]
pub enum NodeKind {
    /// A regular process step.
    Step {
        label: String,
        description: Option<String>,
    },
    /// Forks control flow into labeled arms.
    Branch {
        label: String,
        arms: Vec<String>,
    },
    /// Terminates the flow.
    End {
        label: String,
    },
    /// A variant with no special meaning to the editor.
    Other {
        variant: String,
        label: String,
    },
}

/// Wire form of [`NodeKind`].
#[derive(Serialize, Deserialize, Debug, Clone)]
struct TaggedKind {
    variant: String,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arms: Option<Vec<String>>,
}

impl From<TaggedKind> for NodeKind {
    fn from(tagged: TaggedKind) -> Self {
        let TaggedKind {
            variant,
            label,
            description,
            arms,
        } = tagged;

        match variant.parse::<NodeVariant>() {
            Ok(NodeVariant::Step) => NodeKind::Step { label, description },
            Ok(NodeVariant::Branch) => NodeKind::Branch {
                label,
                arms: arms.unwrap_or_default(),
            },
            Ok(NodeVariant::End) => NodeKind::End { label },
            _ => NodeKind::Other { variant, label },
        }
    }
}

impl From<NodeKind> for TaggedKind {
    fn from(kind: NodeKind) -> Self {
        let variant = kind.tag().to_string();
        let (label, description, arms) = match kind {
            NodeKind::Step { label, description } => (label, description, None),
            NodeKind::Branch { label, arms } => (label, None, Some(arms)),
            NodeKind::End { label } | NodeKind::Other { label, .. } => (label, None, None),
        };

        Self {
            variant,
            label,
            description,
            arms,
        }
    }
}

impl NodeKind {
    pub fn step(label: impl Into<String>) -> Self {
        NodeKind::Step {
            label: label.into(),
            description: None,
        }
    }

    pub fn branch(
        label: impl Into<String>,
        arms: Vec<String>,
    ) -> Self {
        NodeKind::Branch {
            label: label.into(),
            arms,
        }
    }

    pub fn end(label: impl Into<String>) -> Self {
        NodeKind::End { label: label.into() }
    }

    pub fn other(
        variant: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        NodeKind::Other {
            variant: variant.into(),
            label: label.into(),
        }
    }

    pub fn variant(&self) -> NodeVariant {
        match self {
            NodeKind::Step { .. } => NodeVariant::Step,
            NodeKind::Branch { .. } => NodeVariant::Branch,
            NodeKind::End { .. } => NodeVariant::End,
            NodeKind::Other { .. } => NodeVariant::Other,
        }
    }

    /// The `variant` tag as written in documents.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Other { variant, .. } => variant,
            kind => {
                let tag: &'static str = kind.variant().into();
                tag
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeKind::Step { label, .. } | NodeKind::Branch { label, .. } | NodeKind::End { label } | NodeKind::Other { label, .. } => label,
        }
    }

    /// Document keys besides `variant` that belong to a node with the given tag.
    pub fn fields_of(tag: &str) -> &'static [&'static str] {
        match tag.parse::<NodeVariant>() {
            Ok(NodeVariant::Step) => &["label", "description"],
            Ok(NodeVariant::Branch) => &["label", "arms"],
            _ => &["label"],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    /// node id
    pub id: NodeId,
    /// canvas position
    pub position: Position,
    /// variant and its fields
    pub kind: NodeKind,
    /// synthetic stand-in for an empty branch arm
    #[serde(default)]
    pub placeholder: bool,
    /// remaining document fields the graph algorithms do not interpret
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            kind,
            placeholder: false,
            attributes: serde_json::Map::new(),
        }
    }

    /// Creates the placeholder ("branch pill") node shown for an empty branch arm.
    pub fn placeholder(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            placeholder: true,
            ..Self::new(id, NodeKind::step(label), position)
        }
    }

    pub fn variant(&self) -> NodeVariant {
        self.kind.variant()
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { .. })
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, NodeKind::End { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_position_midpoint() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(100.0, 50.0);
        assert_eq!(a.midpoint(&b), Position::new(50.0, 25.0));
    }

    #[test]
    fn test_node_kind_variant() {
        assert_eq!(NodeKind::step("a").variant(), NodeVariant::Step);
        assert_eq!(NodeKind::branch("b", vec![]).variant(), NodeVariant::Branch);
        assert_eq!(NodeKind::end("c").variant(), NodeVariant::End);
        assert_eq!(NodeVariant::from_str("branch").unwrap(), NodeVariant::Branch);
        assert_eq!(NodeVariant::End.as_ref(), "end");
    }

    #[test]
    fn test_node_kind_tagged_serde() {
        let kind: NodeKind = serde_json::from_value(json!({"variant": "branch", "label": "Split", "arms": ["Yes", "No"]})).unwrap();
        assert_eq!(kind, NodeKind::branch("Split", vec!["Yes".to_string(), "No".to_string()]));

        let value = serde_json::to_value(NodeKind::step("Greet")).unwrap();
        assert_eq!(value, json!({"variant": "step", "label": "Greet"}));
    }

    #[test]
    fn test_unrecognized_variant_kept() {
        let kind: NodeKind = serde_json::from_value(json!({"variant": "start", "label": "Begin"})).unwrap();
        assert_eq!(kind, NodeKind::other("start", "Begin"));
        assert_eq!(kind.variant(), NodeVariant::Other);
        assert_eq!(kind.tag(), "start");

        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value, json!({"variant": "start", "label": "Begin"}));
    }

    #[test]
    fn test_fields_of_variant() {
        assert_eq!(NodeKind::fields_of("step"), &["label", "description"]);
        assert_eq!(NodeKind::fields_of("branch"), &["label", "arms"]);
        assert_eq!(NodeKind::fields_of("end"), &["label"]);
        assert_eq!(NodeKind::fields_of("start"), &["label"]);
    }

    #[test]
    fn test_placeholder_node() {
        let node = Node::placeholder("b1-branch-pill-2", "Branch 2", Position::default());
        assert!(node.placeholder);
        assert!(!node.is_branch());
        assert_eq!(node.kind.label(), "Branch 2");
    }
}
