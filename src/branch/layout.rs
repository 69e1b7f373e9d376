use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    LayoutConfig,
    workflow::node::{Node, NodeId, Position},
};

/// Placement of transferred steps under a branch arm.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransferLayoutOptions {
    /// branch node the steps are placed under
    pub branch_id: NodeId,
    pub vertical_spacing: f64,
    pub horizontal_offset: f64,
    /// distance of the first step below the branch node
    pub anchor_offset_y: f64,
}

impl TransferLayoutOptions {
    pub fn new(branch_id: impl Into<NodeId>) -> Self {
        Self::from_config(branch_id, &LayoutConfig::default())
    }

    pub fn from_config(
        branch_id: impl Into<NodeId>,
        config: &LayoutConfig,
    ) -> Self {
        Self {
            branch_id: branch_id.into(),
            vertical_spacing: config.vertical_spacing,
            horizontal_offset: config.horizontal_offset,
            anchor_offset_y: config.anchor_offset_y,
        }
    }
}

/// Stack `following_steps` in a single column to the right of and below `branch_node`.
pub fn calculate_transfer_positions(
    branch_node: &Node,
    following_steps: &[Node],
    options: &TransferLayoutOptions,
) -> HashMap<NodeId, Position> {
    trace!("layout::transfer_positions({}, {} steps)", options.branch_id, following_steps.len());

    let anchor = branch_node.position.offset(options.horizontal_offset, options.anchor_offset_y);

    following_steps
        .iter()
        .enumerate()
        .map(|(i, step)| (step.id.clone(), anchor.offset(0.0, i as f64 * options.vertical_spacing)))
        .collect()
}
