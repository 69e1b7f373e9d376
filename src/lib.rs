//! # Flowbranch
//!
//! Flowbranch is the graph core behind a node/edge workflow editor.
//! It finds where a branch can be spliced into a flow, works out which steps
//! have to move onto the new branch arm, and produces a change set that is
//! applied to the workflow all at once or not at all.
//!
//! ## Core Features
//!
//! - **Insertion Points**: Detect the edges a branch node may be inserted on
//! - **Step Transfer**: Forward reachability analysis of everything downstream of a split
//! - **Validation**: Collect every structural problem of a proposed transfer in one pass
//! - **Layout**: Deterministic placement of transferred steps under the new branch arm
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowbranch::{EditorBuilder, Workflow, WorkflowModel};
//!
//! let editor = EditorBuilder::new().build()?;
//!
//! let model = WorkflowModel::from_json(json_str)?;
//! let mut workflow = Workflow::try_from(&model)?;
//!
//! let points = editor.insertion_points(&workflow);
//! let insertion = editor.insert_branch(&mut workflow, &points[0])?;
//! println!("{}", workflow.schema());
//! ```

mod branch;
mod builder;
mod config;
mod editor;
mod error;
mod model;
mod workflow;

pub use branch::{
    BranchInsertion, BranchInsertionPoint, StepAnalysisResult, TransferIssue, TransferLayoutOptions, TransferValidation, analyze_transfer,
    calculate_transfer_positions, detect_insertion_points, is_insertion_point_valid, plan_branch_insertion, update_insertion_point_positions,
    validate_transfer,
};
pub use builder::EditorBuilder;
pub use config::{BranchConfig, Config, LayoutConfig};
pub use editor::BranchEditor;
pub use error::FlowbranchError;
pub use model::*;
pub use workflow::{
    Workflow,
    edge::{Edge, EdgeId, FixedHandle, SourceHandle},
    node::{Node, NodeId, NodeKind, NodeVariant, Position},
};

/// Result type alias for Flowbranch operations.
pub type Result<T> = std::result::Result<T, FlowbranchError>;
