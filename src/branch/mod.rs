//! Branch insertion on the workflow canvas.
//!
//! The steps run in order: [`detect_insertion_points`], then, once a point
//! is picked, [`analyze_transfer`] and [`validate_transfer`], and finally
//! [`calculate_transfer_positions`]. [`plan_branch_insertion`] chains them
//! into a single change set.

mod insertion;
mod layout;
mod plan;
mod transfer;

pub use insertion::{BranchInsertionPoint, detect_insertion_points, is_insertion_point_valid, update_insertion_point_positions};
pub use layout::{TransferLayoutOptions, calculate_transfer_positions};
pub use plan::{BranchInsertion, plan_branch_insertion};
pub use transfer::{StepAnalysisResult, TransferIssue, TransferValidation, analyze_transfer, validate_transfer};
