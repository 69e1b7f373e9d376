pub mod consts;
pub mod edge;
pub mod node;
mod workflow;

pub use workflow::Workflow;
