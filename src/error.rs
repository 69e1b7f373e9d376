//! Error types for Flowbranch.
//!
//! All fallible operations return `FlowbranchError`, with one variant per
//! error category. Validation of a proposed transfer does not fail directly;
//! it collects [`TransferIssue`](crate::TransferIssue)s instead.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowbranch operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowbranchError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Workflow document or graph structure errors.
    #[error("{0}")]
    Workflow(String),

    /// Node definition errors.
    #[error("{0}")]
    Node(String),

    /// Edge definition errors.
    #[error("{0}")]
    Edge(String),

    /// A step transfer failed validation.
    #[error("{0}")]
    Transfer(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<FlowbranchError> for String {
    fn from(val: FlowbranchError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for FlowbranchError {
    fn from(error: std::io::Error) -> Self {
        FlowbranchError::IoError(error.to_string())
    }
}

impl From<FlowbranchError> for std::io::Error {
    fn from(val: FlowbranchError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for FlowbranchError {
    fn from(error: serde_json::Error) -> Self {
        FlowbranchError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for FlowbranchError {
    fn from(error: toml::de::Error) -> Self {
        FlowbranchError::Config(error.to_string())
    }
}
