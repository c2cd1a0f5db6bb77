use autofiller_core_types::AutofillError;
use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("node {node:?} <{tag}> is not a form control")]
    NotAControl { node: NodeId, tag: String },
    #[error("option {option:?} does not belong to select {select:?}")]
    ForeignOption { select: NodeId, option: NodeId },
}

impl From<DomError> for AutofillError {
    fn from(err: DomError) -> Self {
        AutofillError::page(err.to_string())
    }
}
