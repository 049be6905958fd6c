use thiserror::Error;

use super::NodeId;
use crate::pattern::PatternError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("route tree is sealed; cannot {operation}")]
    Sealed { operation: &'static str },
    #[error("route tree has no node {id}")]
    UnknownNode { id: NodeId },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type TreeResult<T> = Result<T, TreeError>;
