use thiserror::Error;

use crate::header::HeaderError;
use crate::path::PathError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The request itself is invalid; boundaries answer 400.
    #[error("malformed {header} header: {source}")]
    MalformedRequestHeader {
        header: &'static str,
        #[source]
        source: HeaderError,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

pub type ResolverResult<T> = Result<T, ResolveError>;
