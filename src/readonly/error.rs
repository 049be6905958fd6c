use crate::enums::HttpMethod;
use crate::resolve::ResolveError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadOnlyError {
    #[error("no route matched for method {method} and path '{path}'")]
    RouteNotFound { method: HttpMethod, path: String },
    #[error("path '{path}' exists but does not accept method {method}")]
    MethodNotAllowed { method: HttpMethod, path: String },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub type ReadOnlyResult<T> = Result<T, ReadOnlyError>;
