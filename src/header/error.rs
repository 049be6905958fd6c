use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("malformed content type '{value}': {reason}")]
    MalformedContentType { value: String, reason: &'static str },
}

pub type HeaderResult<T> = Result<T, HeaderError>;
