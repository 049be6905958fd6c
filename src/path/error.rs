use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path contains control byte {byte} in '{input}'")]
    ControlCharacter { input: String, byte: u8 },
    #[error("path '{input}' has an invalid percent-encoding at byte {index}")]
    InvalidPercentEncoding { input: String, index: usize },
    #[error("path '{input}' is not valid UTF-8 after percent-decoding")]
    InvalidUtf8AfterDecoding { input: String },
    #[error("path '{input}' has more than {limit} segments")]
    TooManySegments { input: String, limit: usize },
}

pub type PathResult<T> = Result<T, PathError>;
