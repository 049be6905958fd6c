use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("segment '{segment}' has unbalanced braces")]
    UnbalancedBraces { segment: String },
    #[error("segment '{segment}' declares more than one parameter")]
    MultipleParameters { segment: String },
    #[error("segment '{segment}' ends with a lone escape character at byte {index}")]
    LoneEscapeCharacter { segment: String, index: usize },
    #[error("parameter segment '{segment}' is missing a name")]
    ParameterMissingName { segment: String },
    #[error(
        "parameter name '{name}' in segment '{segment}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        segment: String,
        name: String,
        found: char,
    },
    #[error(
        "parameter name '{name}' in segment '{segment}' contains invalid character '{invalid}'"
    )]
    ParameterInvalidCharacter {
        segment: String,
        name: String,
        invalid: char,
    },
    #[error("tailcard segment '{segment}' must not have a suffix (found '{suffix}')")]
    TailcardWithSuffix { segment: String, suffix: String },
    #[error("tailcard prefix '{prefix}' must not contain '/'")]
    TailcardPrefixContainsSlash { prefix: String },
    #[error("tailcard segment '{segment}' cannot carry a constraint")]
    ConstraintOnTailcard { segment: String },
    #[error("constraint '{constraint}' for parameter '{name}' is invalid: {error}")]
    InvalidConstraint {
        name: String,
        constraint: String,
        error: String,
    },
    #[error("root path '{path}' must start with '/' and contain only constant segments")]
    InvalidRootPath { path: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
