use crate::params::Parameters;
use crate::types::Quality;

/// Static weights used to rank competing matches.
pub mod quality {
    use crate::types::Quality;

    pub const CONSTANT: Quality = 1.0;
    pub const QUERY_PARAMETER: Quality = 1.0;
    pub const PARAMETER_WITH_PREFIX_OR_SUFFIX: Quality = 0.9;
    pub const PARAMETER: Quality = 0.8;
    pub const WILDCARD: Quality = 0.5;
    pub const MISSING: Quality = 0.2;
    pub const TAILCARD: Quality = 0.1;
}

/// Request dimension that rejected a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Path,
    Method,
    Parameter,
}

impl FailureReason {
    /// Ranking used when two failures happen at the same segment depth.
    pub(crate) fn priority(self) -> u8 {
        match self {
            FailureReason::Path => 0,
            FailureReason::Parameter => 1,
            FailureReason::Method => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSelectorEvaluation {
    pub succeeded: bool,
    pub quality: Quality,
    pub parameters: Parameters,
    pub segment_increment: usize,
    pub failure: Option<FailureReason>,
}

impl RouteSelectorEvaluation {
    pub fn failed(reason: FailureReason) -> Self {
        Self {
            succeeded: false,
            quality: 0.0,
            parameters: Parameters::new(),
            segment_increment: 0,
            failure: Some(reason),
        }
    }

    /// Match that consumed nothing and captured nothing.
    pub fn constant() -> Self {
        Self::success(quality::CONSTANT, Parameters::new(), 0)
    }

    /// Optional input was absent; still a success.
    pub fn missing() -> Self {
        Self::success(quality::MISSING, Parameters::new(), 0)
    }

    pub fn success(quality: Quality, parameters: Parameters, segment_increment: usize) -> Self {
        Self {
            succeeded: true,
            quality,
            parameters,
            segment_increment,
            failure: None,
        }
    }
}
