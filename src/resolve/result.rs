use crate::params::Parameters;
use crate::selector::FailureReason;
use crate::tree::NodeId;
use crate::types::Quality;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolveResult {
    /// Matched node, `None` when no route accepts the request.
    pub route: Option<NodeId>,
    pub quality: Quality,
    pub parameters: Parameters,
    /// Deepest rejection seen while searching; only set when nothing matched.
    pub failure: Option<FailureReason>,
}

impl ResolveResult {
    pub(crate) fn not_found(failure: Option<FailureReason>) -> Self {
        Self {
            route: None,
            quality: 0.0,
            parameters: Parameters::new(),
            failure,
        }
    }

    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }
}
