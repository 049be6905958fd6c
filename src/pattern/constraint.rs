use regex::Regex;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{PatternError, PatternResult};

/// Regex a parameter value must satisfy, anchored to the whole value.
///
/// Identity is the raw source text so equal patterns merge into one node.
#[derive(Debug, Clone)]
pub struct ParamConstraint {
    raw: Box<str>,
    compiled: Arc<Regex>,
}

impl ParamConstraint {
    pub fn compile(name: &str, raw: &str) -> PatternResult<Self> {
        let source = format!("^(?:{})$", raw);
        let compiled = Regex::new(&source).map_err(|err| PatternError::InvalidConstraint {
            name: name.to_string(),
            constraint: raw.to_string(),
            error: err.to_string(),
        })?;

        Ok(Self {
            raw: raw.into(),
            compiled: Arc::new(compiled),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.compiled.is_match(value)
    }
}

impl PartialEq for ParamConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ParamConstraint {}

impl Hash for ParamConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
