use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::SplitOptions;
use crate::pattern::parse_root_path;
use crate::resolve::ResolveOptions;

pub const DEFAULT_MAX_SEGMENTS: usize = crate::path::DEFAULT_MAX_SEGMENTS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    /// `/users` and `/users/` are different routes when set.
    pub strict_trailing_slash: bool,
    /// Percent-decode request path segments before matching.
    pub decode_percent: bool,
    /// Constant prefix every route lives under, e.g. `/api`.
    pub root_path: Option<String>,
    pub max_segments: usize,
    /// Record a resolution trace and emit it as DEBUG events.
    pub debug: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            strict_trailing_slash: true,
            decode_percent: false,
            root_path: None,
            max_segments: DEFAULT_MAX_SEGMENTS,
            debug: false,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.max_segments == 0 {
            return Err(RouterOptionsError::MaxSegmentsInvalid { provided: 0 });
        }
        if let Some(root_path) = &self.root_path {
            if parse_root_path(root_path).is_err() {
                return Err(RouterOptionsError::InvalidRootPath {
                    path: root_path.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            strict_trailing_slash: self.strict_trailing_slash,
            split: SplitOptions {
                decode_percent: self.decode_percent,
                max_segments: self.max_segments,
            },
            trace: self.debug,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn strict_trailing_slash(mut self, value: bool) -> Self {
        self.options.strict_trailing_slash = value;
        self
    }

    pub fn decode_percent(mut self, value: bool) -> Self {
        self.options.decode_percent = value;
        self
    }

    pub fn root_path<S: Into<String>>(mut self, root_path: S) -> Self {
        self.options.root_path = Some(root_path.into());
        self
    }

    pub fn max_segments(mut self, value: usize) -> Self {
        self.options.max_segments = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("max_segments must be at least 1 (got {provided})")]
    MaxSegmentsInvalid { provided: usize },
    #[error("root path '{path}' must start with '/' and contain only constant segments")]
    InvalidRootPath { path: String },
}
