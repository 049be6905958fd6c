use std::fmt;

use super::evaluation::{FailureReason, RouteSelectorEvaluation, quality};
use crate::params::Parameters;
use crate::pattern::ParamConstraint;
use crate::resolve::RoutingResolveContext;
use crate::types::Quality;

/// Captures one path segment, optionally decorated by literal text and
/// restricted by a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSegment {
    name: String,
    prefix: Option<String>,
    suffix: Option<String>,
    constraint: Option<ParamConstraint>,
    trailing_slash: bool,
}

impl ParameterSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            suffix: None,
            constraint: None,
            trailing_slash: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = non_empty(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = non_empty(suffix.into());
        self
    }

    pub fn with_constraint(mut self, constraint: ParamConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn constraint(&self) -> Option<&ParamConstraint> {
        self.constraint.as_ref()
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    pub fn quality(&self) -> Quality {
        if self.prefix.is_some() || self.suffix.is_some() {
            quality::PARAMETER_WITH_PREFIX_OR_SUFFIX
        } else {
            quality::PARAMETER
        }
    }

    pub(super) fn evaluate(
        &self,
        ctx: &RoutingResolveContext<'_>,
        segment_index: usize,
        optional: bool,
    ) -> RouteSelectorEvaluation {
        let reject = || {
            if optional {
                RouteSelectorEvaluation::missing()
            } else {
                RouteSelectorEvaluation::failed(FailureReason::Path)
            }
        };

        let Some(segment) = ctx.segment(segment_index) else {
            return reject();
        };
        let Some(value) = self.strip_decoration(segment) else {
            return reject();
        };
        if self
            .constraint
            .as_ref()
            .is_some_and(|constraint| !constraint.is_match(value))
        {
            return reject();
        }
        if !trailing_slash_matches(ctx, segment_index, self.trailing_slash) {
            return reject();
        }

        RouteSelectorEvaluation::success(
            self.quality(),
            Parameters::single(self.name.as_str(), value),
            1,
        )
    }

    fn strip_decoration<'s>(&self, segment: &'s str) -> Option<&'s str> {
        let mut value = segment;
        if let Some(prefix) = &self.prefix {
            value = value.strip_prefix(prefix.as_str())?;
        }
        if let Some(suffix) = &self.suffix {
            value = value.strip_suffix(suffix.as_str())?;
        }
        (!value.is_empty()).then_some(value)
    }

    pub(super) fn fmt_pattern(&self, f: &mut fmt::Formatter<'_>, marker: &str) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write_escaped(f, prefix)?;
        }
        write!(f, "{{{}{}", self.name, marker)?;
        if let Some(constraint) = &self.constraint {
            write!(f, ":{}", constraint.raw())?;
        }
        f.write_str("}")?;
        if let Some(suffix) = &self.suffix {
            write_escaped(f, suffix)?;
        }
        write_trailing(f, self.trailing_slash)
    }
}

/// Captures every remaining path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TailcardSegment {
    name: String,
    prefix: String,
    trailing_slash: bool,
}

impl TailcardSegment {
    pub(super) fn new(name: String, prefix: String, trailing_slash: bool) -> Self {
        Self {
            name,
            prefix,
            trailing_slash,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    pub(super) fn evaluate(
        &self,
        ctx: &RoutingResolveContext<'_>,
        segment_index: usize,
    ) -> RouteSelectorEvaluation {
        let segments = ctx.segments();
        let remaining = &segments[segment_index.min(segments.len())..];

        if !self.prefix.is_empty() {
            match remaining.first() {
                Some(first) if first.starts_with(self.prefix.as_str()) => {}
                _ => return RouteSelectorEvaluation::failed(FailureReason::Path),
            }
        }
        if self.trailing_slash && ctx.strict_trailing_slash() && !ctx.has_trailing_slash() {
            return RouteSelectorEvaluation::failed(FailureReason::Path);
        }

        let parameters = if self.name.is_empty() {
            Parameters::new()
        } else {
            let values = remaining.iter().enumerate().map(|(idx, segment)| {
                if idx == 0 {
                    &segment[self.prefix.len()..]
                } else {
                    segment.as_str()
                }
            });
            Parameters::from_values(&self.name, values)
        };

        let tail_quality = if remaining.is_empty() {
            quality::MISSING
        } else {
            quality::TAILCARD
        };
        RouteSelectorEvaluation::success(tail_quality, parameters, remaining.len())
    }

    pub(super) fn fmt_pattern(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.prefix)?;
        write!(f, "{{{}...}}", self.name)?;
        write_trailing(f, self.trailing_slash)
    }
}

/// Trailing slashes only matter at the last request segment, and only for
/// strict contexts.
pub(super) fn trailing_slash_matches(
    ctx: &RoutingResolveContext<'_>,
    segment_index: usize,
    expected: bool,
) -> bool {
    !ctx.strict_trailing_slash()
        || segment_index + 1 != ctx.segment_count()
        || ctx.has_trailing_slash() == expected
}

pub(super) fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    Ok(())
}

/// A constant spelled `*` would read back as a wildcard.
pub(super) fn write_constant(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if value == "*" {
        return f.write_str("\\*");
    }
    write_escaped(f, value)
}

pub(super) fn write_trailing(f: &mut fmt::Formatter<'_>, trailing_slash: bool) -> fmt::Result {
    if trailing_slash {
        f.write_str("/")?;
    }
    Ok(())
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
