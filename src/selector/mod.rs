mod evaluation;
mod http;
mod path;

use std::fmt;

pub use evaluation::{FailureReason, RouteSelectorEvaluation, quality};
pub use path::{ParameterSegment, TailcardSegment};

use crate::enums::HttpMethod;
use crate::header::ContentType;
use crate::pattern::{PatternError, PatternResult};
use crate::resolve::{ResolverResult, RoutingResolveContext};
use crate::types::Quality;
use path::{trailing_slash_matches, write_constant, write_trailing};

/// One routing dimension checked at a tree node.
///
/// Equality is structural and drives node merging, so two selectors built
/// from the same input always land on the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteSelector {
    /// Literal prefix anchoring the whole tree. Only valid at segment 0.
    Root { segments: Vec<String> },
    ConstantPath { value: String, trailing_slash: bool },
    Parameter(ParameterSegment),
    OptionalParameter(ParameterSegment),
    Wildcard { trailing_slash: bool },
    Tailcard(TailcardSegment),
    Method(HttpMethod),
    /// Header name is stored lowercased.
    Header { name: String, value: String },
    Accept(ContentType),
    ContentType(ContentType),
    ConstantQuery { name: String, value: String },
    Query { name: String },
    OptionalQuery { name: String },
    And(Box<RouteSelector>, Box<RouteSelector>),
    Or(Box<RouteSelector>, Box<RouteSelector>),
}

impl RouteSelector {
    pub fn root(segments: Vec<String>) -> Self {
        RouteSelector::Root { segments }
    }

    pub fn constant(value: impl Into<String>, trailing_slash: bool) -> Self {
        RouteSelector::ConstantPath {
            value: value.into(),
            trailing_slash,
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        RouteSelector::Parameter(ParameterSegment::new(name))
    }

    pub fn optional_parameter(name: impl Into<String>) -> Self {
        RouteSelector::OptionalParameter(ParameterSegment::new(name))
    }

    pub fn wildcard(trailing_slash: bool) -> Self {
        RouteSelector::Wildcard { trailing_slash }
    }

    /// An empty `name` matches the remainder without capturing it.
    pub fn tailcard(
        name: impl Into<String>,
        prefix: impl Into<String>,
        trailing_slash: bool,
    ) -> PatternResult<Self> {
        let prefix = prefix.into();
        if prefix.contains('/') {
            return Err(PatternError::TailcardPrefixContainsSlash { prefix });
        }
        Ok(RouteSelector::Tailcard(TailcardSegment::new(
            name.into(),
            prefix,
            trailing_slash,
        )))
    }

    pub fn method(method: HttpMethod) -> Self {
        RouteSelector::Method(method)
    }

    pub fn header(name: &str, value: impl Into<String>) -> Self {
        RouteSelector::Header {
            name: name.to_ascii_lowercase(),
            value: value.into(),
        }
    }

    pub fn accept(content_type: ContentType) -> Self {
        RouteSelector::Accept(content_type)
    }

    pub fn content_type(content_type: ContentType) -> Self {
        RouteSelector::ContentType(content_type)
    }

    pub fn constant_query(name: impl Into<String>, value: impl Into<String>) -> Self {
        RouteSelector::ConstantQuery {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        RouteSelector::Query { name: name.into() }
    }

    pub fn optional_query(name: impl Into<String>) -> Self {
        RouteSelector::OptionalQuery { name: name.into() }
    }

    pub fn and(first: RouteSelector, second: RouteSelector) -> Self {
        RouteSelector::And(Box::new(first), Box::new(second))
    }

    pub fn or(first: RouteSelector, second: RouteSelector) -> Self {
        RouteSelector::Or(Box::new(first), Box::new(second))
    }

    /// Static weight of the selector, fixed at construction.
    pub fn quality(&self) -> Quality {
        match self {
            RouteSelector::Root { .. }
            | RouteSelector::ConstantPath { .. }
            | RouteSelector::Method(_)
            | RouteSelector::Header { .. }
            | RouteSelector::Accept(_)
            | RouteSelector::ContentType(_)
            | RouteSelector::ConstantQuery { .. } => quality::CONSTANT,
            RouteSelector::Query { .. } | RouteSelector::OptionalQuery { .. } => {
                quality::QUERY_PARAMETER
            }
            RouteSelector::Parameter(segment) | RouteSelector::OptionalParameter(segment) => {
                segment.quality()
            }
            RouteSelector::Wildcard { .. } => quality::WILDCARD,
            RouteSelector::Tailcard(_) => quality::TAILCARD,
            RouteSelector::And(first, second) | RouteSelector::Or(first, second) => {
                first.quality() * second.quality()
            }
        }
    }

    /// Evaluates the selector against the request at `segment_index`.
    ///
    /// Only a malformed `Accept` or `Content-Type` header is an error; every
    /// other outcome is expressed through the returned evaluation.
    ///
    /// # Panics
    ///
    /// Panics when a root selector is evaluated past segment 0.
    pub fn evaluate(
        &self,
        ctx: &RoutingResolveContext<'_>,
        segment_index: usize,
    ) -> ResolverResult<RouteSelectorEvaluation> {
        let evaluation = match self {
            RouteSelector::Root { segments } => {
                assert_eq!(
                    segment_index, 0,
                    "root selector evaluated at segment {segment_index}"
                );
                evaluate_root(ctx, segments)
            }
            RouteSelector::ConstantPath {
                value,
                trailing_slash,
            } => match ctx.segment(segment_index) {
                Some(segment)
                    if segment == value
                        && trailing_slash_matches(ctx, segment_index, *trailing_slash) =>
                {
                    RouteSelectorEvaluation::success(
                        quality::CONSTANT,
                        Default::default(),
                        1,
                    )
                }
                _ => RouteSelectorEvaluation::failed(FailureReason::Path),
            },
            RouteSelector::Parameter(segment) => segment.evaluate(ctx, segment_index, false),
            RouteSelector::OptionalParameter(segment) => {
                segment.evaluate(ctx, segment_index, true)
            }
            RouteSelector::Wildcard { trailing_slash } => {
                if ctx.segment(segment_index).is_some()
                    && trailing_slash_matches(ctx, segment_index, *trailing_slash)
                {
                    RouteSelectorEvaluation::success(quality::WILDCARD, Default::default(), 1)
                } else {
                    RouteSelectorEvaluation::failed(FailureReason::Path)
                }
            }
            RouteSelector::Tailcard(tailcard) => tailcard.evaluate(ctx, segment_index),
            RouteSelector::Method(method) => http::evaluate_method(ctx, *method),
            RouteSelector::Header { name, value } => http::evaluate_header(ctx, name, value),
            RouteSelector::Accept(content_type) => http::evaluate_accept(ctx, content_type)?,
            RouteSelector::ContentType(content_type) => {
                http::evaluate_content_type(ctx, content_type)?
            }
            RouteSelector::ConstantQuery { name, value } => {
                http::evaluate_constant_query(ctx, name, value)
            }
            RouteSelector::Query { name } => http::evaluate_query(ctx, name, false),
            RouteSelector::OptionalQuery { name } => http::evaluate_query(ctx, name, true),
            RouteSelector::And(first, second) => {
                let head = first.evaluate(ctx, segment_index)?;
                if !head.succeeded {
                    return Ok(head);
                }
                let tail = second.evaluate(ctx, segment_index + head.segment_increment)?;
                if !tail.succeeded {
                    return Ok(tail);
                }
                let mut parameters = head.parameters;
                parameters.extend_from(&tail.parameters);
                RouteSelectorEvaluation::success(
                    head.quality * tail.quality,
                    parameters,
                    head.segment_increment + tail.segment_increment,
                )
            }
            RouteSelector::Or(first, second) => {
                let head = first.evaluate(ctx, segment_index)?;
                if head.succeeded {
                    return Ok(head);
                }
                second.evaluate(ctx, segment_index)?
            }
        };
        Ok(evaluation)
    }

    /// True when the selector can never succeed without a segment at the
    /// current index.
    pub fn requires_segment(&self) -> bool {
        match self {
            RouteSelector::ConstantPath { .. }
            | RouteSelector::Parameter(_)
            | RouteSelector::Wildcard { .. } => true,
            RouteSelector::And(first, second) => {
                first.requires_segment() || second.requires_segment()
            }
            RouteSelector::Or(first, second) => {
                first.requires_segment() && second.requires_segment()
            }
            _ => false,
        }
    }

    pub fn is_optional_parameter(&self) -> bool {
        matches!(self, RouteSelector::OptionalParameter(_))
    }

    pub fn is_path_selector(&self) -> bool {
        matches!(
            self,
            RouteSelector::Root { .. }
                | RouteSelector::ConstantPath { .. }
                | RouteSelector::Parameter(_)
                | RouteSelector::OptionalParameter(_)
                | RouteSelector::Wildcard { .. }
                | RouteSelector::Tailcard(_)
        )
    }
}

fn evaluate_root(ctx: &RoutingResolveContext<'_>, segments: &[String]) -> RouteSelectorEvaluation {
    if segments.is_empty() {
        return RouteSelectorEvaluation::constant();
    }

    let matched = segments
        .iter()
        .enumerate()
        .all(|(idx, expected)| ctx.segment(idx) == Some(expected.as_str()));
    if !matched || !trailing_slash_matches(ctx, segments.len() - 1, false) {
        return RouteSelectorEvaluation::failed(FailureReason::Path);
    }

    RouteSelectorEvaluation::success(quality::CONSTANT, Default::default(), segments.len())
}

impl fmt::Display for RouteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSelector::Root { segments } => {
                for segment in segments {
                    f.write_str("/")?;
                    write_constant(f, segment)?;
                }
                Ok(())
            }
            RouteSelector::ConstantPath {
                value,
                trailing_slash,
            } => {
                write_constant(f, value)?;
                write_trailing(f, *trailing_slash)
            }
            RouteSelector::Parameter(segment) => segment.fmt_pattern(f, ""),
            RouteSelector::OptionalParameter(segment) => segment.fmt_pattern(f, "?"),
            RouteSelector::Wildcard { trailing_slash } => {
                f.write_str("*")?;
                write_trailing(f, *trailing_slash)
            }
            RouteSelector::Tailcard(tailcard) => tailcard.fmt_pattern(f),
            RouteSelector::Method(method) => write!(f, "(method:{method})"),
            RouteSelector::Header { name, value } => write!(f, "(header:{name} = {value})"),
            RouteSelector::Accept(content_type) => write!(f, "(accept:{content_type})"),
            RouteSelector::ContentType(content_type) => {
                write!(f, "(contentType:{content_type})")
            }
            RouteSelector::ConstantQuery { name, value } => write!(f, "[{name} = {value}]"),
            RouteSelector::Query { name } => write!(f, "[{name}]"),
            RouteSelector::OptionalQuery { name } => write!(f, "[{name}?]"),
            RouteSelector::And(first, second) => write!(f, "({first} & {second})"),
            RouteSelector::Or(first, second) => write!(f, "({first} | {second})"),
        }
    }
}
