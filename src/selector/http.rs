use super::evaluation::{FailureReason, RouteSelectorEvaluation, quality};
use crate::enums::HttpMethod;
use crate::header::{ContentType, parse_and_sort, parse_and_sort_content_types};
use crate::params::Parameters;
use crate::resolve::{ResolveError, ResolverResult, RoutingResolveContext};

pub(crate) const ACCEPT: &str = "Accept";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";

pub(super) fn evaluate_method(
    ctx: &RoutingResolveContext<'_>,
    method: HttpMethod,
) -> RouteSelectorEvaluation {
    if ctx.method() == method {
        RouteSelectorEvaluation::constant()
    } else {
        RouteSelectorEvaluation::failed(FailureReason::Method)
    }
}

pub(super) fn evaluate_header(
    ctx: &RoutingResolveContext<'_>,
    name: &str,
    value: &str,
) -> RouteSelectorEvaluation {
    let raw = ctx.headers().joined(name);
    parse_and_sort(raw.as_deref())
        .into_iter()
        .find(|candidate| candidate.value.eq_ignore_ascii_case(value))
        .map(|candidate| {
            RouteSelectorEvaluation::success(candidate.quality, Parameters::new(), 0)
        })
        .unwrap_or_else(|| RouteSelectorEvaluation::failed(FailureReason::Parameter))
}

/// Absent or blank `Accept` means the client takes anything.
pub(super) fn evaluate_accept(
    ctx: &RoutingResolveContext<'_>,
    content_type: &ContentType,
) -> ResolverResult<RouteSelectorEvaluation> {
    let raw = ctx.headers().joined(ACCEPT);
    let Some(raw) = raw.filter(|text| !text.trim().is_empty()) else {
        return Ok(RouteSelectorEvaluation::missing());
    };

    let candidates = parse_and_sort_content_types(Some(&raw)).map_err(|source| {
        ResolveError::MalformedRequestHeader {
            header: ACCEPT,
            source,
        }
    })?;

    // q=0 marks a type as explicitly unacceptable.
    let evaluation = candidates
        .iter()
        .filter(|candidate| candidate.quality > 0.0)
        .find(|candidate| content_type.matches(&candidate.content_type))
        .map(|candidate| {
            RouteSelectorEvaluation::success(candidate.quality, Parameters::new(), 0)
        })
        .unwrap_or_else(|| RouteSelectorEvaluation::failed(FailureReason::Parameter));
    Ok(evaluation)
}

/// Unlike `Accept`, an absent `Content-Type` is a mismatch: a route that
/// declares a body type does not match a request without one.
pub(super) fn evaluate_content_type(
    ctx: &RoutingResolveContext<'_>,
    content_type: &ContentType,
) -> ResolverResult<RouteSelectorEvaluation> {
    let Some(raw) = ctx.headers().get(CONTENT_TYPE) else {
        return Ok(RouteSelectorEvaluation::failed(FailureReason::Parameter));
    };

    let request_type = ContentType::parse(raw).map_err(|source| {
        ResolveError::MalformedRequestHeader {
            header: CONTENT_TYPE,
            source,
        }
    })?;

    if request_type.matches(content_type) {
        Ok(RouteSelectorEvaluation::constant())
    } else {
        Ok(RouteSelectorEvaluation::failed(FailureReason::Parameter))
    }
}

pub(super) fn evaluate_constant_query(
    ctx: &RoutingResolveContext<'_>,
    name: &str,
    value: &str,
) -> RouteSelectorEvaluation {
    if ctx.query().get_all(name).any(|candidate| candidate == value) {
        RouteSelectorEvaluation::constant()
    } else {
        RouteSelectorEvaluation::failed(FailureReason::Parameter)
    }
}

pub(super) fn evaluate_query(
    ctx: &RoutingResolveContext<'_>,
    name: &str,
    optional: bool,
) -> RouteSelectorEvaluation {
    let captured = Parameters::from_values(name, ctx.query().get_all(name));
    if !captured.is_empty() {
        RouteSelectorEvaluation::success(quality::QUERY_PARAMETER, captured, 0)
    } else if optional {
        RouteSelectorEvaluation::missing()
    } else {
        RouteSelectorEvaluation::failed(FailureReason::Parameter)
    }
}
