use super::{
    ParamConstraint, ParameterModifier, ParameterSpec, PathSegmentDescriptor, PatternError,
    PatternResult, RoutingPath, SegmentKind, parse_parameter, parse_path,
};
use crate::selector::{ParameterSegment, RouteSelector};

/// Parses a route pattern and turns every descriptor into a path selector.
pub fn compile_pattern(pattern: &str) -> PatternResult<Vec<RouteSelector>> {
    let path = parse_path(pattern)?;
    compile_routing_path(&path)
}

/// The trailing-slash flag of the path lands on the selector built from the
/// final descriptor.
pub fn compile_routing_path(path: &RoutingPath) -> PatternResult<Vec<RouteSelector>> {
    let last = path.segments.len().saturating_sub(1);
    path.segments
        .iter()
        .enumerate()
        .map(|(idx, descriptor)| {
            let trailing_slash = path.has_trailing_slash && idx == last;
            descriptor_to_selector(descriptor, trailing_slash)
        })
        .collect()
}

fn descriptor_to_selector(
    descriptor: &PathSegmentDescriptor,
    trailing_slash: bool,
) -> PatternResult<RouteSelector> {
    match descriptor.kind {
        SegmentKind::Wildcard => Ok(RouteSelector::wildcard(trailing_slash)),
        SegmentKind::Constant => Ok(RouteSelector::constant(
            descriptor.value.clone(),
            trailing_slash,
        )),
        SegmentKind::Parameter => {
            let spec = parse_parameter(&descriptor.value)?;
            spec_to_selector(spec, trailing_slash)
        }
    }
}

fn spec_to_selector(spec: ParameterSpec, trailing_slash: bool) -> PatternResult<RouteSelector> {
    if spec.modifier == ParameterModifier::Tailcard {
        return RouteSelector::tailcard(spec.name, spec.prefix, trailing_slash);
    }

    let mut segment = ParameterSegment::new(spec.name.as_str())
        .with_prefix(spec.prefix)
        .with_suffix(spec.suffix)
        .with_trailing_slash(trailing_slash);
    if let Some(raw) = spec.constraint.as_deref() {
        segment = segment.with_constraint(ParamConstraint::compile(&spec.name, raw)?);
    }

    Ok(match spec.modifier {
        ParameterModifier::Optional => RouteSelector::OptionalParameter(segment),
        _ => RouteSelector::Parameter(segment),
    })
}

/// Parses the configured root path into its literal segments.
///
/// The root must be absolute and may only hold constant segments.
pub fn parse_root_path(path: &str) -> PatternResult<Vec<String>> {
    let invalid = || PatternError::InvalidRootPath {
        path: path.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid());
    }

    let parsed = parse_path(path).map_err(|_| invalid())?;
    parsed
        .segments
        .into_iter()
        .map(|descriptor| match descriptor.kind {
            SegmentKind::Constant => Ok(descriptor.value),
            _ => Err(invalid()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_lands_on_the_last_selector() {
        let selectors = compile_pattern("/users/{id}/").unwrap();
        assert_eq!(selectors.len(), 2);
        assert_eq!(selectors[0], RouteSelector::constant("users", false));
        match &selectors[1] {
            RouteSelector::Parameter(segment) => {
                assert_eq!(segment.name(), "id");
                assert!(segment.trailing_slash());
            }
            other => panic!("expected parameter selector, got {other:?}"),
        }
    }

    #[test]
    fn star_segment_becomes_wildcard() {
        let selectors = compile_pattern("/assets/*").unwrap();
        assert_eq!(selectors[1], RouteSelector::wildcard(false));
    }

    #[test]
    fn escaped_star_stays_constant() {
        let selectors = compile_pattern(r"/assets/\*").unwrap();
        assert_eq!(selectors[1], RouteSelector::constant("*", false));
        assert_eq!(parse_root_path(r"/\*").unwrap(), vec!["*"]);
        assert!(parse_root_path("/*").is_err());
    }

    #[test]
    fn root_path_rejects_parameters() {
        assert_eq!(parse_root_path("/api/v1").unwrap(), vec!["api", "v1"]);
        assert!(parse_root_path("/").unwrap().is_empty());
        assert!(parse_root_path("api").is_err());
        assert!(parse_root_path("/api/{version}").is_err());
    }
}
