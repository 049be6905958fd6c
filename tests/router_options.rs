use bunner_selector_router::path::PathError;
use bunner_selector_router::resolve::ResolveError;
use bunner_selector_router::router::{DEFAULT_MAX_SEGMENTS, RouterOptionsError};
use bunner_selector_router::{HttpMethod, ReadOnlyError, Router, RouterError, RouterOptions};

fn sealed_router(options: RouterOptions, routes: &[(&str, u32)]) -> Router {
    let router = Router::new(Some(options)).expect("options should be valid");
    for &(pattern, handler) in routes {
        router
            .add(HttpMethod::Get, pattern, handler)
            .expect("route should register");
    }
    router.seal();
    router
}

#[test]
fn options_when_defaulted_then_strict_and_undecoded() {
    let options = RouterOptions::default();

    assert!(options.strict_trailing_slash);
    assert!(!options.decode_percent);
    assert_eq!(options.root_path, None);
    assert_eq!(options.max_segments, DEFAULT_MAX_SEGMENTS);
    assert!(!options.debug);
    assert_eq!(RouterOptions::builder().build(), Ok(options));
}

#[test]
fn options_when_max_segments_zero_then_rejected() {
    let err = RouterOptions::builder().max_segments(0).build();

    match err.expect_err("expected invalid max segments") {
        RouterOptionsError::MaxSegmentsInvalid { provided } => assert_eq!(provided, 0),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn options_when_root_path_not_constant_then_router_refuses_them() {
    let options = RouterOptions {
        root_path: Some("/api/{tenant}".to_string()),
        ..Default::default()
    };

    match Router::new(Some(options)).expect_err("expected invalid root path") {
        RouterError::Options(RouterOptionsError::InvalidRootPath { path }) => {
            assert_eq!(path, "/api/{tenant}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(RouterOptions::builder().root_path("api").build().is_err());
}

#[test]
fn options_when_root_path_set_then_routes_require_it() {
    let options = RouterOptions::builder()
        .root_path("/api/v2")
        .build()
        .expect("root path should be valid");
    let router = sealed_router(options, &[("/users", 1)]);

    let (handler, _) = router
        .find(HttpMethod::Get, "/api/v2/users")
        .expect("route should match");
    assert_eq!(handler, 1);
    match router
        .find(HttpMethod::Get, "/users")
        .expect_err("expected not found")
    {
        RouterError::ReadOnly(ReadOnlyError::RouteNotFound { .. }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn options_when_trailing_slash_lenient_then_slash_is_ignored() {
    let strict = sealed_router(RouterOptions::default(), &[("/users", 1)]);
    let lenient = sealed_router(
        RouterOptions::builder()
            .strict_trailing_slash(false)
            .build()
            .expect("options should be valid"),
        &[("/users", 1)],
    );

    assert!(strict.find(HttpMethod::Get, "/users/").is_err());
    let (handler, _) = lenient
        .find(HttpMethod::Get, "/users/")
        .expect("route should match");
    assert_eq!(handler, 1);
}

#[test]
fn options_when_decode_percent_enabled_then_segments_are_decoded() {
    let raw = sealed_router(RouterOptions::default(), &[("/café", 1)]);
    let decoding = sealed_router(
        RouterOptions::builder()
            .decode_percent(true)
            .build()
            .expect("options should be valid"),
        &[("/café", 1), ("/tags/{tag}", 2)],
    );

    assert!(raw.find(HttpMethod::Get, "/caf%C3%A9").is_err());
    let (handler, _) = decoding
        .find(HttpMethod::Get, "/caf%C3%A9")
        .expect("route should match");
    assert_eq!(handler, 1);
    let (_, params) = decoding
        .find(HttpMethod::Get, "/tags/a%2Fb")
        .expect("route should match");
    assert_eq!(params.get("tag"), Some("a/b"));
}

#[test]
fn options_when_path_exceeds_segment_limit_then_path_error() {
    let router = sealed_router(
        RouterOptions::builder()
            .max_segments(2)
            .build()
            .expect("options should be valid"),
        &[("/a/b", 1)],
    );

    assert!(router.find(HttpMethod::Get, "/a/b").is_ok());
    match router
        .find(HttpMethod::Get, "/a/b/c")
        .expect_err("expected too many segments")
    {
        RouterError::ReadOnly(ReadOnlyError::Resolve(ResolveError::Path(
            PathError::TooManySegments { limit, .. },
        ))) => assert_eq!(limit, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn options_when_debug_enabled_then_lookups_still_match() {
    let router = sealed_router(
        RouterOptions::builder()
            .debug(true)
            .build()
            .expect("options should be valid"),
        &[("/users/{id}", 1)],
    );

    let (handler, params) = router
        .find(HttpMethod::Get, "/users/5")
        .expect("route should match");
    assert_eq!(handler, 1);
    assert_eq!(params.get("id"), Some("5"));
    assert!(router.get_readonly().expect("snapshot exists").options().debug);
}
