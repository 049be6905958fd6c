use bunner_selector_router::path::PathError;
use bunner_selector_router::pattern::PatternError;
use bunner_selector_router::resolve::ResolveError;
use bunner_selector_router::tree::TreeError;
use bunner_selector_router::{HttpMethod, ReadOnlyError, Router, RouterError};

fn open_router() -> Router {
    Router::new(None).expect("default options are valid")
}

#[test]
fn router_when_not_sealed_then_lookups_are_rejected() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/ping", 1)
        .expect("route should register");

    match router.find(HttpMethod::Get, "/ping") {
        Err(RouterError::ResolveWhileMutable) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    match router.get_readonly() {
        Err(RouterError::ReadOnlyUnavailable) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!router.is_sealed());
}

#[test]
fn router_when_sealed_then_registration_is_rejected() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/ping", 1)
        .expect("route should register");
    router.seal();

    match router
        .add(HttpMethod::Post, "/late", 2)
        .expect_err("expected sealed error")
    {
        RouterError::AddWhileSealed { path } => assert_eq!(path, "/late"),
        other => panic!("unexpected error: {other:?}"),
    }
    match router
        .register(|root| root.route("/late")?.handle(3))
        .expect_err("expected sealed error")
    {
        RouterError::Tree(TreeError::Sealed { operation }) => {
            assert_eq!(operation, "register routes")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(router.is_sealed());
}

#[test]
fn router_when_sealed_twice_then_snapshot_is_kept() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/ping", 1)
        .expect("route should register");
    router.seal();
    let first = router.get_readonly().expect("snapshot exists");

    router.seal();
    let second = router.get_readonly().expect("snapshot exists");

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn router_when_route_found_then_returns_handler_and_parameters() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/users/{id}", 7)
        .expect("route should register");
    router.seal();

    let (handler, params) = router
        .find(HttpMethod::Get, "/users/42?expand=true")
        .expect("route should match");

    assert_eq!(handler, 7);
    assert_eq!(params.get("id"), Some("42"));
    assert!(!params.contains("expand"));
}

#[test]
fn router_when_only_method_differs_then_method_not_allowed() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/users", 1)
        .expect("route should register");
    router.seal();

    match router
        .find(HttpMethod::Delete, "/users")
        .expect_err("expected method error")
    {
        RouterError::ReadOnly(ReadOnlyError::MethodNotAllowed { method, path }) => {
            assert_eq!(method, HttpMethod::Delete);
            assert_eq!(path, "/users");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_path_unknown_then_route_not_found() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/users", 1)
        .expect("route should register");
    router.seal();

    match router
        .find(HttpMethod::Get, "/orders")
        .expect_err("expected not found")
    {
        RouterError::ReadOnly(ReadOnlyError::RouteNotFound { path, .. }) => {
            assert_eq!(path, "/orders")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_request_path_has_control_bytes_then_path_error() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/users", 1)
        .expect("route should register");
    router.seal();

    match router
        .find(HttpMethod::Get, "/us\ters")
        .expect_err("expected path error")
    {
        RouterError::ReadOnly(ReadOnlyError::Resolve(ResolveError::Path(
            PathError::ControlCharacter { byte, .. },
        ))) => assert_eq!(byte, b'\t'),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_pattern_invalid_then_tree_error_surfaces() {
    let router = open_router();

    match router
        .add(HttpMethod::Get, "/files/{path...}.txt", 1)
        .expect_err("expected pattern error")
    {
        RouterError::Tree(TreeError::Pattern(PatternError::TailcardWithSuffix { .. })) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_route_added_twice_then_first_handler_wins() {
    let router = open_router();

    let first = router
        .add(HttpMethod::Get, "/dup", 1)
        .expect("route should register");
    let second = router
        .add(HttpMethod::Get, "/dup", 2)
        .expect("route should register");
    router.seal();

    assert_eq!(first, second);
    let (handler, _) = router
        .find(HttpMethod::Get, "/dup")
        .expect("route should match");
    assert_eq!(handler, 1);
}

#[test]
fn router_when_group_registered_then_routes_resolve_and_render() {
    let router = open_router();

    let nodes = router
        .register(|root| {
            let mut nodes = Vec::new();
            root.group("/v1", |v1| {
                nodes.push(v1.route("/items")?.get(10)?);
                nodes.push(v1.route("/items/{id}")?.put(11)?);
                Ok(())
            })?;
            Ok(nodes)
        })
        .expect("group should register");

    assert_eq!(
        router.path_of(nodes[1]).expect("path renders"),
        "/v1/items/{id}/(method:PUT)"
    );
    router.seal();

    let (handler, params) = router
        .find(HttpMethod::Put, "/v1/items/9")
        .expect("route should match");
    assert_eq!(handler, 11);
    assert_eq!(params.get("id"), Some("9"));
    assert_eq!(
        router.path_of(nodes[0]).expect("path renders after seal"),
        "/v1/items/(method:GET)"
    );
}

#[test]
fn router_when_snapshot_shared_across_threads_then_lookups_agree() {
    let router = open_router();
    router
        .add(HttpMethod::Get, "/users/{id}", 1)
        .expect("route should register");
    router
        .add(HttpMethod::Get, "/users/me", 2)
        .expect("route should register");
    router.seal();
    let readonly = router.get_readonly().expect("snapshot exists");

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let readonly = &readonly;
            scope.spawn(move || {
                for i in 0..100 {
                    let target = format!("/users/{}", worker * 100 + i);
                    let (handler, params) = readonly
                        .find(HttpMethod::Get, &target)
                        .expect("route should match");
                    assert_eq!(handler, 1);
                    assert_eq!(params.len(), 1);

                    let (handler, _) = readonly
                        .find(HttpMethod::Get, "/users/me")
                        .expect("route should match");
                    assert_eq!(handler, 2);
                }
            });
        }
    });
}
