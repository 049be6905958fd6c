use bunner_selector_router::pattern::PatternError;
use bunner_selector_router::tree::{NodeFlags, RouteTree, TreeError};
use bunner_selector_router::{HttpMethod, RouteSelector};

#[test]
fn tree_when_same_route_registered_twice_then_nodes_are_shared() {
    let mut tree = RouteTree::new();

    let first = tree
        .builder()
        .route("/users")
        .expect("route should register")
        .id();
    let second = tree
        .builder()
        .route("/users")
        .expect("route should register")
        .id();

    assert_eq!(first, second);
    assert_eq!(tree.root().children(), [first]);
}

#[test]
fn tree_when_routes_share_a_prefix_then_prefix_nodes_are_reused() {
    let mut tree = RouteTree::new();
    let root = tree.root_id();

    let profile = tree
        .create_route(root, "/users/{id}/profile")
        .expect("route should register");
    let posts = tree
        .create_route(root, "/users/{id}/posts")
        .expect("route should register");

    assert_ne!(profile, posts);
    assert_eq!(
        tree.node(profile).expect("node exists").parent(),
        tree.node(posts).expect("node exists").parent()
    );
    assert_eq!(tree.len(), 5);
}

#[test]
fn tree_when_header_names_differ_in_case_then_selectors_merge() {
    let mut tree = RouteTree::new();
    let root = tree.root_id();

    let upper = tree
        .create_child(root, RouteSelector::header("X-Api", "v1"))
        .expect("child should be created");
    let lower = tree
        .create_child(root, RouteSelector::header("x-api", "v1"))
        .expect("child should be created");

    assert_eq!(upper, lower);
}

#[test]
fn tree_when_group_builds_children_then_paths_render_through_parents() {
    let mut tree = RouteTree::new();
    let mut handlers = Vec::new();

    let api = tree
        .builder()
        .group("/api", |api| {
            handlers.push(api.route("/users")?.get(1)?);
            handlers.push(api.route("/users/{id}")?.delete(2)?);
            handlers.push(api.route("/search")?.param("q")?.handle(3)?);
            Ok(())
        })
        .expect("group should register");

    assert_eq!(tree.path_of(api).expect("path renders"), "/api");
    assert_eq!(
        tree.path_of(handlers[0]).expect("path renders"),
        "/api/users/(method:GET)"
    );
    assert_eq!(
        tree.path_of(handlers[1]).expect("path renders"),
        "/api/users/{id}/(method:DELETE)"
    );
    assert_eq!(
        tree.path_of(handlers[2]).expect("path renders"),
        "/api/search/[q]"
    );
    assert_eq!(tree.terminals().count(), 3);
}

#[test]
fn tree_when_handler_added_then_node_becomes_terminal() {
    let mut tree = RouteTree::new();

    let node = tree
        .builder()
        .on(HttpMethod::Get, "/ping", 42)
        .expect("route should register");
    let parent = tree.node(node).expect("node exists").parent().expect("has parent");

    let node = tree.node(node).expect("node exists");
    assert!(node.is_terminal());
    assert_eq!(node.handler(), Some(42));
    assert!(!tree.node(parent).expect("node exists").is_terminal());
}

#[test]
fn tree_when_selector_needs_a_segment_then_node_is_flagged() {
    let mut tree = RouteTree::new();
    let root = tree.root_id();

    let required = tree
        .create_child(root, RouteSelector::parameter("id"))
        .expect("child should be created");
    let optional = tree
        .create_child(root, RouteSelector::optional_parameter("id"))
        .expect("child should be created");

    assert!(
        tree.node(required)
            .expect("node exists")
            .flags()
            .contains(NodeFlags::REQUIRES_SEGMENT)
    );
    assert!(
        !tree
            .node(optional)
            .expect("node exists")
            .flags()
            .contains(NodeFlags::REQUIRES_SEGMENT)
    );
}

#[test]
fn tree_when_pattern_is_invalid_then_returns_pattern_error() {
    let mut tree = RouteTree::new();
    let root = tree.root_id();

    let err = tree.create_route(root, "/a/{x");

    match err.expect_err("expected pattern error") {
        TreeError::Pattern(PatternError::UnbalancedBraces { segment }) => {
            assert_eq!(segment, "{x");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_sealed_then_mutation_is_rejected() {
    let mut tree = RouteTree::new();
    let root = tree.root_id();
    let users = tree
        .create_route(root, "/users")
        .expect("route should register");
    tree.seal();

    match tree
        .create_child(users, RouteSelector::method(HttpMethod::Get))
        .expect_err("expected sealed error")
    {
        TreeError::Sealed { operation } => assert_eq!(operation, "create child"),
        other => panic!("unexpected error: {other:?}"),
    }
    match tree.add_handler(users, 1).expect_err("expected sealed error") {
        TreeError::Sealed { operation } => assert_eq!(operation, "add handler"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(tree.is_sealed());
}

#[test]
fn tree_when_node_belongs_to_another_tree_then_lookup_fails() {
    let mut large = RouteTree::new();
    let root = large.root_id();
    let foreign = large
        .create_route(root, "/a/b/c/d")
        .expect("route should register");
    let small = RouteTree::new();

    match small.path_of(foreign).expect_err("expected unknown node error") {
        TreeError::UnknownNode { id } => assert_eq!(id, foreign),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_root_path_configured_then_it_renders_first() {
    let mut tree = RouteTree::with_root_path("/api/v1").expect("root path should parse");
    let root = tree.root_id();

    let node = tree
        .create_route(root, "/files/{path...}")
        .expect("route should register");

    assert_eq!(
        tree.path_of(node).expect("path renders"),
        "/api/v1/files/{path...}"
    );
    match RouteTree::with_root_path("/api/{version}").expect_err("expected invalid root") {
        TreeError::Pattern(PatternError::InvalidRootPath { path }) => {
            assert_eq!(path, "/api/{version}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
