use super::{NodeId, RouteTree, TreeResult};
use crate::enums::HttpMethod;
use crate::header::ContentType;
use crate::selector::RouteSelector;
use crate::types::HandlerId;

/// Registration cursor positioned on one node of a [`RouteTree`].
///
/// Every call creates or reuses a child node and returns a cursor on it, so
/// registering the same shape twice always lands on the same node.
#[derive(Debug)]
pub struct RouteBuilder<'t> {
    tree: &'t mut RouteTree,
    node: NodeId,
}

impl<'t> RouteBuilder<'t> {
    pub(super) fn new(tree: &'t mut RouteTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Descends along a route pattern such as `/users/{id}`.
    pub fn route(&mut self, pattern: &str) -> TreeResult<RouteBuilder<'_>> {
        let node = self.tree.create_route(self.node, pattern)?;
        Ok(RouteBuilder::new(self.tree, node))
    }

    /// Runs `build` on the node for `pattern` and returns that node.
    pub fn group<F>(&mut self, pattern: &str, build: F) -> TreeResult<NodeId>
    where
        F: FnOnce(&mut RouteBuilder<'_>) -> TreeResult<()>,
    {
        let mut child = self.route(pattern)?;
        build(&mut child)?;
        Ok(child.node)
    }

    /// Literal segment, taken as is without pattern parsing.
    pub fn path(&mut self, segment: &str) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::constant(segment, false))
    }

    pub fn method(&mut self, method: HttpMethod) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::method(method))
    }

    pub fn header(&mut self, name: &str, value: &str) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::header(name, value))
    }

    pub fn param(&mut self, name: &str) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::query(name))
    }

    pub fn constant_param(&mut self, name: &str, value: &str) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::constant_query(name, value))
    }

    pub fn optional_param(&mut self, name: &str) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::optional_query(name))
    }

    pub fn accept(&mut self, content_type: ContentType) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::accept(content_type))
    }

    pub fn content_type(&mut self, content_type: ContentType) -> TreeResult<RouteBuilder<'_>> {
        self.select(RouteSelector::content_type(content_type))
    }

    pub fn select(&mut self, selector: RouteSelector) -> TreeResult<RouteBuilder<'_>> {
        let node = self.tree.create_child(self.node, selector)?;
        Ok(RouteBuilder::new(self.tree, node))
    }

    /// Attaches `handler` to the current node, making it terminal.
    pub fn handle(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.tree.add_handler(self.node, handler)?;
        Ok(self.node)
    }

    /// `pattern` followed by a method selector carrying `handler`.
    pub fn on(&mut self, method: HttpMethod, pattern: &str, handler: HandlerId) -> TreeResult<NodeId> {
        self.route(pattern)?.method(method)?.handle(handler)
    }

    pub fn get(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Get)?.handle(handler)
    }

    pub fn post(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Post)?.handle(handler)
    }

    pub fn put(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Put)?.handle(handler)
    }

    pub fn delete(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Delete)?.handle(handler)
    }

    pub fn patch(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Patch)?.handle(handler)
    }

    pub fn head(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Head)?.handle(handler)
    }

    pub fn options(&mut self, handler: HandlerId) -> TreeResult<NodeId> {
        self.method(HttpMethod::Options)?.handle(handler)
    }
}
