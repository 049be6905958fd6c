use hashbrown::{Equivalent, HashMap as FastHashMap};
use std::hash::{Hash, Hasher};

use super::{NodeId, RouteBuilder, RouteNode, TreeError, TreeResult};
use crate::pattern::{compile_pattern, parse_root_path};
use crate::selector::RouteSelector;
use crate::types::HandlerId;

type ChildIndexKey = (NodeId, RouteSelector);

/// Borrowed form of [`ChildIndexKey`] so lookups do not clone the selector.
struct ChildKey<'a>(NodeId, &'a RouteSelector);

impl Hash for ChildKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl Equivalent<ChildIndexKey> for ChildKey<'_> {
    fn equivalent(&self, key: &ChildIndexKey) -> bool {
        self.0 == key.0 && *self.1 == key.1
    }
}

/// Arena-backed selector tree.
///
/// Node 0 is always the root. Children keep registration order, which is
/// also the order the resolver explores them in.
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    child_index: FastHashMap<ChildIndexKey, NodeId>,
    sealed: bool,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    pub fn new() -> Self {
        Self::with_root_selector(RouteSelector::root(Vec::new()))
    }

    /// Tree whose root only matches requests under `root_path`.
    pub fn with_root_path(root_path: &str) -> TreeResult<Self> {
        let segments = parse_root_path(root_path)?;
        Ok(Self::with_root_selector(RouteSelector::root(segments)))
    }

    fn with_root_selector(selector: RouteSelector) -> Self {
        Self {
            nodes: vec![RouteNode::new(selector, None)],
            child_index: FastHashMap::new(),
            sealed: false,
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn root(&self) -> &RouteNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&RouteNode> {
        self.get(id).ok_or(TreeError::UnknownNode { id })
    }

    // Ids handed out by this tree are always in bounds.
    pub(crate) fn node_at(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            self.nodes.shrink_to_fit();
            self.child_index.shrink_to_fit();
            tracing::event!(
                tracing::Level::TRACE,
                operation = "seal",
                nodes = self.nodes.len() as u64
            );
        }
    }

    /// Returns the child of `parent` holding an equal selector, creating it
    /// when there is none.
    #[tracing::instrument(level = "trace", skip(self, selector), fields(parent=%parent, selector=%selector))]
    pub fn create_child(&mut self, parent: NodeId, selector: RouteSelector) -> TreeResult<NodeId> {
        self.ensure_mutable("create child")?;
        self.node(parent)?;

        if let Some(&existing) = self.child_index.get(&ChildKey(parent, &selector)) {
            return Ok(existing);
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RouteNode::new(selector.clone(), Some(parent)));
        self.nodes[parent.index()].children.push(id);
        self.child_index.insert((parent, selector), id);
        Ok(id)
    }

    /// Folds the selectors of `pattern` under `parent`, reusing nodes that
    /// already exist.
    #[tracing::instrument(level = "trace", skip(self), fields(parent=%parent, pattern=%pattern))]
    pub fn create_route(&mut self, parent: NodeId, pattern: &str) -> TreeResult<NodeId> {
        self.ensure_mutable("create route")?;
        let selectors = compile_pattern(pattern)?;
        let mut current = parent;
        for selector in selectors {
            current = self.create_child(current, selector)?;
        }
        Ok(current)
    }

    pub fn add_handler(&mut self, node: NodeId, handler: HandlerId) -> TreeResult<()> {
        self.ensure_mutable("add handler")?;
        self.node(node)?;
        self.nodes[node.index()].push_handler(handler);
        tracing::event!(
            tracing::Level::TRACE,
            operation = "add_handler",
            node = %node,
            handler = handler
        );
        Ok(())
    }

    pub fn builder(&mut self) -> RouteBuilder<'_> {
        RouteBuilder::new(self, NodeId::ROOT)
    }

    pub fn builder_at(&mut self, node: NodeId) -> TreeResult<RouteBuilder<'_>> {
        self.node(node)?;
        Ok(RouteBuilder::new(self, node))
    }

    /// Nodes carrying at least one handler, in creation order.
    pub fn terminals(&self) -> impl Iterator<Item = (NodeId, &RouteNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_terminal())
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }

    /// Renders the route leading to `id`, e.g. `/users/{id}/(method:GET)`.
    pub fn path_of(&self, id: NodeId) -> TreeResult<String> {
        self.node(id)?;
        Ok(self.render_path(id))
    }

    pub(crate) fn render_path(&self, id: NodeId) -> String {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node_at(current);
            chain.push(node);
            cursor = node.parent;
        }

        let mut rendered = String::new();
        for node in chain.into_iter().rev() {
            match node.selector() {
                RouteSelector::Root { .. } => rendered.push_str(&node.selector().to_string()),
                selector => {
                    if !rendered.ends_with('/') {
                        rendered.push('/');
                    }
                    rendered.push_str(&selector.to_string());
                }
            }
        }
        if rendered.is_empty() {
            rendered.push('/');
        }
        rendered
    }

    fn ensure_mutable(&self, operation: &'static str) -> TreeResult<()> {
        if self.sealed {
            return Err(TreeError::Sealed { operation });
        }
        Ok(())
    }
}
