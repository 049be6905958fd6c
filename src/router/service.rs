use crate::enums::HttpMethod;
use crate::readonly::RouterReadOnly;
use crate::request::RequestDescriptor;
use crate::resolve::ResolveResult;
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::tree::{NodeId, RouteBuilder, RouteTree, TreeError, TreeResult};
use crate::types::{HandlerId, RouteMatch};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::OnceLock;

#[derive(Debug)]
struct RouterState {
    tree: RouteTree,
    options: RouterOptions,
    readonly: OnceLock<Arc<RouterReadOnly>>,
}

impl RouterState {
    fn new(options: RouterOptions) -> RouterResult<Self> {
        let tree = match options.root_path.as_deref() {
            Some(root_path) => RouteTree::with_root_path(root_path)?,
            None => RouteTree::new(),
        };
        Ok(Self {
            tree,
            options,
            readonly: OnceLock::new(),
        })
    }

    fn is_sealed(&self) -> bool {
        self.readonly.get().is_some()
    }
}

/// Registration front end: routes are added by a single writer, then
/// `seal` freezes them into a [`RouterReadOnly`] shared by readers.
#[derive(Debug)]
pub struct Router {
    inner: RwLock<RouterState>,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        Ok(Self {
            inner: RwLock::new(RouterState::new(options)?),
        })
    }

    /// Registers `handler` for `method` on `pattern`.
    pub fn add(&self, method: HttpMethod, pattern: &str, handler: HandlerId) -> RouterResult<NodeId> {
        let mut guard = self.inner.write();

        if guard.is_sealed() {
            return Err(RouterError::AddWhileSealed {
                path: pattern.to_string(),
            });
        }

        Ok(guard.tree.builder().on(method, pattern, handler)?)
    }

    /// Runs `build` against the root of the registration tree.
    pub fn register<F, R>(&self, build: F) -> RouterResult<R>
    where
        F: FnOnce(&mut RouteBuilder<'_>) -> TreeResult<R>,
    {
        let mut guard = self.inner.write();

        if guard.is_sealed() {
            return Err(TreeError::Sealed {
                operation: "register routes",
            }
            .into());
        }

        let mut builder = guard.tree.builder();
        Ok(build(&mut builder)?)
    }

    /// Renders the route leading to `node` while the router is still open.
    pub fn path_of(&self, node: NodeId) -> RouterResult<String> {
        let guard = self.inner.read();
        match guard.readonly.get() {
            Some(ro) => Ok(ro.tree().path_of(node)?),
            None => Ok(guard.tree.path_of(node)?),
        }
    }

    pub fn seal(&self) {
        let mut guard = self.inner.write();

        if guard.is_sealed() {
            return;
        }
        let tree = std::mem::take(&mut guard.tree);
        let snapshot = RouterReadOnly::from_tree(tree, guard.options.clone());
        tracing::event!(
            tracing::Level::TRACE,
            operation = "seal",
            nodes = snapshot.tree().len() as u64
        );
        let _ = guard.readonly.set(Arc::new(snapshot));
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().is_sealed()
    }

    pub fn resolve(&self, request: &RequestDescriptor) -> RouterResult<ResolveResult> {
        let ro = self.readonly_or(RouterError::ResolveWhileMutable)?;
        Ok(ro.resolve(request)?)
    }

    pub fn find(&self, method: HttpMethod, target: &str) -> RouterResult<RouteMatch> {
        let ro = self.readonly_or(RouterError::ResolveWhileMutable)?;
        Ok(ro.find(method, target)?)
    }

    pub fn get_readonly(&self) -> RouterResult<Arc<RouterReadOnly>> {
        self.readonly_or(RouterError::ReadOnlyUnavailable)
    }

    fn readonly_or(&self, error: RouterError) -> RouterResult<Arc<RouterReadOnly>> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => Ok(ro.clone()),
            None => Err(error),
        }
    }
}
