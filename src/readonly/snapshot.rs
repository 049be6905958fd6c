use crate::enums::HttpMethod;
use crate::request::RequestDescriptor;
use crate::resolve::{
    ResolveOptions, ResolveResult, ResolveTrace, RoutingResolveContext, resolve, resolve_traced,
};
use crate::router::RouterOptions;
use crate::selector::FailureReason;
use crate::tree::RouteTree;
use crate::types::RouteMatch;

use super::{ReadOnlyError, ReadOnlyResult};

/// Sealed routing table. Resolution takes no locks.
#[derive(Debug)]
pub struct RouterReadOnly {
    tree: RouteTree,
    options: RouterOptions,
    resolve_options: ResolveOptions,
}

impl RouterReadOnly {
    pub fn from_tree(mut tree: RouteTree, options: RouterOptions) -> Self {
        tree.seal();
        let resolve_options = options.resolve_options();
        Self {
            tree,
            options,
            resolve_options,
        }
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn resolve(&self, request: &RequestDescriptor) -> ReadOnlyResult<ResolveResult> {
        let ctx = RoutingResolveContext::new(request, self.resolve_options)?;
        Ok(resolve(&self.tree, &ctx)?)
    }

    pub fn resolve_traced(
        &self,
        request: &RequestDescriptor,
    ) -> ReadOnlyResult<(ResolveResult, ResolveTrace)> {
        let ctx = RoutingResolveContext::new(request, self.resolve_options)?;
        Ok(resolve_traced(&self.tree, &ctx)?)
    }

    /// Resolves a raw `path?query` target to its handler and parameters.
    #[tracing::instrument(skip(self, target), fields(method=?method, target=%target))]
    pub fn find(&self, method: HttpMethod, target: &str) -> ReadOnlyResult<RouteMatch> {
        tracing::event!(tracing::Level::TRACE, operation="find", method=?method, target=%target);
        self.find_request(&RequestDescriptor::from_target(method, target))
    }

    pub fn find_request(&self, request: &RequestDescriptor) -> ReadOnlyResult<RouteMatch> {
        let result = self.resolve(request)?;

        let handler = result
            .route
            .and_then(|node| self.tree.get(node))
            .and_then(|node| node.handler());
        match handler {
            Some(handler) => {
                if self.options.debug {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        handler = handler,
                        quality = result.quality,
                        params = result.parameters.len() as u64,
                        "route matched"
                    );
                }
                Ok((handler, result.parameters))
            }
            None if result.failure == Some(FailureReason::Method) => {
                Err(ReadOnlyError::MethodNotAllowed {
                    method: request.method(),
                    path: request.path().to_string(),
                })
            }
            None => Err(ReadOnlyError::RouteNotFound {
                method: request.method(),
                path: request.path().to_string(),
            }),
        }
    }
}
