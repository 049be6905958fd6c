mod context;
mod error;
mod resolver;
mod result;
mod trace;

pub use context::{ResolveOptions, RoutingResolveContext};
pub use error::{ResolveError, ResolverResult};
pub use resolver::{resolve, resolve_traced};
pub use result::ResolveResult;
pub use trace::{ResolveTrace, TraceEntry, TraceOutcome};
