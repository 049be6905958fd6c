pub mod enums;
pub mod header;
pub mod params;
pub mod path;
pub mod pattern;
pub mod readonly;
pub mod request;
pub mod resolve;
pub mod router;
pub mod selector;
pub mod tree;
pub mod types;

pub use enums::HttpMethod;
pub use params::Parameters;
pub use readonly::{ReadOnlyError, RouterReadOnly};
pub use request::{Headers, RequestDescriptor};
pub use resolve::{ResolveError, ResolveResult, ResolveTrace, RoutingResolveContext};
pub use router::{Router, RouterError, RouterOptions, RouterResult};
pub use selector::{FailureReason, RouteSelector, RouteSelectorEvaluation};
pub use tree::{NodeId, RouteBuilder, RouteTree};
pub use types::{HandlerId, Quality, RouteMatch};
