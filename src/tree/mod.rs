mod builder;
mod error;
mod node;
#[allow(clippy::module_inception)]
mod tree;

pub use builder::RouteBuilder;
pub use error::{TreeError, TreeResult};
pub use node::{NodeFlags, NodeId, RouteNode};
pub use tree::RouteTree;
