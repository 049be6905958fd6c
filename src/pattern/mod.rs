mod compile;
mod constraint;
mod error;
mod parser;
mod segment;

pub use compile::{compile_pattern, compile_routing_path, parse_root_path};
pub use constraint::ParamConstraint;
pub use error::{PatternError, PatternResult};
pub use parser::{ParameterModifier, ParameterSpec, parse_parameter, parse_path};
pub use segment::{PathSegmentDescriptor, RoutingPath, SegmentKind};
