mod error;
mod split;

pub use error::{PathError, PathResult};
pub use split::{
    DEFAULT_MAX_SEGMENTS, RequestPath, SplitOptions, decode_percent, split_request_path,
};
