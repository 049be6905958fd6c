mod content_type;
mod error;
mod quality;

pub use content_type::{ContentType, ContentTypeCandidate, parse_and_sort_content_types};
pub use error::{HeaderError, HeaderResult};
pub use quality::{HeaderValue, parse_and_sort, parse_header_value};
