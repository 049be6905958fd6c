use super::ResolverResult;
use crate::enums::HttpMethod;
use crate::params::Parameters;
use crate::path::{RequestPath, SplitOptions, split_request_path};
use crate::request::{Headers, RequestDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub strict_trailing_slash: bool,
    pub split: SplitOptions,
    /// Record every evaluation in a [`ResolveTrace`](super::ResolveTrace).
    pub trace: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            strict_trailing_slash: true,
            split: SplitOptions::default(),
            trace: false,
        }
    }
}

/// Per-request, read-only view handed to selectors.
#[derive(Debug)]
pub struct RoutingResolveContext<'r> {
    request: &'r RequestDescriptor,
    path: RequestPath,
    options: ResolveOptions,
}

impl<'r> RoutingResolveContext<'r> {
    pub fn new(request: &'r RequestDescriptor, options: ResolveOptions) -> ResolverResult<Self> {
        let path = split_request_path(request.path(), &options.split)?;
        Ok(Self {
            request,
            path,
            options,
        })
    }

    pub fn request(&self) -> &RequestDescriptor {
        self.request
    }

    pub fn segments(&self) -> &[String] {
        &self.path.segments
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.path.segments.get(index).map(String::as_str)
    }

    pub fn segment_count(&self) -> usize {
        self.path.len()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.path.trailing_slash
    }

    pub fn strict_trailing_slash(&self) -> bool {
        self.options.strict_trailing_slash
    }

    pub fn tracing_enabled(&self) -> bool {
        self.options.trace
    }

    pub fn method(&self) -> HttpMethod {
        self.request.method()
    }

    pub fn headers(&self) -> &Headers {
        self.request.headers()
    }

    pub fn query(&self) -> &Parameters {
        self.request.query()
    }
}
