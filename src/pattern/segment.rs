#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Constant,
    Parameter,
    /// Bare unescaped `*`.
    Wildcard,
}

/// One `/`-delimited piece of a route pattern.
///
/// Constant values are stored unescaped; parameter values keep the raw
/// segment text (prefix, braces and suffix) for later selector construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegmentDescriptor {
    pub value: String,
    pub kind: SegmentKind,
}

impl PathSegmentDescriptor {
    pub fn constant(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: SegmentKind::Constant,
        }
    }

    pub fn wildcard() -> Self {
        Self {
            value: "*".to_string(),
            kind: SegmentKind::Wildcard,
        }
    }

    pub fn parameter(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: SegmentKind::Parameter,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingPath {
    pub segments: Vec<PathSegmentDescriptor>,
    pub has_trailing_slash: bool,
}

impl RoutingPath {
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}
