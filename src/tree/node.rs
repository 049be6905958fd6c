use bitflags::bitflags;
use smallvec::SmallVec;
use std::fmt;

use crate::selector::RouteSelector;
use crate::types::HandlerId;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const TERMINAL = 0b00000001;
        const REQUIRES_SEGMENT = 0b00000010;
    }
}

#[derive(Debug, Clone)]
pub struct RouteNode {
    pub(crate) selector: RouteSelector,
    // navigation only
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) handlers: SmallVec<[HandlerId; 1]>,
    pub(crate) flags: NodeFlags,
}

impl RouteNode {
    pub(crate) fn new(selector: RouteSelector, parent: Option<NodeId>) -> Self {
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::REQUIRES_SEGMENT, selector.requires_segment());
        Self {
            selector,
            parent,
            children: SmallVec::new(),
            handlers: SmallVec::new(),
            flags,
        }
    }

    pub fn selector(&self) -> &RouteSelector {
        &self.selector
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn handlers(&self) -> &[HandlerId] {
        &self.handlers
    }

    /// First registered handler, the one dispatched on a match.
    pub fn handler(&self) -> Option<HandlerId> {
        self.handlers.first().copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.flags.contains(NodeFlags::TERMINAL)
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub(crate) fn push_handler(&mut self, handler: HandlerId) {
        self.handlers.push(handler);
        self.flags.insert(NodeFlags::TERMINAL);
    }
}
