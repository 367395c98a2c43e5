//! Toggle DOM - Document Object Model
//!
//! Arena-backed element tree with class lists, selector queries,
//! click and custom event dispatch, and a virtual timer clock.

mod classlist;
mod document;
mod events;
mod node;
mod selector;
mod timers;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use events::{CustomEvent, CustomListener, Event, EventType, Listener, ListenerId};
pub use node::{ElementData, Node, NodeData};
pub use selector::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SelectorComponent, SelectorList,
};
pub use timers::{TimerId, TimerQueue, TimerTask};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/absent node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("'{selector}' is not a valid selector: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("node {0:?} does not exist in this document")]
    UnknownNode(NodeId),
    #[error("cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
