//! domkit DOM - Document Object Model
//!
//! Arena-backed document tree with attributes, class lists, inline style,
//! a small selector engine and bubbling event dispatch.

mod attributes;
mod classlist;
mod document;
mod error;
mod events;
mod node;
mod selector;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::ClassList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use events::{Event, EventPhase, EventType, Listener, ListenerId};
pub use node::{ElementData, Node, NodeData};
pub use selector::{Selector, SelectorList};
pub use style::InlineStyle;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node" in the arena links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert an arena link into an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}
