//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Operation needs an element but got another node type
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Hierarchy error (e.g., appending an ancestor to its descendant)
    #[error("Hierarchy request error: cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Selector could not be parsed
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),
}
