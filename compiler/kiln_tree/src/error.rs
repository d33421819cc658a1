use crate::NodeId;

/// Failure of a structural tree mutation.
///
/// Every mutation validates its arguments before touching storage, so an
/// `Err` always leaves the tree exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {node} is out of range for a tree of {len} nodes")]
    NodeOutOfRange { node: NodeId, len: usize },

    #[error("`{operation}` cannot be applied to the root node")]
    RootNotAllowed { operation: &'static str },

    #[error("node {source_node} is not a descendant of node {target}")]
    NotADescendant { target: NodeId, source_node: NodeId },

    #[error("tree cannot grow past {max} nodes")]
    CapacityExceeded { max: usize },
}
