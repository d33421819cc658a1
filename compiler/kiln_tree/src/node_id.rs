//! Positional node handles into a [`FlatTree`](crate::FlatTree).

use std::fmt;

/// Position of a node inside a flat tree.
///
/// A `NodeId` is only meaningful for the tree that produced it, and only until
/// a structural mutation touches a position at or before it. Mutations that
/// return a `NodeId` document which position the returned handle refers to.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a handle from a raw position.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Index into the tree's node storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        // Trees are bounded by u32 positions; `FlatTree::check_capacity` guards growth.
        #[allow(clippy::cast_possible_truncation)]
        NodeId(index as u32)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
