//! Kiln Tree - flattened ordered trees with weight-encoded structure.
//!
//! A [`FlatTree`] stores its nodes in pre-order inside a single `Vec`. Instead
//! of parent/child pointers every node carries a signed *weight*: the depth
//! of the following node minus the depth of this one, with the position just
//! past the last node treated as depth `-1`. A lone root therefore has weight
//! `-1`, and no weight is ever greater than `1`.
//!
//! Running a prefix sum over the weights recovers the whole shape:
//!
//! - a node has children exactly when its weight is `1`;
//! - summing forward from a node, the first point where the sum drops to
//!   `0` or below is the end of its subtree;
//! - summing backward, the first point where the sum becomes positive is
//!   the parent.
//!
//! # Handles
//!
//! [`NodeId`]s are positions. A structural mutation invalidates every handle
//! at or after the position it touches; handles before it stay valid. Each
//! mutation documents which position its returned handle names.
//!
//! # Guarantees
//!
//! Mutations validate their arguments before modifying storage. When they
//! return an error the tree is unchanged.

mod error;
mod node_id;

use std::fmt;
use std::ops::{Index, IndexMut, Range};

pub use error::TreeError;
pub use node_id::NodeId;

/// Trees are addressed with u32 positions.
const MAX_NODES: usize = u32::MAX as usize;

#[derive(Clone, Debug, PartialEq)]
struct Slot<T> {
    weight: i32,
    value: T,
}

/// Ordered tree flattened into a pre-order sequence of `(weight, value)` pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTree<T> {
    nodes: Vec<Slot<T>>,
}

impl<T> FlatTree<T> {
    /// Create a tree holding only a root.
    pub fn new(root: T) -> Self {
        FlatTree {
            nodes: vec![Slot {
                weight: -1,
                value: root,
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included. Never zero.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.nodes.get(node.index()).map(|slot| &slot.value)
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node.index()).map(|slot| &mut slot.value)
    }

    /// Raw weight of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    #[inline]
    pub fn weight(&self, node: NodeId) -> i32 {
        self.nodes[node.index()].weight
    }

    /// Sum of the weights over the subtree of `node`.
    ///
    /// Equals the depth of the node following the subtree minus the depth of
    /// `node`, so it is `0` when a next sibling exists and negative otherwise.
    pub fn deep_weight(&self, node: NodeId) -> i32 {
        self.span(node.index()).1
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.weight(node) < 1
    }

    /// Position just past the subtree of `node`.
    ///
    /// May equal [`node_count`](Self::node_count) when the subtree runs to the
    /// end of the tree.
    pub fn end(&self, node: NodeId) -> NodeId {
        NodeId::from_index(self.span(node.index()).0)
    }

    /// Number of nodes in the subtree of `node`, `node` included.
    pub fn deep_size(&self, node: NodeId) -> usize {
        self.span(node.index()).0 - node.index()
    }

    /// Distance from the root; the root has depth `0`.
    pub fn depth(&self, node: NodeId) -> usize {
        let depth: i32 = self.nodes[..node.index()]
            .iter()
            .map(|slot| slot.weight)
            .sum();
        usize::try_from(depth).unwrap_or(0)
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        if self.is_leaf(node) {
            None
        } else {
            Some(NodeId::from_index(node.index() + 1))
        }
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (end, deep_weight) = self.span(node.index());
        if end < self.nodes.len() && deep_weight == 0 {
            Some(NodeId::from_index(end))
        } else {
            None
        }
    }

    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut sum = 0;
        for index in (0..node.index()).rev() {
            sum += self.nodes[index].weight;
            if sum >= 0 {
                return (sum == 0).then(|| NodeId::from_index(index));
            }
        }
        None
    }

    /// Parent of `node`, or `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let mut sum = 0;
        for index in (0..node.index()).rev() {
            sum += self.nodes[index].weight;
            if sum > 0 {
                return Some(NodeId::from_index(index));
            }
        }
        None
    }

    pub fn children(&self, node: NodeId) -> Children<'_, T> {
        Children {
            tree: self,
            next: self.first_child(node),
        }
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).count()
    }

    /// The `position`-th direct child of `node`.
    pub fn child(&self, node: NodeId, position: usize) -> Option<NodeId> {
        self.children(node).nth(position)
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last()
    }

    /// Whether `node` lies inside the subtree of `ancestor` (inclusive).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor <= node && node.index() < self.span(ancestor.index()).0
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, slot)| (NodeId::from_index(index), &slot.value))
    }

    /// Re-check every weight invariant from scratch.
    pub fn is_well_formed(&self) -> bool {
        let mut depth = 0;
        for (index, slot) in self.nodes.iter().enumerate() {
            if slot.weight > 1 || (index > 0 && depth < 1) {
                return false;
            }
            depth += slot.weight;
        }
        !self.nodes.is_empty() && depth == -1
    }

    // Mutation

    /// Insert `value` as the new last child of `parent`.
    ///
    /// Returns the position of the new node. Handles after that position are
    /// invalidated.
    pub fn append(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        self.check_capacity(1)?;
        let p = parent.index();
        if self.is_leaf(parent) {
            let weight = self.nodes[p].weight - 1;
            self.nodes[p].weight = 1;
            self.nodes.insert(p + 1, Slot { weight, value });
            Ok(NodeId::from_index(p + 1))
        } else {
            let (end, deep_weight) = self.span(p);
            self.nodes[end - 1].weight -= deep_weight - 1;
            self.nodes.insert(
                end,
                Slot {
                    weight: deep_weight - 1,
                    value,
                },
            );
            Ok(NodeId::from_index(end))
        }
    }

    /// Insert `value` as the new first child of `parent`.
    ///
    /// Returns the position of the new node (`parent + 1`).
    pub fn prepend(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        self.check_capacity(1)?;
        let p = parent.index();
        let weight = self.nodes[p].weight - 1;
        self.nodes[p].weight = 1;
        self.nodes.insert(p + 1, Slot { weight, value });
        Ok(NodeId::from_index(p + 1))
    }

    /// Graft a whole tree as the new last child of `parent`.
    ///
    /// Returns the position of the grafted root.
    pub fn append_tree(&mut self, parent: NodeId, tree: FlatTree<T>) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        self.check_capacity(tree.nodes.len())?;
        let p = parent.index();
        let mut grafted = tree.nodes;
        let at = if self.is_leaf(parent) {
            if let Some(last) = grafted.last_mut() {
                last.weight += self.nodes[p].weight;
            }
            self.nodes[p].weight = 1;
            p + 1
        } else {
            let (end, deep_weight) = self.span(p);
            self.nodes[end - 1].weight -= deep_weight - 1;
            if let Some(last) = grafted.last_mut() {
                last.weight += deep_weight;
            }
            end
        };
        let tail = self.nodes.split_off(at);
        self.nodes.extend(grafted);
        self.nodes.extend(tail);
        Ok(NodeId::from_index(at))
    }

    /// Remove every descendant of `node`, keeping `node` itself.
    pub fn clear_children(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.check(node)?;
        let n = node.index();
        let (end, deep_weight) = self.span(n);
        self.erase(n + 1..end);
        self.nodes[n].weight = deep_weight;
        Ok(())
    }

    /// Remove `node` together with its subtree.
    ///
    /// Returns the position that now holds whatever followed the removed
    /// subtree (possibly one past the end).
    pub fn remove(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        self.check(node)?;
        if node == NodeId::ROOT {
            return Err(TreeError::RootNotAllowed {
                operation: "remove",
            });
        }
        let n = node.index();
        let (end, deep_weight) = self.span(n);
        self.erase(n..end);
        self.nodes[n - 1].weight += deep_weight;
        Ok(node)
    }

    /// Remove `node` alone; its children take its place under its parent.
    ///
    /// Returns the position that now holds the first promoted child, or the
    /// following node when `node` was a leaf.
    pub fn skip_remove(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        self.check(node)?;
        if node == NodeId::ROOT {
            return Err(TreeError::RootNotAllowed {
                operation: "skip_remove",
            });
        }
        if self.is_leaf(node) {
            return self.remove(node);
        }
        let n = node.index();
        let (end, _) = self.span(n);
        self.nodes[end - 1].weight += 1;
        self.nodes.remove(n);
        Ok(node)
    }

    /// Replace the subtree of `target` with the subtree of `source`, which
    /// must be a strict descendant of `target`.
    ///
    /// The rest of `target`'s subtree is dropped. Returns `target`, which now
    /// holds the former `source` node.
    pub fn prune(&mut self, target: NodeId, source: NodeId) -> Result<NodeId, TreeError> {
        self.check(target)?;
        self.check(source)?;
        let t = target.index();
        let s = source.index();
        let (t_end, t_deep) = self.span(t);
        if !(t < s && s < t_end) {
            return Err(TreeError::NotADescendant {
                target,
                source_node: source,
            });
        }
        let (s_end, s_deep) = self.span(s);
        self.erase(s_end..t_end);
        self.erase(t..s);
        let last = t + (s_end - s) - 1;
        self.nodes[last].weight += t_deep - s_deep;
        Ok(target)
    }

    /// Insert a new node holding `value` at the position of `node`, making
    /// `node`'s subtree its only child.
    ///
    /// Returns the wrapper's position (the old position of `node`); the
    /// wrapped node moves to the following position.
    pub fn wrap(&mut self, node: NodeId, value: T) -> Result<NodeId, TreeError> {
        self.check(node)?;
        self.check_capacity(1)?;
        let n = node.index();
        let (end, _) = self.span(n);
        self.nodes[end - 1].weight -= 1;
        self.nodes.insert(n, Slot { weight: 1, value });
        Ok(node)
    }

    /// `(end, deep_weight)` of the subtree starting at `start`.
    fn span(&self, start: usize) -> (usize, i32) {
        let mut sum = 0;
        for (offset, slot) in self.nodes[start..].iter().enumerate() {
            sum += slot.weight;
            if sum <= 0 {
                return (start + offset + 1, sum);
            }
        }
        (self.nodes.len(), sum)
    }

    fn erase(&mut self, range: Range<usize>) {
        self.nodes.drain(range).for_each(drop);
    }

    fn check(&self, node: NodeId) -> Result<(), TreeError> {
        if node.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::NodeOutOfRange {
                node,
                len: self.nodes.len(),
            })
        }
    }

    fn check_capacity(&self, additional: usize) -> Result<(), TreeError> {
        if self.nodes.len().saturating_add(additional) > MAX_NODES {
            Err(TreeError::CapacityExceeded { max: MAX_NODES })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone> FlatTree<T> {
    /// Standalone copy of the subtree rooted at `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    pub fn from_subtree(tree: &FlatTree<T>, node: NodeId) -> FlatTree<T> {
        let (end, deep_weight) = tree.span(node.index());
        let mut nodes = tree.nodes[node.index()..end].to_vec();
        if let Some(last) = nodes.last_mut() {
            last.weight -= deep_weight + 1;
        }
        FlatTree { nodes }
    }

    /// Graft a copy of `source`'s subtree at `node` as the last child of `parent`.
    pub fn append_copy(
        &mut self,
        parent: NodeId,
        source: &FlatTree<T>,
        node: NodeId,
    ) -> Result<NodeId, TreeError> {
        source.check(node)?;
        self.append_tree(parent, FlatTree::from_subtree(source, node))
    }
}

impl<T> Index<NodeId> for FlatTree<T> {
    type Output = T;

    fn index(&self, node: NodeId) -> &T {
        &self.nodes[node.index()].value
    }
}

impl<T> IndexMut<NodeId> for FlatTree<T> {
    fn index_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.nodes[node.index()].value
    }
}

/// One line per node: a `>` per depth level, then `weight:value`.
impl<T: fmt::Display> fmt::Display for FlatTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        for slot in &self.nodes {
            let indent = ">".repeat(usize::try_from(depth).unwrap_or(0));
            writeln!(f, "{indent}{}:{}", slot.weight, slot.value)?;
            depth += slot.weight;
        }
        Ok(())
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a, T> {
    tree: &'a FlatTree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Children<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}
