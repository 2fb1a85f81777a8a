// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation and property access.

use alloc::vec::Vec;

use kurbo::Point;

use super::display_list::DisplayList;
use super::id::{INVALID, NodeId};
use super::kind::NodeKind;
use super::traverse::Children;

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The store owns node storage; each container's [`DisplayList`] owns the
/// ordering of that container's children. Parent and sibling links are plain
/// slot indices, so no node ever holds a strong reference to another.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) lists: Vec<DisplayList>,

    // -- Staging --
    pub(crate) stage: Vec<u32>,
    pub(crate) stage_root: Vec<bool>,

    // -- Properties --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) position: Vec<Point>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            next_sibling: Vec::new(),
            lists: Vec::new(),
            stage: Vec::new(),
            stage_root: Vec::new(),
            kind: Vec::new(),
            position: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // -- Allocation API --

    /// Creates a new, detached node and returns its handle.
    ///
    /// The node starts at the origin with no parent, no children, and no
    /// stage.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.lists[idx as usize] = DisplayList::default();
            self.stage[idx as usize] = INVALID;
            self.stage_root[idx as usize] = false;
            self.kind[idx as usize] = kind;
            self.position[idx as usize] = Point::ORIGIN;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.next_sibling.push(INVALID);
            self.lists.push(DisplayList::default());
            self.stage.push(INVALID);
            self.stage_root.push(false);
            self.kind.push(kind);
            self.position.push(Point::ORIGIN);
            self.generation.push(0);
            idx
        };

        self.id_at(idx)
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or if the node is still attached to a
    /// parent, still has children, or is still staged (remove or detach it
    /// first).
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx as usize;
        assert!(
            self.parent[idx] == INVALID,
            "cannot destroy node that has a parent"
        );
        assert!(
            self.lists[idx].first() == INVALID,
            "cannot destroy node with children"
        );
        assert!(self.stage[idx] == INVALID, "cannot destroy staged node");

        // Bump generation so old handles immediately fail validation.
        self.generation[idx] += 1;
        self.lists[idx] = DisplayList::default();
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology queries --

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.parent[id.idx as usize])
    }

    /// Returns the next sibling of a node, if any.
    ///
    /// `None` for the last child of a display list and for detached nodes.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.next_sibling[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node, in display
    /// order.
    ///
    /// The iterator follows sibling links, so vacated slots are never
    /// yielded. Leaves always yield nothing.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.lists[id.idx as usize].first())
    }

    /// Returns the handles of all live nodes without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.id_at(idx));
            }
        }
        roots
    }

    // -- Properties --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the position of a node within its parent's coordinate space.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Sets the position of a node within its parent's coordinate space.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.validate(id);
        self.position[id.idx as usize] = position;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds the current handle for a live slot.
    #[inline]
    pub(crate) fn id_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Like [`id_at`](Self::id_at), mapping [`INVALID`] to `None`.
    #[inline]
    pub(crate) fn handle(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| self.id_at(idx))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Group);
        assert!(store.is_alive(id));
        store.destroy_node(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = NodeStore::new();
        let id1 = store.create_node(NodeKind::Plain);
        store.destroy_node(id1);
        let id2 = store.create_node(NodeKind::Group);
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(store.kind(id2), NodeKind::Group);
    }

    #[test]
    fn new_node_is_detached() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape(Rect::new(0.0, 0.0, 4.0, 4.0)));
        assert_eq!(store.parent(id), None);
        assert_eq!(store.next_sibling(id), None);
        assert_eq!(store.position(id), Point::ORIGIN);
        assert!(store.children(id).next().is_none());
    }

    #[test]
    fn set_position_round_trips() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Plain);
        store.set_position(id, Point::new(3.0, -2.0));
        assert_eq!(store.position(id), Point::new(3.0, -2.0));
    }

    #[test]
    fn roots_skip_freed_slots() {
        let mut store = NodeStore::new();
        let a = store.create_node(NodeKind::Group);
        let b = store.create_node(NodeKind::Group);
        store.destroy_node(b);

        assert_eq!(store.roots(), [a]);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_parent() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Group);
        store.destroy_node(id);
        let _ = store.parent(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_position() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Group);
        store.destroy_node(id);
        store.set_position(id, Point::ORIGIN);
    }
}
