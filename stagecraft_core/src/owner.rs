// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent access to one container's children.

use alloc::vec::Vec;

use crate::bounds::{Computed, ComputeError, ComputedKey};
use crate::context::Context;
use crate::node::{NodeId, NodeStore, RemoveStrategy};

/// A container node bound to a store and a mutation context.
///
/// Created by [`NodeStore::owner`]. Mutating methods return `&mut Self` so
/// edits can be chained; [`children`](Self::children),
/// [`index_of_child`](Self::index_of_child) and
/// [`computed`](Self::computed) return data.
///
/// ```
/// use stagecraft_core::context::Context;
/// use stagecraft_core::node::{NodeKind, NodeStore};
/// use stagecraft_core::registry::StageRegistry;
///
/// let mut store = NodeStore::new();
/// let mut registry = StageRegistry::new();
/// let mut cx = Context::new(&mut registry);
///
/// let root = store.create_node(NodeKind::Group);
/// let a = store.create_node(NodeKind::Group);
/// let b = store.create_node(NodeKind::Group);
///
/// let mut owner = store.owner(root, &mut cx);
/// owner.add_child(a).add_children(&[b], Some(0));
/// assert_eq!(owner.children(), [b, a]);
/// ```
#[derive(Debug)]
pub struct OwnerMut<'s, 'a> {
    store: &'s mut NodeStore,
    cx: &'s mut Context<'a>,
    owner: NodeId,
}

impl NodeStore {
    /// Binds `owner` to this store and `cx` for fluent editing.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn owner<'s, 'a>(
        &'s mut self,
        owner: NodeId,
        cx: &'s mut Context<'a>,
    ) -> OwnerMut<'s, 'a> {
        self.validate(owner);
        OwnerMut {
            store: self,
            cx,
            owner,
        }
    }
}

impl OwnerMut<'_, '_> {
    /// Returns the bound container.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.owner
    }

    /// See [`NodeStore::add_child`].
    pub fn add_child(&mut self, child: NodeId) -> &mut Self {
        self.store.add_child(self.owner, child, self.cx);
        self
    }

    /// See [`NodeStore::add_children`].
    pub fn add_children(&mut self, items: &[NodeId], index: Option<usize>) -> &mut Self {
        self.store.add_children(self.owner, items, index, self.cx);
        self
    }

    /// Removes `child`, closing the gap it leaves.
    pub fn remove_child(&mut self, child: NodeId) -> &mut Self {
        self.remove_child_with(child, RemoveStrategy::Compact)
    }

    /// See [`NodeStore::remove_child`].
    pub fn remove_child_with(&mut self, child: NodeId, strategy: RemoveStrategy) -> &mut Self {
        self.store.remove_child(self.owner, child, strategy, self.cx);
        self
    }

    /// See [`NodeStore::set_children`].
    pub fn set_children(&mut self, items: &[NodeId]) -> &mut Self {
        self.store.set_children(self.owner, items, self.cx);
        self
    }

    /// See [`NodeStore::clear`].
    pub fn clear(&mut self) -> &mut Self {
        self.store.clear(self.owner, self.cx);
        self
    }

    /// Returns the current children, in display order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        self.store.children(self.owner).collect()
    }

    /// See [`NodeStore::index_of_child`].
    #[must_use]
    pub fn index_of_child(&self, child: NodeId) -> Option<usize> {
        self.store.index_of_child(self.owner, child)
    }

    /// See [`NodeStore::computed`].
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::CapabilityNotImplemented`] if the container
    /// holds an unsized node.
    pub fn computed(&self, key: ComputedKey) -> Result<Computed, ComputeError> {
        self.store.computed(self.owner, key)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;
    use crate::bounds::Edge;
    use crate::node::NodeKind;
    use crate::registry::{Collection, StageRegistry};

    #[test]
    fn chained_edits() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let root = store.create_node(NodeKind::Group);
        let [a, b, c] = core::array::from_fn(|_| store.create_node(NodeKind::Group));

        let mut owner = store.owner(root, &mut cx);
        owner
            .add_children(&[a, b, c], None)
            .remove_child(b)
            .add_child(b);

        assert_eq!(owner.children(), [a, c, b]);
        assert_eq!(owner.index_of_child(b), Some(2));
        assert_eq!(owner.id(), root);

        owner.set_children(&[c]);
        assert_eq!(owner.children(), [c]);

        owner.clear();
        assert!(owner.children().is_empty());
    }

    #[test]
    fn edits_reach_the_registry() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let root = store.create_node(NodeKind::Group);
        let movie = store.create_node(NodeKind::Movie);
        store.attach_stage(root, &mut cx);

        store.owner(root, &mut cx).add_child(movie);
        assert!(reg.contains(Collection::Movies, movie));

        let mut cx = Context::new(&mut reg);
        store
            .owner(root, &mut cx)
            .remove_child_with(movie, RemoveStrategy::KeepIndex);
        assert!(!reg.contains(Collection::Movies, movie));
        assert_eq!(store.child_slots(root).collect::<Vec<_>>(), [None]);
    }

    #[test]
    fn computed_forwards() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let root = store.create_node(NodeKind::Group);
        let dot = store.create_node(NodeKind::Shape(Rect::new(0.0, 0.0, 2.0, 2.0)));
        store.set_position(dot, Point::new(1.0, 1.0));

        let mut owner = store.owner(root, &mut cx);
        owner.add_child(dot);
        assert_eq!(
            owner.computed(ComputedKey::Edge(Edge::Right)),
            Ok(Computed::Edge(3.0))
        );
        assert_eq!(
            owner.computed(ComputedKey::Size),
            Ok(Computed::Size(Rect::new(1.0, 1.0, 3.0, 3.0)))
        );
    }
}
