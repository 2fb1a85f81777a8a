// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage registry contract.
//!
//! A stage keeps external bookkeeping about the nodes reachable from it. The
//! display-list core never owns that bookkeeping; it only pushes and pulls
//! node identities as subtrees are staged and unstaged. The bookkeeping is
//! split into three [`Collection`]s, all keyed by [`NodeId`]:
//!
//! - [`DisplayObjects`](Collection::DisplayObjects): every staged node.
//! - [`NeedsInsertion`](Collection::NeedsInsertion): nodes waiting for the
//!   next external update pass.
//! - [`Movies`](Collection::Movies): staged nodes that drive their own
//!   timeline.
//!
//! [`Registry`] is the seam; [`StageRegistry`] is a ready-made ordered-set
//! implementation.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::node::NodeId;

/// One of the registry's identity-keyed collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    /// All nodes currently reachable from an active stage.
    DisplayObjects,
    /// Nodes that require an upcoming update pass.
    NeedsInsertion,
    /// Staged nodes carrying the timeline facet.
    Movies,
}

/// Receives registry writes from the display-list core.
///
/// Both operations must be idempotent: inserting a present identity or
/// removing an absent one leaves the collection unchanged.
pub trait Registry {
    /// Adds `id` to `collection`.
    fn insert(&mut self, collection: Collection, id: NodeId);

    /// Removes `id` from `collection`.
    fn remove(&mut self, collection: Collection, id: NodeId);
}

/// A [`Registry`] backed by ordered sets.
#[derive(Clone, Debug, Default)]
pub struct StageRegistry {
    display_objects: BTreeSet<NodeId>,
    needs_insertion: BTreeSet<NodeId>,
    movies: BTreeSet<NodeId>,
}

impl StageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `id` is present in `collection`.
    #[must_use]
    pub fn contains(&self, collection: Collection, id: NodeId) -> bool {
        self.set(collection).contains(&id)
    }

    /// Returns the number of identities in `collection`.
    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        self.set(collection).len()
    }

    /// Returns whether every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.display_objects, &self.needs_insertion, &self.movies]
            .iter()
            .all(|set| set.is_empty())
    }

    /// Iterates the identities in `collection` in ascending order.
    pub fn iter(&self, collection: Collection) -> impl Iterator<Item = NodeId> + '_ {
        self.set(collection).iter().copied()
    }

    /// Drains the update queue, returning the nodes that were waiting for an
    /// update pass.
    pub fn take_needs_insertion(&mut self) -> Vec<NodeId> {
        core::mem::take(&mut self.needs_insertion).into_iter().collect()
    }

    fn set(&self, collection: Collection) -> &BTreeSet<NodeId> {
        match collection {
            Collection::DisplayObjects => &self.display_objects,
            Collection::NeedsInsertion => &self.needs_insertion,
            Collection::Movies => &self.movies,
        }
    }

    fn set_mut(&mut self, collection: Collection) -> &mut BTreeSet<NodeId> {
        match collection {
            Collection::DisplayObjects => &mut self.display_objects,
            Collection::NeedsInsertion => &mut self.needs_insertion,
            Collection::Movies => &mut self.movies,
        }
    }
}

impl Registry for StageRegistry {
    fn insert(&mut self, collection: Collection, id: NodeId) {
        self.set_mut(collection).insert(id);
    }

    fn remove(&mut self, collection: Collection, id: NodeId) {
        self.set_mut(collection).remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(idx: u32) -> NodeId {
        NodeId { idx, generation: 0 }
    }

    #[test]
    fn insert_is_idempotent() {
        let mut reg = StageRegistry::new();
        reg.insert(Collection::DisplayObjects, id(1));
        reg.insert(Collection::DisplayObjects, id(1));
        assert_eq!(reg.len(Collection::DisplayObjects), 1);
        assert!(reg.contains(Collection::DisplayObjects, id(1)));
        assert!(!reg.contains(Collection::Movies, id(1)));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut reg = StageRegistry::new();
        reg.remove(Collection::Movies, id(3));
        assert!(reg.is_empty());
    }

    #[test]
    fn take_needs_insertion_drains_queue() {
        let mut reg = StageRegistry::new();
        reg.insert(Collection::NeedsInsertion, id(2));
        reg.insert(Collection::NeedsInsertion, id(0));
        reg.insert(Collection::DisplayObjects, id(0));

        assert_eq!(reg.take_needs_insertion(), [id(0), id(2)]);
        assert_eq!(reg.len(Collection::NeedsInsertion), 0);
        assert_eq!(reg.len(Collection::DisplayObjects), 1);
    }
}
