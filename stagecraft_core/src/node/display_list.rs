// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display lists and the structural mutation protocol.
//!
//! Every container node owns one [`DisplayList`]: an ordered run of slots
//! holding the container's direct children. Lists are dense by default.
//! Removing with [`RemoveStrategy::KeepIndex`] vacates the slot instead of
//! shifting later children down, so their indices stay stable; vacated slots
//! are skipped by sibling links, iteration, bounding boxes and
//! [`clear`](NodeStore::clear), and can be squeezed out again with
//! [`compact`](NodeStore::compact).
//!
//! # Conflicts
//!
//! Structural conflicts are absorbed as no-ops and reported only to the
//! context's tracer (see [`RejectReason`]):
//!
//! - adding nothing,
//! - adding the owner itself or one of its ancestors,
//! - adding into a leaf,
//! - adding the same node twice in one call,
//! - adding an active stage root,
//! - removing a node that is not a direct child.
//!
//! Stale handles are programming errors and panic.

use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;
use crate::context::Context;
use crate::trace::{RejectEvent, RejectReason};

/// How [`NodeStore::remove_child`] treats the vacated slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemoveStrategy {
    /// Close the gap; indices of following children shift down by one.
    #[default]
    Compact,
    /// Leave a hole; indices of following children are unchanged.
    KeepIndex,
}

/// The ordered child slots of one container.
///
/// Vacated slots hold [`INVALID`].
#[derive(Clone, Debug, Default)]
pub(crate) struct DisplayList {
    pub(crate) slots: Vec<u32>,
}

impl DisplayList {
    /// Returns the slot holding `idx`.
    fn position(&self, idx: u32) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == idx)
    }

    /// Returns the first occupied slot's node, or [`INVALID`].
    pub(crate) fn first(&self) -> u32 {
        self.next_occupied(0)
    }

    /// Returns the node in the nearest occupied slot strictly before `at`.
    fn prev_occupied(&self, at: usize) -> u32 {
        self.slots[..at]
            .iter()
            .rev()
            .copied()
            .find(|&slot| slot != INVALID)
            .unwrap_or(INVALID)
    }

    /// Returns the node in the nearest occupied slot at or after `at`.
    fn next_occupied(&self, at: usize) -> u32 {
        self.slots
            .get(at..)
            .and_then(|rest| rest.iter().copied().find(|&slot| slot != INVALID))
            .unwrap_or(INVALID)
    }

    /// Returns the nodes in occupied slots, in order.
    pub(crate) fn occupied(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.slots.iter().copied().filter(|&slot| slot != INVALID)
    }
}

impl NodeStore {
    // -- Insertion --

    /// Appends `child` to the display list of `owner`.
    ///
    /// Equivalent to [`add_children`](Self::add_children) with a single node
    /// and no index.
    pub fn add_child(&mut self, owner: NodeId, child: NodeId, cx: &mut Context<'_>) {
        self.add_children(owner, &[child], None, cx);
    }

    /// Inserts `items`, in order, into the display list of `owner`.
    ///
    /// Nodes that already have a parent are first detached from it, so a
    /// node never appears in two lists. `index` is clamped to the length of
    /// the list once every incoming node has been detached; `None` appends.
    /// Afterwards the first item sits at that index and the rest follow it
    /// contiguously.
    ///
    /// If `owner` is staged, nodes arriving from outside that stage have
    /// their whole subtree activated; nodes that were already part of it are
    /// only marked for update.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn add_children(
        &mut self,
        owner: NodeId,
        items: &[NodeId],
        index: Option<usize>,
        cx: &mut Context<'_>,
    ) {
        self.validate(owner);
        for &item in items {
            self.validate(item);
        }
        if let Err((reason, node)) = self.check_insertion(owner, items) {
            cx.tracer.rejected(&RejectEvent {
                owner,
                node,
                reason,
            });
            return;
        }
        self.insert_checked(owner.idx, items, index, cx);
    }

    /// Replaces the children of `owner` with `items`.
    ///
    /// Behaves like [`clear`](Self::clear) followed by
    /// [`add_children`](Self::add_children), except that `items` is checked
    /// up front: if the insertion would be rejected, the current children
    /// are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn set_children(&mut self, owner: NodeId, items: &[NodeId], cx: &mut Context<'_>) {
        self.validate(owner);
        for &item in items {
            self.validate(item);
        }
        if items.is_empty() {
            self.clear(owner, cx);
            return;
        }
        if let Err((reason, node)) = self.check_insertion(owner, items) {
            cx.tracer.rejected(&RejectEvent {
                owner,
                node,
                reason,
            });
            return;
        }
        self.clear(owner, cx);
        self.insert_checked(owner.idx, items, None, cx);
    }

    // -- Removal --

    /// Removes `child` from the display list of `owner`.
    ///
    /// The predecessor's sibling link is rewired past `child`, and `child`
    /// loses its parent and sibling links. If `child` was staged, its whole
    /// subtree leaves the stage and `owner` is marked for update.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(
        &mut self,
        owner: NodeId,
        child: NodeId,
        strategy: RemoveStrategy,
        cx: &mut Context<'_>,
    ) {
        self.validate(owner);
        self.validate(child);
        if self.parent[child.idx as usize] != owner.idx {
            cx.tracer.rejected(&RejectEvent {
                owner,
                node: Some(child),
                reason: RejectReason::NotAChild,
            });
            return;
        }
        self.detach_child(owner.idx, child.idx, strategy, cx);
    }

    /// Removes whichever child occupies slot `index` of `owner`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_child_at(
        &mut self,
        owner: NodeId,
        index: usize,
        strategy: RemoveStrategy,
        cx: &mut Context<'_>,
    ) {
        self.validate(owner);
        let slot = self.lists[owner.idx as usize]
            .slots
            .get(index)
            .copied()
            .unwrap_or(INVALID);
        if slot == INVALID {
            cx.tracer.rejected(&RejectEvent {
                owner,
                node: None,
                reason: RejectReason::EmptySlot,
            });
            return;
        }
        self.detach_child(owner.idx, slot, strategy, cx);
    }

    /// Removes every child of `owner`, then drops any vacated slots.
    ///
    /// Each child goes through the same deactivation path as
    /// [`remove_child`](Self::remove_child).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear(&mut self, owner: NodeId, cx: &mut Context<'_>) {
        self.validate(owner);
        let slots = core::mem::take(&mut self.lists[owner.idx as usize].slots);
        let mut deactivated = false;
        for child in slots.into_iter().filter(|&slot| slot != INVALID) {
            self.parent[child as usize] = INVALID;
            self.next_sibling[child as usize] = INVALID;
            if self.stage[child as usize] != INVALID {
                self.deactivate_subtree(child, cx);
                deactivated = true;
            }
        }
        if deactivated {
            self.mark_update_at(owner.idx, cx);
        }
    }

    /// Squeezes vacated slots out of the display list of `owner`.
    ///
    /// Children keep their order and sibling links; only their indices
    /// change.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn compact(&mut self, owner: NodeId) {
        self.validate(owner);
        self.lists[owner.idx as usize]
            .slots
            .retain(|&slot| slot != INVALID);
    }

    // -- Queries --

    /// Returns the slot index of `child` within the display list of `owner`.
    ///
    /// `None` if `child` is not a direct child of `owner`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    #[must_use]
    pub fn index_of_child(&self, owner: NodeId, child: NodeId) -> Option<usize> {
        self.validate(owner);
        self.validate(child);
        if self.parent[child.idx as usize] != owner.idx {
            return None;
        }
        self.lists[owner.idx as usize].position(child.idx)
    }

    /// Returns the slots of the display list of `owner`, with `None` for
    /// vacated slots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn child_slots(&self, owner: NodeId) -> impl Iterator<Item = Option<NodeId>> + '_ {
        self.validate(owner);
        self.lists[owner.idx as usize]
            .slots
            .iter()
            .map(|&slot| self.handle(slot))
    }

    /// Returns the number of children of `owner`, not counting vacated slots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn child_count(&self, owner: NodeId) -> usize {
        self.validate(owner);
        self.lists[owner.idx as usize].occupied().count()
    }

    // -- Internal helpers --

    /// Checks that `items` may be inserted under `owner`.
    fn check_insertion(
        &self,
        owner: NodeId,
        items: &[NodeId],
    ) -> Result<(), (RejectReason, Option<NodeId>)> {
        if !self.kind[owner.idx as usize].is_container() {
            return Err((RejectReason::NotAContainer, None));
        }
        if items.is_empty() {
            return Err((RejectReason::Empty, None));
        }

        // The owner and every ancestor of it.
        let mut chain = Vec::new();
        let mut cursor = owner.idx;
        while cursor != INVALID {
            chain.push(cursor);
            cursor = self.parent[cursor as usize];
        }

        for &item in items {
            if chain.contains(&item.idx) {
                return Err((RejectReason::Cycle, Some(item)));
            }
            if self.stage_root[item.idx as usize] {
                return Err((RejectReason::StageRoot, Some(item)));
            }
        }

        let mut sorted = items.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err((RejectReason::Duplicate, Some(pair[1])));
        }
        Ok(())
    }

    /// Splices already-validated `items` into the list of `owner`.
    fn insert_checked(
        &mut self,
        owner: u32,
        items: &[NodeId],
        index: Option<usize>,
        cx: &mut Context<'_>,
    ) {
        // Detach from previous parents, remembering where each node was staged.
        let mut previous = Vec::with_capacity(items.len());
        for &item in items {
            let c = item.idx;
            previous.push(self.stage[c as usize]);
            let old_parent = self.parent[c as usize];
            if old_parent != INVALID {
                self.unlink(c, RemoveStrategy::Compact);
                if old_parent != owner {
                    self.mark_update_at(old_parent, cx);
                }
            }
        }

        let (before, after) = {
            let list = &mut self.lists[owner as usize];
            let at = index.map_or(list.slots.len(), |i| i.min(list.slots.len()));
            let tail = list.slots.split_off(at);
            list.slots.extend(items.iter().map(|item| item.idx));
            list.slots.extend(tail);
            (list.prev_occupied(at), list.next_occupied(at + items.len()))
        };

        if before != INVALID {
            self.next_sibling[before as usize] = items[0].idx;
        }
        for pair in items.windows(2) {
            self.next_sibling[pair[0].idx as usize] = pair[1].idx;
        }
        if let Some(last) = items.last() {
            self.next_sibling[last.idx as usize] = after;
        }

        let owner_stage = self.stage[owner as usize];
        for (&item, &old_stage) in items.iter().zip(&previous) {
            self.parent[item.idx as usize] = owner;
            self.restage(item.idx, old_stage, owner_stage, cx);
        }
    }

    /// Unlinks a direct child of `owner` and deactivates it if it was staged.
    fn detach_child(
        &mut self,
        owner: u32,
        child: u32,
        strategy: RemoveStrategy,
        cx: &mut Context<'_>,
    ) {
        self.unlink(child, strategy);
        if self.stage[child as usize] != INVALID {
            self.deactivate_subtree(child, cx);
            self.mark_update_at(owner, cx);
        }
    }

    /// Removes `idx` from its parent's list without touching staging state.
    fn unlink(&mut self, idx: u32, strategy: RemoveStrategy) {
        let p = self.parent[idx as usize];
        let list = &mut self.lists[p as usize];
        let Some(at) = list.position(idx) else {
            return;
        };
        match strategy {
            RemoveStrategy::Compact => {
                list.slots.remove(at);
            }
            RemoveStrategy::KeepIndex => list.slots[at] = INVALID,
        }
        let before = list.prev_occupied(at);

        if before != INVALID {
            self.next_sibling[before as usize] = self.next_sibling[idx as usize];
        }
        self.parent[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
