// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage activation and deactivation.
//!
//! A node is *staged* when it is reachable from an active stage root through
//! parent links. Every staged node records which root it belongs to, and its
//! identity is present in the registry's
//! [`DisplayObjects`](Collection::DisplayObjects) collection (plus
//! [`Movies`](Collection::Movies) when it carries the timeline facet).
//!
//! Staging changes only when a subtree crosses the stage boundary. Such a
//! crossing triggers a *deep* walk over the whole subtree, which touches the
//! registry only for nodes whose stage reference actually changes. Moves that
//! stay inside one stage take the *shallow* path and only queue the moved
//! node for an update pass.

use alloc::vec;

use crate::context::Context;
use crate::node::{INVALID, NodeId, NodeStore};
use crate::registry::Collection;
use crate::trace::{RejectEvent, RejectReason, StageEvent};

impl NodeStore {
    /// Makes `root` an active stage root and stages its whole subtree.
    ///
    /// Only parentless containers can be stage roots. Attaching an existing
    /// root again is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn attach_stage(&mut self, root: NodeId, cx: &mut Context<'_>) {
        self.validate(root);
        let r = root.idx;
        let reason = if !self.kind[r as usize].is_container() {
            Some(RejectReason::NotAContainer)
        } else if self.parent[r as usize] != INVALID {
            Some(RejectReason::HasParent)
        } else {
            None
        };
        if let Some(reason) = reason {
            cx.tracer.rejected(&RejectEvent {
                owner: root,
                node: None,
                reason,
            });
            return;
        }
        if self.stage_root[r as usize] {
            return;
        }
        self.stage_root[r as usize] = true;
        self.activate_subtree(r, r, cx);
    }

    /// Deactivates the stage rooted at `root`, unstaging its whole subtree.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn detach_stage(&mut self, root: NodeId, cx: &mut Context<'_>) {
        self.validate(root);
        let r = root.idx;
        if !self.stage_root[r as usize] {
            cx.tracer.rejected(&RejectEvent {
                owner: root,
                node: None,
                reason: RejectReason::NotAStageRoot,
            });
            return;
        }
        self.stage_root[r as usize] = false;
        self.deactivate_subtree(r, cx);
    }

    /// Returns the stage root a node is currently reachable from.
    #[must_use]
    pub fn stage(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.stage[id.idx as usize])
    }

    /// Returns whether a node is currently staged.
    #[must_use]
    pub fn is_staged(&self, id: NodeId) -> bool {
        self.validate(id);
        self.stage[id.idx as usize] != INVALID
    }

    /// Returns whether a node is an active stage root.
    #[must_use]
    pub fn is_stage_root(&self, id: NodeId) -> bool {
        self.validate(id);
        self.stage_root[id.idx as usize]
    }

    /// Queues a staged node for the next update pass.
    ///
    /// Detached nodes have nothing to update; for them this is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn mark_update(&mut self, id: NodeId, cx: &mut Context<'_>) {
        self.validate(id);
        self.mark_update_at(id.idx, cx);
    }

    pub(crate) fn mark_update_at(&mut self, idx: u32, cx: &mut Context<'_>) {
        if self.stage[idx as usize] != INVALID {
            let id = self.id_at(idx);
            cx.registry.insert(Collection::NeedsInsertion, id);
        }
    }

    /// Brings a node that just moved from `old_stage` to `new_stage` (either
    /// of which may be [`INVALID`]) in line with its new position.
    pub(crate) fn restage(
        &mut self,
        idx: u32,
        old_stage: u32,
        new_stage: u32,
        cx: &mut Context<'_>,
    ) {
        if old_stage == new_stage {
            self.mark_update_at(idx, cx);
            return;
        }
        if old_stage != INVALID {
            self.deactivate_subtree(idx, cx);
        }
        if new_stage != INVALID {
            self.activate_subtree(idx, new_stage, cx);
        }
    }

    /// Stages every node in the subtree rooted at `top` under `stage`.
    pub(crate) fn activate_subtree(&mut self, top: u32, stage: u32, cx: &mut Context<'_>) {
        let mut changed = 0_u32;
        let mut stack = vec![top];
        while let Some(idx) = stack.pop() {
            if self.stage[idx as usize] != stage {
                self.stage[idx as usize] = stage;
                let id = self.id_at(idx);
                cx.registry.insert(Collection::DisplayObjects, id);
                cx.registry.insert(Collection::NeedsInsertion, id);
                if self.kind[idx as usize].has_timeline() {
                    cx.registry.insert(Collection::Movies, id);
                }
                changed += 1;
            }
            // Reversed so the walk pops children in display order.
            stack.extend(self.lists[idx as usize].occupied().rev());
        }

        cx.tracer.activated(&StageEvent {
            subtree: self.id_at(top),
            stage: self.id_at(stage),
            changed,
        });
    }

    /// Unstages every node in the subtree rooted at `top`.
    pub(crate) fn deactivate_subtree(&mut self, top: u32, cx: &mut Context<'_>) {
        let stage = self.stage[top as usize];
        let mut changed = 0_u32;
        let mut stack = vec![top];
        while let Some(idx) = stack.pop() {
            if self.stage[idx as usize] != INVALID {
                self.stage[idx as usize] = INVALID;
                let id = self.id_at(idx);
                cx.registry.remove(Collection::DisplayObjects, id);
                cx.registry.remove(Collection::NeedsInsertion, id);
                cx.registry.remove(Collection::Movies, id);
                changed += 1;
            }
            stack.extend(self.lists[idx as usize].occupied().rev());
        }

        if stage != INVALID {
            cx.tracer.deactivated(&StageEvent {
                subtree: self.id_at(top),
                stage: self.id_at(stage),
                changed,
            });
        }
    }
}
