// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-list tree with stage activation and registry bookkeeping.
//!
//! `stagecraft_core` maintains a mutable tree of display nodes: containers
//! holding ordered children, which can be nested, reordered, and moved in and
//! out of an active stage. It does not draw anything. Its job is to keep the
//! parent, child and sibling structure consistent under arbitrary mutation,
//! and to keep an external [`Registry`](registry::Registry) in step with
//! which nodes are currently staged. It is `no_std` compatible (with `alloc`)
//! and uses array-based struct-of-arrays storage with index handles.
//!
//! # Architecture
//!
//! Structural edits flow down into the registry; size queries flow up from
//! the leaves:
//!
//! ```text
//!   OwnerMut / NodeStore::add_children, remove_child, clear, ...
//!       │
//!       ▼
//!   DisplayList splice ──► stage activation ──► Registry
//!                                 │
//!                                 └──────────► Tracer (diagnostics)
//!
//!   NodeStore::computed ◄── children's computed boxes ◄── leaf extents
//! ```
//!
//! **[`node`]**: Struct-of-arrays node storage with generational handles,
//! display lists, and the structural mutation protocol.
//!
//! **[`stage`]**: Deep activation and deactivation of subtrees as they cross
//! the boundary of an active stage.
//!
//! **[`registry`]**: The identity-keyed bookkeeping a stage keeps about
//! staged nodes, nodes pending update, and timeline-driving nodes.
//!
//! **[`bounds`]**: Bounding boxes aggregated over a container's children.
//!
//! **[`owner`]**: Fluent per-container editing handle.
//!
//! **[`context`]**: The explicit registry-plus-tracer bundle that every
//! mutation receives.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! observing absorbed no-ops and stage transitions, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bounds;
pub mod context;
pub mod node;
pub mod owner;
pub mod registry;
pub mod stage;
pub mod trace;
