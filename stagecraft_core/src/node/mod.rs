// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node tree data model.
//!
//! A *node* is an element of a display tree. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//!   The same handle keys the node in a stage [registry](crate::registry).
//! - A [`NodeKind`] describing its capabilities: whether it owns a display
//!   list, how it is sized, and whether it drives a timeline.
//! - Topology: a parent link, a next-sibling link, and (for containers) a
//!   display list holding its direct children in order.
//! - A stage reference, set while the node is reachable from an active stage
//!   root (see [`stage`](crate::stage)).
//! - A position in its parent's coordinate space.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.

mod display_list;
mod id;
mod kind;
mod store;
mod traverse;

pub use display_list::RemoveStrategy;
pub use id::{INVALID, NodeId};
pub use kind::NodeKind;
pub use store::NodeStore;
pub use traverse::Children;
