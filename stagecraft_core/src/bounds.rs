// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed bounding boxes.
//!
//! A container's box is the union of its children's boxes, each offset by
//! the child's position. Leaves answer from their [`NodeKind`]: shapes have
//! an intrinsic extent, and plain nodes cannot be sized at all.
//!
//! All boxes are expressed in the coordinate space of the node being asked,
//! i.e. relative to its own position. Vacated display list slots are skipped;
//! a container with no children has the zero box.

use core::fmt;

use kurbo::Rect;

use crate::node::{NodeId, NodeKind, NodeStore};

/// One edge of an axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Minimum y.
    Top,
    /// Maximum x.
    Right,
    /// Maximum y.
    Bottom,
    /// Minimum x.
    Left,
}

impl Edge {
    /// Reads this edge from `rect`.
    #[must_use]
    pub fn of(self, rect: Rect) -> f64 {
        match self {
            Self::Top => rect.y0,
            Self::Right => rect.x1,
            Self::Bottom => rect.y1,
            Self::Left => rect.x0,
        }
    }

    /// Picks the outermost of two values along this edge.
    fn outermost(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Top | Self::Left => a.min(b),
            Self::Right | Self::Bottom => a.max(b),
        }
    }
}

/// What to compute for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComputedKey {
    /// A single extremum.
    Edge(Edge),
    /// The full box.
    Size,
}

/// The answer to a [`ComputedKey`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Computed {
    /// A single extremum.
    Edge(f64),
    /// The full box; use [`Rect::width`] and [`Rect::height`] for its size.
    Size(Rect),
}

/// Errors from bounding-box computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputeError {
    /// The node (or one of its descendants) has no sizing capability.
    CapabilityNotImplemented(NodeId),
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapabilityNotImplemented(id) => {
                write!(f, "node {id} does not implement computed sizing")
            }
        }
    }
}

impl core::error::Error for ComputeError {}

impl NodeStore {
    /// Computes `key` for a node.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::CapabilityNotImplemented`] if the node, or any
    /// node the answer depends on, is [`NodeKind::Plain`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn computed(&self, id: NodeId, key: ComputedKey) -> Result<Computed, ComputeError> {
        match key {
            ComputedKey::Edge(edge) => self.computed_edge(id, edge).map(Computed::Edge),
            ComputedKey::Size => self.computed_size(id).map(Computed::Size),
        }
    }

    /// Computes one edge of a node's box.
    ///
    /// # Errors
    ///
    /// See [`computed`](Self::computed).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn computed_edge(&self, id: NodeId, edge: Edge) -> Result<f64, ComputeError> {
        self.validate(id);
        self.edge_at(id.idx, edge)
    }

    /// Computes a node's full box.
    ///
    /// # Errors
    ///
    /// See [`computed`](Self::computed).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn computed_size(&self, id: NodeId) -> Result<Rect, ComputeError> {
        self.validate(id);
        self.size_at(id.idx)
    }

    fn edge_at(&self, idx: u32, edge: Edge) -> Result<f64, ComputeError> {
        match self.kind[idx as usize] {
            NodeKind::Plain => Err(ComputeError::CapabilityNotImplemented(self.id_at(idx))),
            NodeKind::Shape(extent) => Ok(edge.of(extent)),
            NodeKind::Group | NodeKind::Movie => {
                let mut acc: Option<f64> = None;
                for child in self.lists[idx as usize].occupied() {
                    let pos = self.position[child as usize];
                    let offset = match edge {
                        Edge::Top | Edge::Bottom => pos.y,
                        Edge::Left | Edge::Right => pos.x,
                    };
                    let value = offset + self.edge_at(child, edge)?;
                    acc = Some(acc.map_or(value, |a| edge.outermost(a, value)));
                }
                Ok(acc.unwrap_or(0.0))
            }
        }
    }

    fn size_at(&self, idx: u32) -> Result<Rect, ComputeError> {
        match self.kind[idx as usize] {
            NodeKind::Plain => Err(ComputeError::CapabilityNotImplemented(self.id_at(idx))),
            NodeKind::Shape(extent) => Ok(extent),
            NodeKind::Group | NodeKind::Movie => {
                let mut acc: Option<Rect> = None;
                for child in self.lists[idx as usize].occupied() {
                    let rect = self.size_at(child)? + self.position[child as usize].to_vec2();
                    acc = Some(acc.map_or(rect, |a| a.union(rect)));
                }
                Ok(acc.unwrap_or(Rect::ZERO))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::context::Context;
    use crate::node::RemoveStrategy;
    use crate::registry::StageRegistry;

    fn shape(store: &mut NodeStore, at: Point, extent: Rect) -> NodeId {
        let id = store.create_node(NodeKind::Shape(extent));
        store.set_position(id, at);
        id
    }

    #[test]
    fn edges_over_three_children() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let owner = store.create_node(NodeKind::Group);
        let a = shape(&mut store, Point::new(0.0, 0.0), Rect::new(0.0, 0.0, 10.0, 1.0));
        let b = shape(&mut store, Point::new(20.0, 0.0), Rect::new(0.0, 0.0, 5.0, 1.0));
        let c = shape(&mut store, Point::new(-5.0, 0.0), Rect::new(0.0, 0.0, 3.0, 1.0));
        store.add_children(owner, &[a, b, c], None, &mut cx);

        assert_eq!(store.computed_edge(owner, Edge::Left), Ok(-5.0));
        assert_eq!(store.computed_edge(owner, Edge::Right), Ok(25.0));
        assert_eq!(
            store.computed(owner, ComputedKey::Edge(Edge::Right)),
            Ok(Computed::Edge(25.0))
        );
    }

    #[test]
    fn size_folds_nested_children() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let owner = store.create_node(NodeKind::Group);
        let inner = store.create_node(NodeKind::Group);
        store.set_position(inner, Point::new(100.0, 50.0));
        let a = shape(&mut store, Point::new(-10.0, 0.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = shape(&mut store, Point::new(5.0, 5.0), Rect::new(-5.0, -5.0, 5.0, 5.0));
        store.add_child(inner, b, &mut cx);
        store.add_children(owner, &[a, inner], None, &mut cx);

        let size = store.computed_size(owner).unwrap();
        assert_eq!(size, Rect::new(-10.0, 0.0, 110.0, 60.0));
        assert_eq!(size.width(), 120.0);
        assert_eq!(size.height(), 60.0);
        assert_eq!(store.computed_edge(owner, Edge::Bottom), Ok(60.0));
        assert_eq!(store.computed_edge(owner, Edge::Top), Ok(0.0));
    }

    #[test]
    fn empty_container_is_zero() {
        let mut store = NodeStore::new();
        let owner = store.create_node(NodeKind::Movie);

        assert_eq!(store.computed_size(owner), Ok(Rect::ZERO));
        assert_eq!(store.computed_edge(owner, Edge::Left), Ok(0.0));
    }

    #[test]
    fn holes_are_skipped() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let owner = store.create_node(NodeKind::Group);
        let far = shape(&mut store, Point::new(500.0, 0.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        let near = shape(&mut store, Point::new(2.0, 3.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        store.add_children(owner, &[far, near], None, &mut cx);

        store.remove_child(owner, far, RemoveStrategy::KeepIndex, &mut cx);

        assert_eq!(store.computed_size(owner), Ok(Rect::new(2.0, 3.0, 3.0, 4.0)));
    }

    #[test]
    fn plain_node_is_unsized() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut cx = Context::new(&mut reg);
        let owner = store.create_node(NodeKind::Group);
        let plain = store.create_node(NodeKind::Plain);

        assert_eq!(
            store.computed_size(plain),
            Err(ComputeError::CapabilityNotImplemented(plain))
        );

        store.add_child(owner, plain, &mut cx);
        assert_eq!(
            store.computed_edge(owner, Edge::Top),
            Err(ComputeError::CapabilityNotImplemented(plain))
        );
    }
}
