// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node capability descriptions.

use kurbo::Rect;

/// What a node is able to do.
///
/// The kind is fixed when the node is created and replaces run-time probing
/// for optional capabilities: whether a node can own children, how it sizes
/// itself, and whether it drives its own timeline are all answered here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// A container that sizes itself from its children.
    Group,
    /// A container that also drives an independent timeline.
    ///
    /// While staged, movies are tracked in the registry's
    /// [`Movies`](crate::registry::Collection::Movies) collection.
    Movie,
    /// A leaf with an intrinsic extent, relative to its own position.
    Shape(Rect),
    /// A leaf with no sizing capability.
    ///
    /// Asking it for a computed box fails with
    /// [`ComputeError::CapabilityNotImplemented`](crate::bounds::ComputeError::CapabilityNotImplemented).
    Plain,
}

impl NodeKind {
    /// Returns whether nodes of this kind own a display list.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Group | Self::Movie)
    }

    /// Returns whether nodes of this kind carry the timeline facet.
    #[inline]
    #[must_use]
    pub const fn has_timeline(self) -> bool {
        matches!(self, Self::Movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets() {
        assert!(NodeKind::Group.is_container());
        assert!(!NodeKind::Group.has_timeline());
        assert!(NodeKind::Movie.is_container());
        assert!(NodeKind::Movie.has_timeline());
        assert!(!NodeKind::Shape(Rect::ZERO).is_container());
        assert!(!NodeKind::Plain.is_container());
        assert!(!NodeKind::Plain.has_timeline());
    }
}
