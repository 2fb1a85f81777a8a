// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for display-list mutations.
//!
//! Structural conflicts (adding an ancestor, removing a non-child, ...) are
//! absorbed as no-ops and never reported through return values. This module
//! provides the side channel for observing them: a [`TraceSink`] trait with
//! per-event methods that default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Why a mutation was absorbed as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// A bulk add was given no nodes.
    Empty,
    /// The node is the owner itself or one of its ancestors.
    Cycle,
    /// The owner cannot hold children.
    NotAContainer,
    /// The same node appears more than once in a bulk add.
    Duplicate,
    /// The node is an active stage root and cannot be nested.
    StageRoot,
    /// The node is not a direct child of the owner.
    NotAChild,
    /// No child occupies the requested index.
    EmptySlot,
    /// A stage can only be rooted at a parentless node.
    HasParent,
    /// The node is not an active stage root.
    NotAStageRoot,
}

/// Emitted when a mutation is absorbed as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectEvent {
    /// The owner whose display list was targeted.
    pub owner: NodeId,
    /// The offending node, if the rejection concerns a specific one.
    pub node: Option<NodeId>,
    /// Why the mutation was rejected.
    pub reason: RejectReason,
}

/// Emitted after a deep activation or deactivation walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageEvent {
    /// Top of the subtree that was walked.
    pub subtree: NodeId,
    /// The stage root the subtree joined or left.
    pub stage: NodeId,
    /// Number of nodes whose stage reference changed.
    pub changed: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from display-list mutations.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a mutation is absorbed as a no-op.
    fn on_rejected(&mut self, e: &RejectEvent) {
        _ = e;
    }

    /// Called after a subtree joined a stage.
    fn on_activated(&mut self, e: &StageEvent) {
        _ = e;
    }

    /// Called after a subtree left a stage.
    fn on_deactivated(&mut self, e: &StageEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RejectEvent`].
    #[inline]
    pub fn rejected(&mut self, e: &RejectEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an activation [`StageEvent`].
    #[inline]
    pub fn activated(&mut self, e: &StageEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_activated(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a deactivation [`StageEvent`].
    #[inline]
    pub fn deactivated(&mut self, e: &StageEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_deactivated(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reject() -> RejectEvent {
        RejectEvent {
            owner: NodeId {
                idx: 0,
                generation: 0,
            },
            node: None,
            reason: RejectReason::Empty,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_rejected(&sample_reject());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.rejected(&sample_reject());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            reasons: Vec<RejectReason>,
        }
        impl TraceSink for RecordingSink {
            fn on_rejected(&mut self, e: &RejectEvent) {
                self.reasons.push(e.reason);
            }
        }

        let mut sink = RecordingSink {
            reasons: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.rejected(&sample_reject());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.reasons, &[RejectReason::Empty]);
    }
}
