// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation context.

use crate::registry::Registry;
use crate::trace::Tracer;

/// The collaborators a structural mutation may touch.
///
/// Every mutating [`NodeStore`](crate::node::NodeStore) operation takes a
/// `Context` rather than reaching for shared state: the registry of the stage
/// being edited, and a [`Tracer`] for diagnostics.
pub struct Context<'a> {
    pub(crate) registry: &'a mut dyn Registry,
    pub(crate) tracer: Tracer<'a>,
}

impl<'a> Context<'a> {
    /// Creates a context that writes to `registry` and discards trace events.
    #[must_use]
    pub fn new(registry: &'a mut dyn Registry) -> Self {
        Self {
            registry,
            tracer: Tracer::none(),
        }
    }

    /// Creates a context that writes to `registry` and reports to `tracer`.
    #[must_use]
    pub fn with_tracer(registry: &'a mut dyn Registry, tracer: Tracer<'a>) -> Self {
        Self { registry, tracer }
    }
}

impl core::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}
