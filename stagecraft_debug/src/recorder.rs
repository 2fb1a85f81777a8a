// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.

use stagecraft_core::trace::{RejectEvent, StageEvent, TraceSink};

/// A recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`RejectEvent`].
    Rejected(RejectEvent),
    /// A [`StageEvent`] for a subtree joining a stage.
    Activated(StageEvent),
    /// A [`StageEvent`] for a subtree leaving a stage.
    Deactivated(StageEvent),
}

/// A [`TraceSink`] that keeps every event, in arrival order.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_rejected(&mut self, e: &RejectEvent) {
        self.events.push(RecordedEvent::Rejected(*e));
    }

    fn on_activated(&mut self, e: &StageEvent) {
        self.events.push(RecordedEvent::Activated(*e));
    }

    fn on_deactivated(&mut self, e: &StageEvent) {
        self.events.push(RecordedEvent::Deactivated(*e));
    }
}

#[cfg(test)]
mod tests {
    use stagecraft_core::context::Context;
    use stagecraft_core::node::{NodeKind, NodeStore, RemoveStrategy};
    use stagecraft_core::registry::StageRegistry;
    use stagecraft_core::trace::{RejectReason, Tracer};

    use super::*;

    #[test]
    fn records_rejections_and_stage_changes() {
        let mut store = NodeStore::new();
        let mut reg = StageRegistry::new();
        let mut rec = RecorderSink::new();
        let root = store.create_node(NodeKind::Group);
        let child = store.create_node(NodeKind::Group);
        let grandchild = store.create_node(NodeKind::Plain);

        {
            let mut cx = Context::with_tracer(&mut reg, Tracer::new(&mut rec));
            store.add_child(child, grandchild, &mut cx);
            store.attach_stage(root, &mut cx);
            store.add_child(root, child, &mut cx);
            store.add_child(child, root, &mut cx);
            store.remove_child(root, grandchild, RemoveStrategy::Compact, &mut cx);
            store.remove_child(root, child, RemoveStrategy::Compact, &mut cx);
        }

        let events = rec.events();
        assert_eq!(events.len(), 5, "got {events:?}");
        assert!(matches!(
            events[0],
            RecordedEvent::Activated(StageEvent { changed: 1, .. })
        ));
        assert_eq!(
            events[1],
            RecordedEvent::Activated(StageEvent {
                subtree: child,
                stage: root,
                changed: 2,
            })
        );
        assert!(matches!(
            events[2],
            RecordedEvent::Rejected(RejectEvent {
                reason: RejectReason::Cycle,
                ..
            })
        ));
        assert!(matches!(
            events[3],
            RecordedEvent::Rejected(RejectEvent {
                reason: RejectReason::NotAChild,
                ..
            })
        ));
        assert_eq!(
            events[4],
            RecordedEvent::Deactivated(StageEvent {
                subtree: child,
                stage: root,
                changed: 2,
            })
        );
    }

    #[test]
    fn clear_forgets_events() {
        let mut rec = RecorderSink::new();
        let mut store = NodeStore::new();
        let leaf = store.create_node(NodeKind::Plain);
        rec.on_rejected(&RejectEvent {
            owner: leaf,
            node: None,
            reason: RejectReason::NotAContainer,
        });
        assert_eq!(rec.events().len(), 1);

        rec.clear();
        assert!(rec.into_events().is_empty());
    }
}
