// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use stagecraft_core::node::NodeId;
use stagecraft_core::trace::{RejectEvent, RejectReason, StageEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Short lowercase name of a rejection reason.
pub(crate) fn reason_name(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Empty => "empty",
        RejectReason::Cycle => "cycle",
        RejectReason::NotAContainer => "not-a-container",
        RejectReason::Duplicate => "duplicate",
        RejectReason::StageRoot => "stage-root",
        RejectReason::NotAChild => "not-a-child",
        RejectReason::EmptySlot => "empty-slot",
        RejectReason::HasParent => "has-parent",
        RejectReason::NotAStageRoot => "not-a-stage-root",
    }
}

fn node_or_dash(node: Option<NodeId>) -> String {
    node.map_or_else(|| "-".to_owned(), |n| n.to_string())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_rejected(&mut self, e: &RejectEvent) {
        let _ = writeln!(
            self.writer,
            "[rejected] owner={} node={} reason={}",
            e.owner,
            node_or_dash(e.node),
            reason_name(e.reason),
        );
    }

    fn on_activated(&mut self, e: &StageEvent) {
        let _ = writeln!(
            self.writer,
            "[stage:enter] subtree={} stage={} changed={}",
            e.subtree, e.stage, e.changed,
        );
    }

    fn on_deactivated(&mut self, e: &StageEvent) {
        let _ = writeln!(
            self.writer,
            "[stage:leave] subtree={} stage={} changed={}",
            e.subtree, e.stage, e.changed,
        );
    }
}

#[cfg(test)]
mod tests {
    use stagecraft_core::node::{NodeKind, NodeStore};

    use super::*;

    #[test]
    fn pretty_print_rejection() {
        let mut store = NodeStore::new();
        let owner = store.create_node(NodeKind::Group);
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_rejected(&RejectEvent {
            owner,
            node: None,
            reason: RejectReason::Empty,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[rejected]"), "got: {output}");
        assert!(output.contains("owner=#0.0"), "got: {output}");
        assert!(output.contains("node=-"), "got: {output}");
        assert!(output.contains("reason=empty"), "got: {output}");
    }

    #[test]
    fn pretty_print_stage_events() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::Group);
        let child = store.create_node(NodeKind::Group);
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let e = StageEvent {
            subtree: child,
            stage: root,
            changed: 3,
        };
        sink.on_activated(&e);
        sink.on_deactivated(&e);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[stage:enter] subtree=#1.0 stage=#0.0 changed=3",
                "[stage:leave] subtree=#1.0 stage=#0.0 changed=3",
            ]
        );
    }
}
