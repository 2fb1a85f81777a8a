// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] takes the events kept by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes them as a JSON
//! array, one object per event, for inspection in external tooling.

use std::io::{self, Write};

use serde_json::{Value, json};

use stagecraft_core::node::NodeId;
use stagecraft_core::trace::StageEvent;

use crate::pretty::reason_name;
use crate::recorder::RecordedEvent;

/// Writes `events` as a JSON array.
///
/// Node handles are emitted as `{"index": .., "generation": ..}` objects.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(event_value).collect();
    serde_json::to_writer_pretty(&mut *writer, &values)?;
    writeln!(writer)
}

fn event_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Rejected(e) => json!({
            "kind": "rejected",
            "owner": node_value(e.owner),
            "node": e.node.map(node_value),
            "reason": reason_name(e.reason),
        }),
        RecordedEvent::Activated(e) => stage_value("activated", e),
        RecordedEvent::Deactivated(e) => stage_value("deactivated", e),
    }
}

fn stage_value(kind: &str, e: &StageEvent) -> Value {
    json!({
        "kind": kind,
        "subtree": node_value(e.subtree),
        "stage": node_value(e.stage),
        "changed": e.changed,
    })
}

fn node_value(id: NodeId) -> Value {
    json!({
        "index": id.index(),
        "generation": id.generation(),
    })
}
