// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications.
//!
//! The store does not own an observer registry. Operations that change a
//! node's stage membership, and [`NodeStore::enter_frame`], report through a
//! caller-supplied [`LifecycleSink`] instead.
//!
//! [`NodeStore::enter_frame`]: crate::node::NodeStore::enter_frame

use alloc::vec::Vec;

use crate::node::NodeId;

/// A lifecycle notification for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The node joined a stage.
    AddedToStage,
    /// The node left its stage.
    RemovedFromStage,
    /// A new frame is starting and the node is visible.
    EnterFrame,
}

/// Receives lifecycle notifications.
pub trait LifecycleSink {
    /// Called once per notification, in the order the store produces them.
    fn on_lifecycle(&mut self, node: NodeId, event: LifecycleEvent);
}

/// A [`LifecycleSink`] that discards all notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLifecycle;

impl LifecycleSink for NoopLifecycle {
    #[inline]
    fn on_lifecycle(&mut self, _node: NodeId, _event: LifecycleEvent) {}
}

/// Collects notifications in order.
impl LifecycleSink for Vec<(NodeId, LifecycleEvent)> {
    fn on_lifecycle(&mut self, node: NodeId, event: LifecycleEvent) {
        self.push((node, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, NodeStore};

    #[test]
    fn vec_sink_records_in_order() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = store.create_node(NodeKind::Container);
        let b = store.create_node(NodeKind::Shape);

        let mut events: Vec<(NodeId, LifecycleEvent)> = Vec::new();
        store.attach(a, stage, &mut events);
        store.enter_frame(a, &mut events);
        store.set_visible(b, false);
        store.enter_frame(b, &mut events);
        store.detach(a, &mut events);

        assert_eq!(
            events,
            [
                (a, LifecycleEvent::AddedToStage),
                (a, LifecycleEvent::EnterFrame),
                (a, LifecycleEvent::RemovedFromStage),
            ]
        );
    }
}
