// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-target pointer drag.
//!
//! Each stage owns one [`DragState`]. Starting a drag on any node beneath a
//! stage overwrites that slot, so at most one node per stage is dragged at a
//! time. Moving the target with the pointer is up to the input layer; this
//! module only records what to follow and where to clamp it.

use kurbo::{Point, Rect};

use crate::geometry::UNBOUNDED;
use crate::node::{INVALID, NodeId, NodeStore};

/// Where a dragged node is held relative to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPoint {
    /// Keep whatever offset the pointer had when the drag began.
    Free,
    /// Hold the node at the center of its draw rectangle.
    Center,
    /// Hold the node at an explicit point.
    At(Point),
}

/// The drag slot of a stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// The node being dragged, if any.
    pub target: Option<NodeId>,
    /// The point that follows the pointer when `fixed` is set.
    pub follow_point: Point,
    /// Rectangle the drag is clamped to.
    pub bounds: Rect,
    /// Whether `follow_point` is used.
    pub fixed: bool,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            target: None,
            follow_point: Point::ZERO,
            bounds: UNBOUNDED,
            fixed: false,
        }
    }
}

impl NodeStore {
    /// Makes `id` the drag target of its stage, replacing any previous one.
    ///
    /// `bounds` defaults to [`UNBOUNDED`]. Does nothing when the node is not
    /// on a stage.
    pub fn start_drag(&mut self, id: NodeId, point: DragPoint, bounds: Option<Rect>) {
        self.validate(id);
        let stage = self.stage[id.idx as usize];
        if stage == INVALID {
            return;
        }
        let (fixed, follow_point) = match point {
            DragPoint::Free => (false, Point::ZERO),
            DragPoint::Center => (true, self.draw_rect(id).center()),
            DragPoint::At(p) => (true, p),
        };
        if let Some(slot) = &mut self.drag[stage as usize] {
            *slot = DragState {
                target: Some(id),
                follow_point,
                bounds: bounds.unwrap_or(UNBOUNDED),
                fixed,
            };
        }
    }

    /// Clears the drag target of the node's stage if it is `id`.
    ///
    /// Does nothing when the node is not on a stage or another node is being
    /// dragged.
    pub fn stop_drag(&mut self, id: NodeId) {
        self.validate(id);
        let stage = self.stage[id.idx as usize];
        if stage == INVALID {
            return;
        }
        if let Some(slot) = &mut self.drag[stage as usize]
            && slot.target == Some(id)
        {
            slot.target = None;
        }
    }

    /// Returns the drag slot of a stage, or `None` if `stage` is not a
    /// stage.
    #[must_use]
    pub fn drag_state(&self, stage: NodeId) -> Option<&DragState> {
        self.validate(stage);
        self.drag[stage.idx as usize].as_ref()
    }

    /// Returns the node currently dragged on the stage that `id` belongs to.
    #[must_use]
    pub fn drag_target(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let stage = self.raw_handle(self.stage[id.idx as usize])?;
        self.drag_state(stage)?.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NoopLifecycle;
    use crate::node::NodeKind;

    fn staged(store: &mut NodeStore, stage: NodeId) -> NodeId {
        let id = store.create_node(NodeKind::Shape);
        store.attach(id, stage, &mut NoopLifecycle);
        id
    }

    #[test]
    fn fixed_point_drag_without_bounds_is_unbounded() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);

        store.start_drag(a, DragPoint::At(Point::new(5.0, 5.0)), None);
        let state = store.drag_state(stage).unwrap();
        assert_eq!(state.target, Some(a));
        assert!(state.fixed);
        assert_eq!(state.follow_point, Point::new(5.0, 5.0));
        assert_eq!(state.bounds, UNBOUNDED);
    }

    #[test]
    fn second_drag_replaces_first() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);
        let b = staged(&mut store, stage);
        let area = Rect::new(0.0, 0.0, 640.0, 480.0);

        store.start_drag(a, DragPoint::At(Point::new(5.0, 5.0)), None);
        store.start_drag(b, DragPoint::Free, Some(area));
        let state = store.drag_state(stage).unwrap();
        assert_eq!(state.target, Some(b));
        assert!(!state.fixed);
        assert_eq!(state.bounds, area);
        assert_eq!(store.drag_target(a), Some(b));
    }

    #[test]
    fn center_uses_measured_size() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);
        store.set_bounds(a, Rect::new(0.0, 0.0, 30.0, 11.0));

        store.start_drag(a, DragPoint::Center, None);
        let state = store.drag_state(stage).unwrap();
        assert!(state.fixed);
        assert_eq!(state.follow_point, Point::new(15.0, 5.5));
    }

    #[test]
    fn center_includes_draw_rect_origin() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);
        store.set_position(a, 10.0, 20.0);
        store.set_bounds(a, Rect::new(0.0, 0.0, 30.0, 11.0));

        store.start_drag(a, DragPoint::Center, None);
        let state = store.drag_state(stage).unwrap();
        assert_eq!(store.draw_rect(a), Rect::new(10.0, 20.0, 40.0, 31.0));
        assert_eq!(state.follow_point, Point::new(25.0, 25.5));
    }

    #[test]
    fn stop_only_clears_matching_target() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);
        let b = staged(&mut store, stage);

        store.start_drag(a, DragPoint::Free, None);
        store.stop_drag(b);
        assert_eq!(store.drag_target(a), Some(a));
        store.stop_drag(a);
        assert_eq!(store.drag_target(a), None);
    }

    #[test]
    fn drag_without_stage_is_a_no_op() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let loose = store.create_node(NodeKind::Shape);

        store.start_drag(loose, DragPoint::At(Point::new(1.0, 1.0)), None);
        store.stop_drag(loose);
        assert_eq!(store.drag_target(loose), None);
        assert_eq!(store.drag_state(stage), Some(&DragState::default()));
    }

    #[test]
    fn non_stage_has_no_drag_slot() {
        let mut store = NodeStore::new();
        let node = store.create_node(NodeKind::Container);
        assert!(store.drag_state(node).is_none());
    }

    #[test]
    fn destroying_target_stops_drag() {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let a = staged(&mut store, stage);
        store.start_drag(a, DragPoint::Free, None);
        store.destroy(a);
        assert_eq!(store.drag_state(stage).unwrap().target, None);
    }
}
