// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node composition.
//!
//! [`NodeStore::update`] folds a node's local properties into its parent's
//! cached composed state, one dirty channel at a time:
//!
//! 1. **Channels**: the structural flag forces all three; otherwise the
//!    node's own pending marks are ORed with the channels its parent
//!    recomputed in the parent's most recent update.
//! 2. **Matrix**: `composed = parent_composed * local` (root: `local`).
//! 3. **Alpha**: `composed = parent_composed * local` (root: `local`),
//!    never clamped.
//! 4. **Filters**: `composed = parent_composed ++ local` (root: `local`).
//!
//! The parent's composed values already contain every ancestor's effect, so
//! the cost per node is constant regardless of depth. Callers must update a
//! parent before its children within a frame; nothing here enforces it.

use alloc::vec::Vec;

use crate::dirty::DirtyChannels;
use crate::trace::{ComposeEvent, Tracer};

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

impl NodeStore {
    /// Recomposes a node's matrix, alpha and filters as needed and returns
    /// the channels that were recomputed.
    ///
    /// The returned set is also what this node's children inherit on their
    /// own next update.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update(&mut self, id: NodeId) -> DirtyChannels {
        self.update_traced(id, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), reporting the recomputed channels to
    /// `tracer`.
    pub fn update_traced(&mut self, id: NodeId, tracer: &mut Tracer<'_>) -> DirtyChannels {
        self.validate(id);
        let i = id.idx as usize;
        let parent = self.parent[i];
        let has_parent = parent != INVALID;
        let p = parent as usize;

        let mut dirty = self.pending[i];
        if self.structural[i] {
            dirty = DirtyChannels::ALL;
            self.structural[i] = false;
        } else if has_parent {
            dirty |= self.recomputed[p];
        }

        if dirty.matrix {
            let local = self.local[i].to_matrix();
            self.composed_matrix[i] = if has_parent {
                self.composed_matrix[p] * local
            } else {
                local
            };
        }

        if dirty.alpha {
            self.composed_alpha[i] = if has_parent {
                self.alpha[i] * self.composed_alpha[p]
            } else {
                self.alpha[i]
            };
        }

        if dirty.filters {
            let mut composed = if has_parent {
                let inherited = &self.composed_filters[p];
                let mut v = Vec::with_capacity(inherited.len() + self.filters[i].len());
                v.extend_from_slice(inherited);
                v
            } else {
                Vec::with_capacity(self.filters[i].len())
            };
            composed.extend_from_slice(&self.filters[i]);
            self.composed_filters[i] = composed;
        }

        self.pending[i] = DirtyChannels::NONE;
        self.recomputed[i] = dirty;
        tracer.compose(&ComposeEvent {
            node: id,
            channels: dirty,
        });
        dirty
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::event::NoopLifecycle;
    use crate::filter::{Filter, ShadowFilter};
    use crate::geometry::Matrix;
    use crate::node::NodeKind;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn chain(store: &mut NodeStore, len: usize) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for i in 0..len {
            let id = store.create_node(NodeKind::Container);
            if i > 0 {
                store.attach(id, ids[i - 1], &mut NoopLifecycle);
            }
            ids.push(id);
        }
        ids
    }

    fn update_all(store: &mut NodeStore, ids: &[NodeId]) {
        for &id in ids {
            let _ = store.update(id);
        }
    }

    #[test]
    fn root_composed_equals_local() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        store.set_position(id, 10.0, 5.0);
        store.set_rotation(id, 30.0);
        store.set_alpha(id, 1.7);
        store.set_filters(id, vec![Filter::Custom(1)]);
        let _ = store.update(id);

        assert_eq!(store.composed_matrix(id), store.local_matrix(id));
        assert_eq!(store.composed_alpha(id), 1.7, "alpha is never clamped");
        assert_eq!(store.composed_filters(id), &[Filter::Custom(1)]);
    }

    #[test]
    fn child_matrix_is_parent_composed_times_local() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 3);
        store.set_position(ids[0], 10.0, 0.0);
        store.set_scale(ids[1], 2.0, 2.0);
        store.set_position(ids[2], 0.0, 5.0);
        update_all(&mut store, &ids);

        for w in ids.windows(2) {
            let expected = store.composed_matrix(w[0]) * store.local_matrix(w[1]);
            assert_eq!(store.composed_matrix(w[1]), expected);
        }
        let p = store.composed_matrix(ids[2]) * Point::new(1.0, 1.0);
        assert!(approx(p.x, 12.0) && approx(p.y, 12.0), "got {p:?}");
    }

    #[test]
    fn alpha_multiplies_down_the_tree() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 2);
        store.set_alpha(ids[0], 0.5);
        store.set_alpha(ids[1], 0.8);
        update_all(&mut store, &ids);
        assert!(approx(store.composed_alpha(ids[1]), 0.4));
    }

    #[test]
    fn filters_are_ancestor_first() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 3);
        store.set_filters(ids[0], vec![Filter::Custom(0)]);
        store.set_filters(ids[2], vec![Filter::Custom(2), Filter::Custom(3)]);
        update_all(&mut store, &ids);

        assert_eq!(store.composed_filters(ids[1]), &[Filter::Custom(0)]);
        assert_eq!(
            store.composed_filters(ids[2]),
            &[Filter::Custom(0), Filter::Custom(2), Filter::Custom(3)]
        );
    }

    #[test]
    fn first_update_recomputes_everything() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        assert_eq!(store.update(id), DirtyChannels::ALL);
        assert_eq!(store.update(id), DirtyChannels::NONE);
    }

    #[test]
    fn update_is_idempotent() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 2);
        store.set_rotation(ids[0], 15.0);
        store.set_alpha(ids[1], 0.3);
        store.set_filters(ids[1], vec![Filter::Shadow(ShadowFilter {
            blur: 2.0,
            color: 0xff00_00ff,
            offset_x: 1.0,
            offset_y: 1.0,
        })]);
        update_all(&mut store, &ids);
        let first = (
            store.composed_matrix(ids[1]),
            store.composed_alpha(ids[1]),
            store.composed_filters(ids[1]).to_vec(),
        );
        update_all(&mut store, &ids);
        let second = (
            store.composed_matrix(ids[1]),
            store.composed_alpha(ids[1]),
            store.composed_filters(ids[1]).to_vec(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn alpha_change_does_not_recompute_descendant_matrix() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 3);
        update_all(&mut store, &ids);

        store.set_alpha(ids[0], 0.5);
        let recomputed: Vec<_> = ids.iter().map(|&id| store.update(id)).collect();
        for channels in recomputed {
            assert_eq!(channels, DirtyChannels::ALPHA);
        }
        assert!(approx(store.composed_alpha(ids[2]), 0.5));
    }

    #[test]
    fn matrix_change_propagates_without_touching_alpha() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 3);
        update_all(&mut store, &ids);

        store.set_x(ids[0], 7.0);
        assert_eq!(store.update(ids[0]), DirtyChannels::MATRIX);
        assert_eq!(store.update(ids[1]), DirtyChannels::MATRIX);
        assert_eq!(store.update(ids[2]), DirtyChannels::MATRIX);
        assert_eq!(store.composed_matrix(ids[2]), Matrix::from_translation(7.0, 0.0));
    }

    #[test]
    fn filter_change_leaves_descendant_matrix_and_alpha_alone() {
        let mut store = NodeStore::new();
        let ids = chain(&mut store, 3);
        store.set_x(ids[0], 3.0);
        store.set_alpha(ids[1], 0.5);
        update_all(&mut store, &ids);

        store.set_filters(ids[0], vec![Filter::Custom(9)]);
        for &id in &ids {
            assert_eq!(store.update(id), DirtyChannels::FILTERS);
        }
        assert_eq!(store.composed_filters(ids[2]), &[Filter::Custom(9)]);
        assert_eq!(store.composed_matrix(ids[2]), Matrix::from_translation(3.0, 0.0));
        assert!(approx(store.composed_alpha(ids[2]), 0.5));
    }

    #[test]
    fn unrelated_sibling_change_is_not_inherited() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::Container);
        let a = store.create_node(NodeKind::Shape);
        let b = store.create_node(NodeKind::Shape);
        store.attach(a, root, &mut NoopLifecycle);
        store.attach(b, root, &mut NoopLifecycle);
        update_all(&mut store, &[root, a, b]);

        store.set_alpha(a, 0.1);
        update_all(&mut store, &[root, a, b]);
        assert_eq!(store.update(b), DirtyChannels::NONE);
    }

    #[test]
    fn reattach_forces_full_recomposition() {
        let mut store = NodeStore::new();
        let p1 = store.create_node(NodeKind::Container);
        let p2 = store.create_node(NodeKind::Container);
        let child = store.create_node(NodeKind::Shape);
        store.set_position(p2, 100.0, 0.0);
        store.set_alpha(p2, 0.25);
        store.attach(child, p1, &mut NoopLifecycle);
        update_all(&mut store, &[p1, p2, child]);

        store.detach(child, &mut NoopLifecycle);
        store.attach(child, p2, &mut NoopLifecycle);
        let _ = store.update(p2);
        assert_eq!(store.update(child), DirtyChannels::ALL);
        assert_eq!(store.composed_matrix(child), Matrix::from_translation(100.0, 0.0));
        assert!(approx(store.composed_alpha(child), 0.25));
    }

    #[test]
    fn becoming_visible_forces_full_recomposition() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        let _ = store.update(id);

        store.set_visible(id, false);
        assert_eq!(store.update(id), DirtyChannels::NONE, "hiding is not structural");
        store.set_visible(id, true);
        assert_eq!(store.update(id), DirtyChannels::ALL);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn update_traced_reports_channels() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Recording(Vec<DirtyChannels>);
        impl TraceSink for Recording {
            fn on_compose(&mut self, e: &ComposeEvent) {
                self.0.push(e.channels);
            }
        }

        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        let mut sink = Recording::default();
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.update_traced(id, &mut tracer);
        drop(tracer);
        assert_eq!(sink.0, vec![DirtyChannels::ALL]);
    }
}
