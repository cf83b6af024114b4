// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, linkage, and property
//! management.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::dirty::DirtyChannels;
use crate::drag::DragState;
use crate::event::{LifecycleEvent, LifecycleSink};
use crate::filter::Filter;
use crate::geometry::Matrix;
use crate::sound::SoundList;

use super::id::{INVALID, NodeId};
use super::kind::NodeKind;
use super::local::LocalTransform;

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The store records each node's parent and stage but does not enumerate
/// children: ordering and traversal belong to the container driving the
/// frame loop.
#[derive(Debug)]
pub struct NodeStore {
    // -- Identity --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) name: Vec<String>,

    // -- Linkage (non-owning) --
    pub(crate) parent: Vec<u32>,
    pub(crate) stage: Vec<u32>,
    pub(crate) child_count: Vec<u32>,
    pub(crate) mask: Vec<Option<NodeId>>,
    pub(crate) mask_users: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local: Vec<LocalTransform>,
    pub(crate) alpha: Vec<f64>,
    pub(crate) visible: Vec<bool>,
    pub(crate) pointer_enabled: Vec<bool>,
    pub(crate) filters: Vec<Vec<Filter>>,
    pub(crate) bounds: Vec<Rect>,

    // -- Composed properties (written by update) --
    pub(crate) composed_matrix: Vec<Matrix>,
    pub(crate) composed_alpha: Vec<f64>,
    pub(crate) composed_filters: Vec<Vec<Filter>>,

    // -- Dirty tracking --
    pub(crate) pending: Vec<DirtyChannels>,
    pub(crate) recomputed: Vec<DirtyChannels>,
    pub(crate) structural: Vec<bool>,

    // -- Owned attachments --
    pub(crate) sounds: Vec<SoundList>,
    pub(crate) drag: Vec<Option<DragState>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: Vec::new(),
            name: Vec::new(),
            parent: Vec::new(),
            stage: Vec::new(),
            child_count: Vec::new(),
            mask: Vec::new(),
            mask_users: Vec::new(),
            local: Vec::new(),
            alpha: Vec::new(),
            visible: Vec::new(),
            pointer_enabled: Vec::new(),
            filters: Vec::new(),
            bounds: Vec::new(),
            composed_matrix: Vec::new(),
            composed_alpha: Vec::new(),
            composed_filters: Vec::new(),
            pending: Vec::new(),
            recomputed: Vec::new(),
            structural: Vec::new(),
            sounds: Vec::new(),
            drag: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // -- Allocation API --

    /// Creates a new node of the given kind and returns its handle.
    ///
    /// The node starts detached with identity transform, alpha 1, visible,
    /// pointer interaction enabled, no filters, no mask, empty bounds, and
    /// its structural flag set so the first update composes everything.
    ///
    /// Creating a [`NodeKind::Stage`] node is equivalent to
    /// [`create_stage`](Self::create_stage).
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.kind[i] = kind;
            self.name[i].clear();
            self.parent[i] = INVALID;
            self.stage[i] = INVALID;
            self.child_count[i] = 0;
            self.mask[i] = None;
            self.mask_users[i] = 0;
            self.local[i] = LocalTransform::IDENTITY;
            self.alpha[i] = 1.0;
            self.visible[i] = true;
            self.pointer_enabled[i] = true;
            self.filters[i].clear();
            self.bounds[i] = Rect::ZERO;
            self.composed_matrix[i] = Matrix::IDENTITY;
            self.composed_alpha[i] = 1.0;
            self.composed_filters[i].clear();
            self.pending[i] = DirtyChannels::NONE;
            self.recomputed[i] = DirtyChannels::NONE;
            self.structural[i] = true;
            self.sounds[i] = SoundList::new();
            self.drag[i] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.kind.push(kind);
            self.name.push(String::new());
            self.parent.push(INVALID);
            self.stage.push(INVALID);
            self.child_count.push(0);
            self.mask.push(None);
            self.mask_users.push(0);
            self.local.push(LocalTransform::IDENTITY);
            self.alpha.push(1.0);
            self.visible.push(true);
            self.pointer_enabled.push(true);
            self.filters.push(Vec::new());
            self.bounds.push(Rect::ZERO);
            self.composed_matrix.push(Matrix::IDENTITY);
            self.composed_alpha.push(1.0);
            self.composed_filters.push(Vec::new());
            self.pending.push(DirtyChannels::NONE);
            self.recomputed.push(DirtyChannels::NONE);
            self.structural.push(true);
            self.sounds.push(SoundList::new());
            self.drag.push(None);
            self.generation.push(0);
            idx
        };

        if kind == NodeKind::Stage {
            self.stage[idx as usize] = idx;
            self.drag[idx as usize] = Some(DragState::default());
        }

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a stage: a root node that is its own stage and owns the drag
    /// slot for every node attached beneath it.
    pub fn create_stage(&mut self) -> NodeId {
        self.create_node(NodeKind::Stage)
    }

    /// Destroys a node, releasing everything it references.
    ///
    /// Owned sounds are hard-stopped and destroyed, the mask reference is
    /// cleared (decrementing the mask's usage counter), filters and composed
    /// caches are released, visibility is forced off, and parent and stage
    /// links are dropped without lifecycle notifications. If the node is the
    /// active drag target of its stage, the drag is stopped. The handle and
    /// every copy of it become stale; any further use panics.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale (including a second destroy), if the
    /// node still has attached children, or if other nodes use it as their
    /// mask.
    pub fn destroy(&mut self, id: NodeId) {
        self.validate(id);
        let i = id.idx as usize;
        assert!(
            self.child_count[i] == 0,
            "cannot destroy node with attached children"
        );
        assert!(
            self.mask_users[i] == 0,
            "cannot destroy node in use as a mask"
        );

        self.sounds[i].hard_stop_all();
        self.sounds[i].destroy_all();
        self.set_mask(id, None);
        self.stop_drag(id);

        if self.parent[i] != INVALID {
            let p = self.parent[i] as usize;
            self.child_count[p] -= 1;
        }
        self.parent[i] = INVALID;
        self.stage[i] = INVALID;
        self.drag[i] = None;
        self.filters[i] = Vec::new();
        self.composed_filters[i] = Vec::new();
        self.composed_matrix[i] = Matrix::IDENTITY;
        self.composed_alpha[i] = 0.0;
        self.visible[i] = false;

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len && self.generation[id.idx as usize] == id.generation
    }

    // -- Linkage API --

    /// Attaches `child` under `parent`.
    ///
    /// Sets the parent link and the structural flag. The child inherits the
    /// parent's stage (see [`set_stage`](Self::set_stage)), firing
    /// [`LifecycleEvent::AddedToStage`] and resuming owned sounds if that
    /// puts it on a stage.
    ///
    /// Descendants of `child` are not visited; the container is responsible
    /// for calling [`set_stage`](Self::set_stage) on them.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, if
    /// `child` is a stage, or if `child == parent`.
    pub fn attach(&mut self, child: NodeId, parent: NodeId, events: &mut dyn LifecycleSink) {
        self.validate(child);
        self.validate(parent);
        let c = child.idx as usize;
        let p = parent.idx as usize;
        assert!(child != parent, "a node cannot be its own parent");
        assert!(self.kind[c] != NodeKind::Stage, "a stage cannot be attached");
        assert!(self.parent[c] == INVALID, "child already has a parent");

        self.parent[c] = parent.idx;
        self.child_count[p] += 1;
        self.structural[c] = true;

        let stage = self.raw_handle(self.stage[p]);
        self.set_stage(child, stage, events);
    }

    /// Detaches `child` from its parent.
    ///
    /// Clears the parent and stage links. If the child was on a stage, owned
    /// sounds are soft-stopped and [`LifecycleEvent::RemovedFromStage`]
    /// fires.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn detach(&mut self, child: NodeId, events: &mut dyn LifecycleSink) {
        self.validate(child);
        let c = child.idx as usize;
        assert!(self.parent[c] != INVALID, "node has no parent");

        let p = self.parent[c] as usize;
        self.child_count[p] -= 1;
        self.parent[c] = INVALID;
        self.set_stage(child, None, events);
    }

    /// Moves a node onto `stage`, off any stage (`None`), or between stages.
    ///
    /// Leaving a stage soft-stops owned sounds and fires
    /// [`LifecycleEvent::RemovedFromStage`]; joining one resumes owned sounds
    /// and fires [`LifecycleEvent::AddedToStage`]. Setting the current stage
    /// again does nothing.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `id` is itself a stage, if `stage`
    /// is not a stage node, or if `id` is not attached somewhere beneath
    /// `stage`.
    pub fn set_stage(&mut self, id: NodeId, stage: Option<NodeId>, events: &mut dyn LifecycleSink) {
        self.validate(id);
        let i = id.idx as usize;
        assert!(
            self.kind[i] != NodeKind::Stage,
            "the stage of a stage node is fixed"
        );
        let new = match stage {
            Some(s) => {
                self.validate(s);
                assert!(
                    self.kind[s.idx as usize] == NodeKind::Stage,
                    "{s:?} is not a stage"
                );
                assert!(
                    self.has_ancestor(i, s.idx),
                    "{id:?} is not attached under {s:?}"
                );
                s.idx
            }
            None => INVALID,
        };

        let old = self.stage[i];
        if old == new {
            return;
        }
        if old != INVALID {
            self.stage[i] = INVALID;
            self.sounds[i].soft_stop_all();
            events.on_lifecycle(id, LifecycleEvent::RemovedFromStage);
        }
        if new != INVALID {
            self.stage[i] = new;
            self.sounds[i].resume_all();
            events.on_lifecycle(id, LifecycleEvent::AddedToStage);
        }
    }

    /// Fires [`LifecycleEvent::EnterFrame`] for a visible node.
    pub fn enter_frame(&self, id: NodeId, events: &mut dyn LifecycleSink) {
        self.validate(id);
        if self.visible[id.idx as usize] {
            events.on_lifecycle(id, LifecycleEvent::EnterFrame);
        }
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.raw_handle(self.parent[id.idx as usize])
    }

    /// Returns the stage a node is on, if any. A stage is its own stage.
    #[must_use]
    pub fn stage(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.raw_handle(self.stage[id.idx as usize])
    }

    /// Returns whether the node is currently on a stage.
    #[must_use]
    pub fn is_on_stage(&self, id: NodeId) -> bool {
        self.validate(id);
        self.stage[id.idx as usize] != INVALID
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the name of a node (empty by default).
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Returns the local transform inputs of a node.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> LocalTransform {
        self.validate(id);
        self.local[id.idx as usize]
    }

    /// Returns the local matrix built from the current transform inputs.
    #[must_use]
    pub fn local_matrix(&self, id: NodeId) -> Matrix {
        self.validate(id);
        self.local[id.idx as usize].to_matrix()
    }

    /// Returns the local alpha of a node.
    #[must_use]
    pub fn alpha(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.alpha[id.idx as usize]
    }

    /// Returns whether the node is visible.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Returns whether the node accepts pointer interaction.
    #[must_use]
    pub fn pointer_enabled(&self, id: NodeId) -> bool {
        self.validate(id);
        self.pointer_enabled[id.idx as usize]
    }

    /// Returns the local filter list of a node.
    #[must_use]
    pub fn filters(&self, id: NodeId) -> &[Filter] {
        self.validate(id);
        &self.filters[id.idx as usize]
    }

    /// Returns the untransformed bounds of a node's content.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the composed matrix.
    ///
    /// Only valid after [`update`](Self::update) has been called.
    #[must_use]
    pub fn composed_matrix(&self, id: NodeId) -> Matrix {
        self.validate(id);
        self.composed_matrix[id.idx as usize]
    }

    /// Returns the composed alpha.
    ///
    /// Only valid after [`update`](Self::update) has been called.
    #[must_use]
    pub fn composed_alpha(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.composed_alpha[id.idx as usize]
    }

    /// Returns the composed filter list, ancestors' filters first.
    ///
    /// Only valid after [`update`](Self::update) has been called.
    #[must_use]
    pub fn composed_filters(&self, id: NodeId) -> &[Filter] {
        self.validate(id);
        &self.composed_filters[id.idx as usize]
    }

    /// Returns the channels marked by property writes since the last update.
    #[must_use]
    pub fn pending_channels(&self, id: NodeId) -> DirtyChannels {
        self.validate(id);
        self.pending[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the name of a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name.into();
    }

    /// Replaces all local transform inputs at once.
    pub fn set_local_transform(&mut self, id: NodeId, local: LocalTransform) {
        self.edit_local(id, |l| *l = local);
    }

    /// Sets the position.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        self.edit_local(id, |l| {
            l.x = x;
            l.y = y;
        });
    }

    /// Sets the horizontal position.
    pub fn set_x(&mut self, id: NodeId, x: f64) {
        self.edit_local(id, |l| l.x = x);
    }

    /// Sets the vertical position.
    pub fn set_y(&mut self, id: NodeId, y: f64) {
        self.edit_local(id, |l| l.y = y);
    }

    /// Sets both scale factors.
    pub fn set_scale(&mut self, id: NodeId, scale_x: f64, scale_y: f64) {
        self.edit_local(id, |l| {
            l.scale_x = scale_x;
            l.scale_y = scale_y;
        });
    }

    /// Sets the horizontal scale factor.
    pub fn set_scale_x(&mut self, id: NodeId, scale_x: f64) {
        self.edit_local(id, |l| l.scale_x = scale_x);
    }

    /// Sets the vertical scale factor.
    pub fn set_scale_y(&mut self, id: NodeId, scale_y: f64) {
        self.edit_local(id, |l| l.scale_y = scale_y);
    }

    /// Sets the rotation in degrees.
    pub fn set_rotation(&mut self, id: NodeId, degrees: f64) {
        self.edit_local(id, |l| l.rotation = degrees);
    }

    /// Sets both skew angles in degrees.
    pub fn set_skew(&mut self, id: NodeId, skew_x: f64, skew_y: f64) {
        self.edit_local(id, |l| {
            l.skew_x = skew_x;
            l.skew_y = skew_y;
        });
    }

    /// Sets the scale/rotation anchor.
    pub fn set_anchor(&mut self, id: NodeId, anchor_x: f64, anchor_y: f64) {
        self.edit_local(id, |l| {
            l.anchor_x = anchor_x;
            l.anchor_y = anchor_y;
        });
    }

    /// Sets the pivot offset used by specialized node kinds.
    pub fn set_pivot_offset(&mut self, id: NodeId, offset_x: f64, offset_y: f64) {
        self.edit_local(id, |l| {
            l.offset_x = offset_x;
            l.offset_y = offset_y;
        });
    }

    /// Sets the local alpha. Values outside `[0, 1]` are kept as given.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) {
        self.validate(id);
        let i = id.idx as usize;
        if self.alpha[i] != alpha {
            self.alpha[i] = alpha;
            self.pending[i].alpha = true;
        }
    }

    /// Shows or hides a node.
    ///
    /// Becoming visible again sets the structural flag, because a hidden
    /// subtree is typically skipped by the traversal and its composed state
    /// may be arbitrarily out of date.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.validate(id);
        let i = id.idx as usize;
        if self.visible[i] != visible {
            if visible {
                self.structural[i] = true;
            }
            self.visible[i] = visible;
        }
    }

    /// Enables or disables pointer interaction.
    pub fn set_pointer_enabled(&mut self, id: NodeId, enabled: bool) {
        self.validate(id);
        self.pointer_enabled[id.idx as usize] = enabled;
    }

    /// Replaces the local filter list.
    pub fn set_filters(&mut self, id: NodeId, filters: Vec<Filter>) {
        self.validate(id);
        let i = id.idx as usize;
        self.filters[i] = filters;
        self.pending[i].filters = true;
    }

    /// Sets the untransformed bounds of the node's content.
    ///
    /// Called by whoever owns the content (shape tessellation, bitmap size,
    /// text layout); the core only reads them.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.validate(id);
        self.bounds[id.idx as usize] = bounds;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Returns whether following parent links up from slot `i` reaches
    /// slot `ancestor`.
    fn has_ancestor(&self, i: usize, ancestor: u32) -> bool {
        let mut cur = self.parent[i];
        while cur != INVALID {
            if cur == ancestor {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    /// Builds a handle for a raw slot index stored in a linkage array.
    pub(crate) fn raw_handle(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| NodeId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Applies `edit` to the local transform, marking the matrix channel if
    /// anything changed.
    fn edit_local(&mut self, id: NodeId, edit: impl FnOnce(&mut LocalTransform)) {
        self.validate(id);
        let i = id.idx as usize;
        let before = self.local[i];
        edit(&mut self.local[i]);
        if self.local[i] != before {
            self.pending[i].matrix = true;
        }
    }
}
