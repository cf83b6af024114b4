// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw rectangles, measured size, hit testing, and coordinate conversion.

use kurbo::{Point, Rect};

use crate::geometry::contains_inclusive;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

impl NodeStore {
    /// Returns the node's bounds mapped through its local matrix, as an
    /// axis-aligned rectangle in the parent's space.
    ///
    /// When a mask is set, the result is clamped against the mask's own draw
    /// rectangle: the origin is the larger of the two origins and the size
    /// is the smaller of the two sizes. This is an axis-aligned
    /// approximation, not a true intersection of rotated rectangles.
    ///
    /// The local matrix is built from the current transform inputs, so the
    /// result reflects property writes made since the last update.
    #[must_use]
    pub fn draw_rect(&self, id: NodeId) -> Rect {
        self.validate(id);
        let i = id.idx as usize;
        let rect = self.local[i].to_matrix().transform_rect_bbox(self.bounds[i]);
        match self.mask[i] {
            Some(mask) => {
                let clip = self.draw_rect(mask);
                Rect::from_origin_size(
                    (rect.x0.max(clip.x0), rect.y0.max(clip.y0)),
                    (rect.width().min(clip.width()), rect.height().min(clip.height())),
                )
            }
            None => rect,
        }
    }

    /// Returns the width of the node's draw rectangle.
    #[must_use]
    pub fn width(&self, id: NodeId) -> f64 {
        self.draw_rect(id).width()
    }

    /// Returns the height of the node's draw rectangle.
    #[must_use]
    pub fn height(&self, id: NodeId) -> f64 {
        self.draw_rect(id).height()
    }

    /// Scales the node horizontally so its draw rectangle is `width` wide.
    ///
    /// Does nothing unless both `width` and the current measured width are
    /// strictly positive.
    pub fn set_width(&mut self, id: NodeId, width: f64) {
        let measured = self.width(id);
        if width > 0.0 && measured > 0.0 {
            let scale_x = self.local[id.idx as usize].scale_x * (width / measured);
            self.set_scale_x(id, scale_x);
        }
    }

    /// Scales the node vertically so its draw rectangle is `height` tall.
    ///
    /// Does nothing unless both `height` and the current measured height are
    /// strictly positive.
    pub fn set_height(&mut self, id: NodeId, height: f64) {
        let measured = self.height(id);
        if height > 0.0 && measured > 0.0 {
            let scale_y = self.local[id.idx as usize].scale_y * (height / measured);
            self.set_scale_y(id, scale_y);
        }
    }

    /// Tests whether `point` falls on this node's content.
    ///
    /// Returns `None` when the node is hidden or does not accept pointer
    /// interaction. A global point is first mapped through the inverse of
    /// the composed matrix; a local one is used as given. The point is then
    /// shifted by the pivot offset and tested, edges inclusive, against the
    /// untransformed bounds.
    ///
    /// Only this node is tested. Walking children is up to the container.
    #[must_use]
    pub fn hit_test_point(&self, id: NodeId, point: Point, is_global: bool) -> Option<NodeId> {
        self.validate(id);
        let i = id.idx as usize;
        if !self.visible[i] || !self.pointer_enabled[i] {
            return None;
        }
        let local = if is_global {
            self.global_to_local(id, point)
        } else {
            point
        };
        let p = Point::new(
            local.x + self.local[i].offset_x,
            local.y + self.local[i].offset_y,
        );
        contains_inclusive(self.bounds[i], p).then_some(id)
    }

    /// Maps a global point into this node's space using the inverse of its
    /// composed matrix.
    #[must_use]
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Point {
        self.validate(id);
        self.composed_matrix[id.idx as usize]
            .invert()
            .transform_point(point)
    }

    /// Maps a point to global space.
    ///
    /// With a parent, the point is taken to be in the parent's space and is
    /// mapped by the parent's composed matrix; without one, by the node's own
    /// composed matrix. This is intentionally not the inverse of
    /// [`global_to_local`](Self::global_to_local) for parented nodes.
    #[must_use]
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Point {
        self.validate(id);
        let i = id.idx as usize;
        let parent = self.parent[i];
        let matrix = if parent != INVALID {
            self.composed_matrix[parent as usize]
        } else {
            self.composed_matrix[i]
        };
        matrix.transform_point(point)
    }
}
