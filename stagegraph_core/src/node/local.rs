// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local transform inputs.

use crate::geometry::Matrix;

/// The properties a node's local matrix is built from.
///
/// Angles are in degrees. The pivot offset shifts content relative to the
/// node's position; it is set by specialized node kinds (for example a text
/// node aligning its baseline) rather than by scene authors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    /// Horizontal position in the parent's space.
    pub x: f64,
    /// Vertical position in the parent's space.
    pub y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Horizontal scale/rotation origin.
    pub anchor_x: f64,
    /// Vertical scale/rotation origin.
    pub anchor_y: f64,
    /// Horizontal pivot offset.
    pub offset_x: f64,
    /// Vertical pivot offset.
    pub offset_y: f64,
}

impl LocalTransform {
    /// Position at the origin, unit scale, no rotation, skew, anchor or
    /// offset.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        skew_x: 0.0,
        skew_y: 0.0,
        anchor_x: 0.0,
        anchor_y: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Builds the local matrix.
    ///
    /// The pivot offset is added to the position and subtracted from the
    /// anchor, so the anchor stays expressed in unshifted content space.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::create_box(
            self.x + self.offset_x,
            self.y + self.offset_y,
            self.scale_x,
            self.scale_y,
            self.rotation,
            self.skew_x,
            self.skew_y,
            self.anchor_x - self.offset_x,
            self.anchor_y - self.offset_y,
        )
    }
}

impl Default for LocalTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}
