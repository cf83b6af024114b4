// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node kinds.

/// What a node draws.
///
/// The core composes and dispatches every kind the same way; the kind only
/// tells a [`Renderer`](crate::render::Renderer) which content to rasterize
/// and tells containers which nodes may own children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Vector shape.
    #[default]
    Shape,
    /// Grouping node with children.
    Container,
    /// Raster image.
    Bitmap,
    /// Text block.
    Text,
    /// Timeline-driven container whose frames are loaded externally.
    MovieClip,
    /// Scene root owning the drag slot. Created with
    /// [`NodeStore::create_stage`](super::NodeStore::create_stage).
    Stage,
}

impl NodeKind {
    /// Returns `true` for kinds that may own children.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Container | Self::MovieClip | Self::Stage)
    }
}
