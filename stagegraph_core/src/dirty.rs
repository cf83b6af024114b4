// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channels.
//!
//! Each node carries three independent invalidation channels, one per
//! composed property:
//!
//! - **matrix**: local transform inputs changed; the composed matrix must be
//!   rebuilt.
//! - **alpha**: local alpha changed; the composed alpha must be rebuilt.
//! - **filters**: the local filter list changed; the composed filter list
//!   must be rebuilt.
//!
//! # Propagation semantics
//!
//! All three channels are inherited. During
//! [`NodeStore::update`](crate::node::NodeStore::update) a node ORs its own
//! pending marks with the channels its parent recomputed in the parent's most
//! recent update. Channels never bleed into each other: an opacity change on
//! an ancestor leaves descendant matrices alone.
//!
//! A separate *structural* flag (set on creation, attach, reattach, and when
//! a hidden node becomes visible again) forces [`DirtyChannels::ALL`] on the
//! next update.

use core::ops::{BitOr, BitOrAssign};

/// A set of dirty channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirtyChannels {
    /// Composed matrix needs recomputation.
    pub matrix: bool,
    /// Composed alpha needs recomputation.
    pub alpha: bool,
    /// Composed filter list needs recomputation.
    pub filters: bool,
}

impl DirtyChannels {
    /// No channel dirty.
    pub const NONE: Self = Self {
        matrix: false,
        alpha: false,
        filters: false,
    };

    /// Every channel dirty.
    pub const ALL: Self = Self {
        matrix: true,
        alpha: true,
        filters: true,
    };

    /// Only the matrix channel.
    pub const MATRIX: Self = Self {
        matrix: true,
        alpha: false,
        filters: false,
    };

    /// Only the alpha channel.
    pub const ALPHA: Self = Self {
        matrix: false,
        alpha: true,
        filters: false,
    };

    /// Only the filter channel.
    pub const FILTERS: Self = Self {
        matrix: false,
        alpha: false,
        filters: true,
    };

    /// Returns `true` if no channel is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.matrix || self.alpha || self.filters)
    }
}

impl BitOr for DirtyChannels {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self {
            matrix: self.matrix || rhs.matrix,
            alpha: self.alpha || rhs.alpha,
            filters: self.filters || rhs.filters,
        }
    }
}

impl BitOrAssign for DirtyChannels {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
