// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles.

use core::fmt;

/// Slot value meaning "no node" in the store's parent, stage and mask-index
/// arrays.
pub const INVALID: u32 = u32::MAX;

/// Generational handle to a node in a [`NodeStore`](super::NodeStore).
///
/// Destroying a node bumps the generation of its slot, so a handle copied
/// before the destroy no longer matches and every store call with it panics,
/// even after the slot has been handed to a new node.
///
/// Displays as `#<slot>.<generation>`, the form used in trace output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Slot index in the store. Only meaningful together with
    /// [`generation`](Self::generation).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Number of times the slot had been freed when this handle was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.idx, self.generation)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}
