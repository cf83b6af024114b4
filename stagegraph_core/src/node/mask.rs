// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mask references and their usage counters.
//!
//! A node may name another node as its mask. The mask keeps a count of how
//! many nodes currently reference it; a node with a nonzero count cannot be
//! destroyed.

use super::id::NodeId;
use super::store::NodeStore;

impl NodeStore {
    /// Sets or clears the mask of `id`.
    ///
    /// Replacing a mask releases the previous one. Setting the current mask
    /// again changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `mask == Some(id)`, or if `id` is
    /// already reachable by following mask links from `mask`.
    pub fn set_mask(&mut self, id: NodeId, mask: Option<NodeId>) {
        self.validate(id);
        if let Some(m) = mask {
            self.validate(m);
            assert!(m != id, "a node cannot mask itself");
            // Existing mask links are acyclic, so this walk terminates.
            let mut next = self.mask[m.idx as usize];
            while let Some(n) = next {
                assert!(n != id, "mask cycle: {m:?} is already masked through {id:?}");
                next = self.mask[n.idx as usize];
            }
        }
        let i = id.idx as usize;
        let old = self.mask[i];
        if old == mask {
            return;
        }
        if let Some(old) = old {
            let users = &mut self.mask_users[old.idx as usize];
            *users = users.saturating_sub(1);
        }
        if let Some(new) = mask {
            self.mask_users[new.idx as usize] += 1;
        }
        self.mask[i] = mask;
    }

    /// Returns the mask of a node, if any.
    #[must_use]
    pub fn mask(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.mask[id.idx as usize]
    }

    /// Returns how many nodes currently use `id` as their mask.
    #[must_use]
    pub fn mask_use_count(&self, id: NodeId) -> u32 {
        self.validate(id);
        self.mask_users[id.idx as usize]
    }

    /// Returns whether any node uses `id` as its mask.
    #[must_use]
    pub fn is_used_as_mask(&self, id: NodeId) -> bool {
        self.mask_use_count(id) > 0
    }
}
