// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sounds owned by a node.
//!
//! Playback itself lives outside the core. A node holds a [`SoundList`] of
//! boxed [`SoundHandle`]s and forwards lifecycle signals to them:
//!
//! | Transition           | Signal                           |
//! |----------------------|----------------------------------|
//! | joins a stage        | [`resume`](SoundHandle::resume)  |
//! | leaves a stage       | [`soft_stop`](SoundHandle::soft_stop) |
//! | `stop_all_sounds`    | [`hard_stop`](SoundHandle::hard_stop) |
//! | destroyed            | `hard_stop`, then [`destroy`](SoundHandle::destroy) |

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::node::{NodeId, NodeStore};

/// A playable sound owned by a node.
pub trait SoundHandle {
    /// Name used for lookup and removal.
    fn name(&self) -> &str;
    /// Continues playback after a soft stop.
    fn resume(&mut self);
    /// Pauses playback so it can be resumed later.
    fn soft_stop(&mut self);
    /// Stops playback for good.
    fn hard_stop(&mut self);
    /// Releases the sound's resources.
    fn destroy(&mut self);
}

/// Selects sounds in a [`SoundList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundQuery<'a> {
    /// Every sound with this name.
    Name(&'a str),
    /// The sound at this position, if any.
    Index(usize),
}

impl<'a> From<&'a str> for SoundQuery<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for SoundQuery<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered list of owned sound handles.
#[derive(Default)]
pub struct SoundList {
    handles: Vec<Box<dyn SoundHandle>>,
}

impl fmt::Debug for SoundList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handles.iter().map(|h| h.name()))
            .finish()
    }
}

impl SoundList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Returns the number of sounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if the list holds no sounds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Appends a sound.
    pub fn push(&mut self, sound: Box<dyn SoundHandle>) {
        self.handles.push(sound);
    }

    /// Iterates the sounds in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SoundHandle> {
        self.handles.iter().map(|h| &**h)
    }

    /// Returns the sounds matching `query`, in list order.
    ///
    /// An index past the end yields an empty result.
    #[must_use]
    pub fn find<'q>(&self, query: impl Into<SoundQuery<'q>>) -> Vec<&dyn SoundHandle> {
        match query.into() {
            SoundQuery::Name(name) => self.iter().filter(|h| h.name() == name).collect(),
            SoundQuery::Index(index) => self.handles.get(index).map(|h| &**h).into_iter().collect(),
        }
    }

    /// Removes the sounds matching `query` and returns them in list order.
    ///
    /// Removed handles receive no signal; the caller decides what to do with
    /// them. Missing names and out-of-range indices remove nothing.
    pub fn remove<'q>(&mut self, query: impl Into<SoundQuery<'q>>) -> Vec<Box<dyn SoundHandle>> {
        match query.into() {
            SoundQuery::Name(name) => {
                let (removed, kept): (Vec<_>, Vec<_>) = core::mem::take(&mut self.handles)
                    .into_iter()
                    .partition(|h| h.name() == name);
                self.handles = kept;
                removed
            }
            SoundQuery::Index(index) if index < self.handles.len() => {
                alloc::vec![self.handles.remove(index)]
            }
            SoundQuery::Index(_) => Vec::new(),
        }
    }

    /// Sends [`SoundHandle::resume`] to every sound.
    pub fn resume_all(&mut self) {
        self.handles.iter_mut().for_each(|h| h.resume());
    }

    /// Sends [`SoundHandle::soft_stop`] to every sound.
    pub fn soft_stop_all(&mut self) {
        self.handles.iter_mut().for_each(|h| h.soft_stop());
    }

    /// Sends [`SoundHandle::hard_stop`] to every sound.
    pub fn hard_stop_all(&mut self) {
        self.handles.iter_mut().for_each(|h| h.hard_stop());
    }

    /// Destroys and drops every sound, leaving the list empty.
    pub fn destroy_all(&mut self) {
        for mut h in self.handles.drain(..) {
            h.destroy();
        }
    }
}

impl NodeStore {
    /// Appends a sound to the node's list.
    ///
    /// The sound receives no signal on insertion, even if the node is
    /// already on a stage.
    pub fn add_sound(&mut self, id: NodeId, sound: Box<dyn SoundHandle>) {
        self.validate(id);
        self.sounds[id.idx as usize].push(sound);
    }

    /// Returns the node's sound list.
    #[must_use]
    pub fn sounds(&self, id: NodeId) -> &SoundList {
        self.validate(id);
        &self.sounds[id.idx as usize]
    }

    /// Looks up sounds by name or index. See [`SoundList::find`].
    #[must_use]
    pub fn find_sounds<'q>(
        &self,
        id: NodeId,
        query: impl Into<SoundQuery<'q>>,
    ) -> Vec<&dyn SoundHandle> {
        self.sounds(id).find(query)
    }

    /// Removes sounds by name or index. See [`SoundList::remove`].
    pub fn remove_sounds<'q>(
        &mut self,
        id: NodeId,
        query: impl Into<SoundQuery<'q>>,
    ) -> Vec<Box<dyn SoundHandle>> {
        self.validate(id);
        self.sounds[id.idx as usize].remove(query)
    }

    /// Hard-stops every sound the node owns. The sounds stay attached.
    pub fn stop_all_sounds(&mut self, id: NodeId) {
        self.validate(id);
        self.sounds[id.idx as usize].hard_stop_all();
    }
}
