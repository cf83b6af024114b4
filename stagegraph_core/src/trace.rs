// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics hooks for composition and rendering.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! traced variants of [`NodeStore::update`](crate::node::NodeStore::update)
//! and [`NodeStore::render`](crate::node::NodeStore::render) call. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.

use crate::dirty::DirtyChannels;
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the end of every node update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposeEvent {
    /// The node that was updated.
    pub node: NodeId,
    /// Channels recomputed by this update (possibly empty).
    pub channels: DirtyChannels,
}

/// Emitted when render dispatch issues a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawEvent {
    /// The node that was drawn.
    pub node: NodeId,
    /// Whether a shadow was pushed into the draw context for this call.
    pub shadowed: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from node updates and render dispatch.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called after a node update.
    fn on_compose(&mut self, e: &ComposeEvent) {
        _ = e;
    }

    /// Called after a draw call.
    fn on_draw(&mut self, e: &DrawEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ComposeEvent`].
    #[inline]
    pub fn compose(&mut self, e: &ComposeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_compose(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrawEvent`].
    #[inline]
    pub fn draw(&mut self, e: &DrawEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, NodeStore};

    fn sample_node() -> NodeId {
        NodeStore::new().create_node(NodeKind::Shape)
    }

    #[test]
    fn noop_sink_compiles() {
        let node = sample_node();
        let mut sink = NoopSink;
        sink.on_compose(&ComposeEvent {
            node,
            channels: DirtyChannels::ALL,
        });
        sink.on_draw(&DrawEvent {
            node,
            shadowed: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let node = sample_node();
        let mut tracer = Tracer::none();
        tracer.compose(&ComposeEvent {
            node,
            channels: DirtyChannels::NONE,
        });
        tracer.draw(&DrawEvent {
            node,
            shadowed: true,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            draws: Vec<bool>,
        }
        impl TraceSink for RecordingSink {
            fn on_draw(&mut self, e: &DrawEvent) {
                self.draws.push(e.shadowed);
            }
        }

        let node = sample_node();
        let mut sink = RecordingSink { draws: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.draw(&DrawEvent {
            node,
            shadowed: true,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.draws, &[true]);
    }
}
