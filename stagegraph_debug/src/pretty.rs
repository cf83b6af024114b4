// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and [`LifecycleSink`] and
//! writes one line per event to a [`Write`](std::io::Write) destination
//! (default: stderr).

use std::io::Write;

use stagegraph_core::dirty::DirtyChannels;
use stagegraph_core::event::{LifecycleEvent, LifecycleSink};
use stagegraph_core::node::NodeId;
use stagegraph_core::trace::{ComposeEvent, DrawEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    quiet_updates: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet_updates", &self.quiet_updates)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet_updates: false,
        }
    }

    /// Skips compose lines for updates that recomputed nothing.
    #[must_use]
    pub fn quiet_updates(mut self, quiet: bool) -> Self {
        self.quiet_updates = quiet;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn channel_names(channels: DirtyChannels) -> String {
    if channels.is_empty() {
        return "-".to_owned();
    }
    let mut names = Vec::with_capacity(3);
    if channels.matrix {
        names.push("matrix");
    }
    if channels.alpha {
        names.push("alpha");
    }
    if channels.filters {
        names.push("filters");
    }
    names.join("|")
}

fn lifecycle_name(event: LifecycleEvent) -> &'static str {
    match event {
        LifecycleEvent::AddedToStage => "added",
        LifecycleEvent::RemovedFromStage => "removed",
        LifecycleEvent::EnterFrame => "enter-frame",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_compose(&mut self, e: &ComposeEvent) {
        if self.quiet_updates && e.channels.is_empty() {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[compose] node={} channels={}",
            e.node,
            channel_names(e.channels),
        );
    }

    fn on_draw(&mut self, e: &DrawEvent) {
        let shadow = if e.shadowed { " shadow" } else { "" };
        let _ = writeln!(self.writer, "[draw] node={}{shadow}", e.node);
    }
}

impl<W: Write> LifecycleSink for PrettyPrintSink<W> {
    fn on_lifecycle(&mut self, node: NodeId, event: LifecycleEvent) {
        let _ = writeln!(
            self.writer,
            "[lifecycle] node={node} {}",
            lifecycle_name(event),
        );
    }
}
