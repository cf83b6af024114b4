// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON snapshots for stagegraph diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output
//!   for both [`TraceSink`](stagegraph_core::trace::TraceSink) and
//!   [`LifecycleSink`](stagegraph_core::event::LifecycleSink) events.
//! - [`snapshot`]: dumps the composed state of nodes as JSON.

pub mod pretty;
pub mod snapshot;
