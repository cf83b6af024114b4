// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node model for a retained-mode 2D scene graph.
//!
//! `stagegraph_core` stores every scene element (shape, bitmap, text,
//! container, movie clip, stage) in a struct-of-arrays
//! [`NodeStore`](node::NodeStore) addressed by generational handles. Each
//! node composes its local transform, alpha, and filters with its parent's
//! cached composed state, recomputing only the channels that changed, so the
//! per-node cost of a frame does not depend on tree depth. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! The core does not own children or decide traversal order. An external
//! container walks the tree parent-before-child and calls into the store:
//!
//! ```text
//!   Container (owns children, decides order)
//!       │ attach / detach / set_stage ──► LifecycleSink
//!       ▼
//!   NodeStore::update() ──► composed matrix / alpha / filters
//!       │
//!       ▼
//!   NodeStore::render() ──► Renderer::draw()   (shadow via DrawContext)
//! ```
//!
//! **[`node`]**: Node storage, linkage, property setters, composition,
//! draw rectangles, hit testing, coordinate conversion, and masks.
//!
//! **[`dirty`]**: The three independent dirty channels (matrix, alpha,
//! filters) and how they propagate.
//!
//! **[`geometry`]**: The [`Matrix`](geometry::Matrix) type and rectangle
//! helpers over `kurbo` points and rectangles.
//!
//! **[`filter`]**: Filter descriptors; only the drop shadow is interpreted.
//!
//! **[`drag`]**: Single-target drag state owned by each stage.
//!
//! **[`sound`]**: Sound handles owned by a node and driven by its stage
//! membership.
//!
//! **[`render`]**: The [`Renderer`](render::Renderer) trait that backends
//! implement, and shadow-scoped render dispatch.
//!
//! **[`event`]**: Lifecycle notifications (added to or removed from stage,
//! enter frame).
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! update and render instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod drag;
pub mod event;
pub mod filter;
pub mod geometry;
pub mod node;
pub mod render;
pub mod sound;
pub mod trace;
