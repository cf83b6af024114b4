// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage and the operations that act on it.
//!
//! All node state lives in a struct-of-arrays [`NodeStore`] addressed by
//! generational [`NodeId`] handles. The store's methods are split across
//! submodules by concern:
//!
//! - `store`: allocation, linkage, lifecycle, and property setters.
//! - `compose`: per-node matrix, alpha, and filter composition.
//! - `bounds`: draw rectangles, hit testing, coordinate conversion.
//! - `mask`: mask references and usage counting.
//!
//! Drag, sound, and render operations are implemented beside their own
//! types in [`crate::drag`], [`crate::sound`], and [`crate::render`].

mod bounds;
mod compose;
mod id;
mod kind;
mod local;
mod mask;
mod store;

pub use id::{INVALID, NodeId};
pub use kind::NodeKind;
pub use local::LocalTransform;
pub use store::NodeStore;
