// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render dispatch to an external rasterizer.
//!
//! Backends implement [`Renderer`]. The core decides *whether* a node is
//! drawn and applies the one filter it understands, the drop shadow, by
//! writing it into the renderer's [`DrawContext`] around the draw call.
//! Everything else about drawing (content, remaining filters, masking) is
//! the backend's business, read from the store it is handed.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(store: &mut NodeStore, order: &[NodeId], renderer: &mut impl Renderer) {
//!     // Parent-before-child, as decided by the container.
//!     for &node in order {
//!         store.update(node);
//!         store.render(node, renderer);
//!     }
//! }
//! ```

use crate::filter::{ShadowFilter, first_shadow};
use crate::node::{NodeId, NodeStore};
use crate::trace::{DrawEvent, Tracer};

/// Mutable drawing state shared between the core and a [`Renderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawContext {
    /// Shadow blur radius.
    pub shadow_blur: f64,
    /// Shadow color as packed `0xRRGGBBAA`.
    pub shadow_color: u32,
    /// Shadow horizontal offset.
    pub shadow_offset_x: f64,
    /// Shadow vertical offset.
    pub shadow_offset_y: f64,
}

impl DrawContext {
    /// No shadow.
    pub const NEUTRAL: Self = Self {
        shadow_blur: 0.0,
        shadow_color: 0,
        shadow_offset_x: 0.0,
        shadow_offset_y: 0.0,
    };

    /// Copies a shadow's parameters into the context.
    pub fn apply_shadow(&mut self, shadow: &ShadowFilter) {
        self.shadow_blur = shadow.blur;
        self.shadow_color = shadow.color;
        self.shadow_offset_x = shadow.offset_x;
        self.shadow_offset_y = shadow.offset_y;
    }

    /// Returns every shadow field to its neutral value.
    pub fn reset_shadow(&mut self) {
        *self = Self::NEUTRAL;
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A backend that draws nodes.
pub trait Renderer {
    /// Draws one node, reading whatever it needs from `store`.
    fn draw(&mut self, store: &NodeStore, node: NodeId);

    /// Returns the context the core writes shadow parameters into.
    fn context_mut(&mut self) -> &mut DrawContext;
}

/// Holds a shadow in the renderer's context until dropped.
struct ShadowScope<'r, R: Renderer + ?Sized> {
    renderer: &'r mut R,
}

impl<'r, R: Renderer + ?Sized> ShadowScope<'r, R> {
    fn enter(renderer: &'r mut R, shadow: &ShadowFilter) -> Self {
        renderer.context_mut().apply_shadow(shadow);
        Self { renderer }
    }
}

impl<R: Renderer + ?Sized> Drop for ShadowScope<'_, R> {
    fn drop(&mut self) {
        self.renderer.context_mut().reset_shadow();
    }
}

impl NodeStore {
    /// Draws a node through `renderer` and returns whether a draw was issued.
    ///
    /// Nothing is drawn when the node is hidden or its composed alpha is
    /// zero or negative. When the composed filters contain a shadow, the
    /// first one is written into the renderer's [`DrawContext`] for the
    /// duration of the call and the context is reset afterwards, including
    /// when `draw` panics.
    ///
    /// Composed values are read as cached; call
    /// [`update`](Self::update) first.
    pub fn render<R: Renderer + ?Sized>(&self, id: NodeId, renderer: &mut R) -> bool {
        self.render_traced(id, renderer, &mut Tracer::none())
    }

    /// Like [`render`](Self::render), reporting issued draws to `tracer`.
    pub fn render_traced<R: Renderer + ?Sized>(
        &self,
        id: NodeId,
        renderer: &mut R,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.validate(id);
        let i = id.idx as usize;
        if !self.visible[i] || self.composed_alpha[i] <= 0.0 {
            return false;
        }

        let shadowed = match first_shadow(&self.composed_filters[i]) {
            Some(shadow) => {
                let mut scope = ShadowScope::enter(renderer, shadow);
                scope.renderer.draw(self, id);
                true
            }
            None => {
                renderer.draw(self, id);
                false
            }
        };
        tracer.draw(&DrawEvent { node: id, shadowed });
        true
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::event::NoopLifecycle;
    use crate::filter::Filter;
    use crate::node::NodeKind;

    const SHADOW: ShadowFilter = ShadowFilter {
        blur: 6.0,
        color: 0x3366_99ff,
        offset_x: 2.0,
        offset_y: -1.0,
    };

    #[derive(Default)]
    struct Recorder {
        ctx: DrawContext,
        draws: Vec<(NodeId, DrawContext)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, _store: &NodeStore, node: NodeId) {
            self.draws.push((node, self.ctx));
        }

        fn context_mut(&mut self) -> &mut DrawContext {
            &mut self.ctx
        }
    }

    #[test]
    fn plain_draw_leaves_context_neutral() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Bitmap);
        let _ = store.update(id);

        let mut r = Recorder::default();
        assert!(store.render(id, &mut r));
        assert_eq!(r.draws, vec![(id, DrawContext::NEUTRAL)]);
    }

    #[test]
    fn shadow_is_applied_during_draw_and_reset_after() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Text);
        store.set_filters(
            id,
            vec![
                Filter::Custom(9),
                Filter::Shadow(SHADOW),
                Filter::Shadow(ShadowFilter { blur: 1.0, ..SHADOW }),
            ],
        );
        let _ = store.update(id);

        let mut r = Recorder::default();
        assert!(store.render(id, &mut r));
        let (_, during) = r.draws[0];
        assert_eq!(during.shadow_blur, 6.0);
        assert_eq!(during.shadow_color, 0x3366_99ff);
        assert_eq!(during.shadow_offset_x, 2.0);
        assert_eq!(during.shadow_offset_y, -1.0);
        assert_eq!(r.ctx, DrawContext::NEUTRAL);
    }

    #[test]
    fn inherited_shadow_applies_to_children() {
        let mut store = NodeStore::new();
        let parent = store.create_node(NodeKind::Container);
        let child = store.create_node(NodeKind::Shape);
        store.set_filters(parent, vec![Filter::Shadow(SHADOW)]);
        store.attach(child, parent, &mut NoopLifecycle);
        let _ = store.update(parent);
        let _ = store.update(child);

        let mut r = Recorder::default();
        let _ = store.render(child, &mut r);
        assert_eq!(r.draws[0].1.shadow_blur, 6.0);
    }

    #[test]
    fn hidden_or_transparent_nodes_are_skipped() {
        let mut store = NodeStore::new();
        let hidden = store.create_node(NodeKind::Shape);
        let clear = store.create_node(NodeKind::Shape);
        let negative = store.create_node(NodeKind::Shape);
        store.set_visible(hidden, false);
        store.set_alpha(clear, 0.0);
        store.set_alpha(negative, -0.5);
        for id in [hidden, clear, negative] {
            let _ = store.update(id);
        }

        let mut r = Recorder::default();
        assert!(!store.render(hidden, &mut r));
        assert!(!store.render(clear, &mut r));
        assert!(!store.render(negative, &mut r));
        assert!(r.draws.is_empty());
    }

    #[test]
    fn context_is_reset_when_draw_panics() {
        struct Exploding {
            ctx: DrawContext,
        }

        impl Renderer for Exploding {
            fn draw(&mut self, _store: &NodeStore, _node: NodeId) {
                panic!("backend failure");
            }

            fn context_mut(&mut self) -> &mut DrawContext {
                &mut self.ctx
            }
        }

        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::Shape);
        store.set_filters(id, vec![Filter::Shadow(SHADOW)]);
        let _ = store.update(id);

        let mut r = Exploding {
            ctx: DrawContext::NEUTRAL,
        };
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.render(id, &mut r)
        }));
        assert!(result.is_err());
        assert_eq!(r.ctx, DrawContext::NEUTRAL);
    }

    #[test]
    fn renders_through_trait_object() {
        let mut store = NodeStore::new();
        let id = store.create_node(NodeKind::MovieClip);
        let _ = store.update(id);

        let mut r = Recorder::default();
        let dyn_renderer: &mut dyn Renderer = &mut r;
        assert!(store.render(id, dyn_renderer));
        assert_eq!(r.draws.len(), 1);
    }
}
