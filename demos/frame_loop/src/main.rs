// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop driving a small scene.
//!
//! Plays the part of the container that `stagegraph_core` leaves to its
//! caller: it owns the child lists, walks the tree parent-before-child, and
//! calls `update` and `render` on every node. Along the way it animates a
//! group, masks a node, drags a sprite, hit-tests a pointer, and moves a node
//! with a looping sound off and back onto the stage. Trace and lifecycle
//! events go to a [`PrettyPrintSink`] on stdout; the final scene is written
//! as a JSON snapshot.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Rect};

use stagegraph_core::drag::DragPoint;
use stagegraph_core::event::LifecycleSink;
use stagegraph_core::filter::{Filter, ShadowFilter};
use stagegraph_core::node::{NodeId, NodeKind, NodeStore};
use stagegraph_core::render::{DrawContext, Renderer};
use stagegraph_core::sound::SoundHandle;
use stagegraph_core::trace::Tracer;

use stagegraph_debug::pretty::PrettyPrintSink;

const FRAME_COUNT: u32 = 6;

/// Owns child order and drives traversal.
struct Scene {
    store: NodeStore,
    stage: NodeId,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl Scene {
    fn new() -> Self {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        Self {
            store,
            stage,
            children: HashMap::new(),
        }
    }

    fn spawn(&mut self, kind: NodeKind, name: &str, bounds: Rect) -> NodeId {
        let id = self.store.create_node(kind);
        self.store.set_name(id, name);
        self.store.set_bounds(id, bounds);
        id
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId, events: &mut dyn LifecycleSink) {
        assert!(
            self.store.kind(parent).is_container(),
            "{} cannot hold children",
            self.store.name(parent)
        );
        self.store.attach(child, parent, events);
        self.children.entry(parent).or_default().push(child);
        let stage = self.store.stage(child);
        self.propagate_stage(child, stage, events);
    }

    fn remove_child(&mut self, child: NodeId, events: &mut dyn LifecycleSink) {
        if let Some(parent) = self.store.parent(child)
            && let Some(siblings) = self.children.get_mut(&parent)
        {
            siblings.retain(|&c| c != child);
        }
        self.store.detach(child, events);
        self.propagate_stage(child, None, events);
    }

    fn propagate_stage(
        &mut self,
        node: NodeId,
        stage: Option<NodeId>,
        events: &mut dyn LifecycleSink,
    ) {
        for child in self.children.get(&node).cloned().unwrap_or_default() {
            self.store.set_stage(child, stage, events);
            self.propagate_stage(child, stage, events);
        }
    }

    /// Pre-order walk from the stage.
    fn draw_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.stage];
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(children) = self.children.get(&node) {
                stack.extend(children.iter().rev());
            }
        }
        order
    }

    fn frame(&mut self, renderer: &mut ConsoleRenderer, sink: &mut PrettyPrintSink) {
        for node in self.draw_order() {
            self.store.enter_frame(node, sink);
            let _ = self.store.update_traced(node, &mut Tracer::new(sink));
            // Nodes serving as masks are consumed by their users, not drawn.
            if !self.store.is_used_as_mask(node) {
                let _ = self
                    .store
                    .render_traced(node, renderer, &mut Tracer::new(sink));
            }
        }
    }

    /// Returns the topmost node under a global point.
    fn pick(&self, point: Point) -> Option<NodeId> {
        self.draw_order()
            .into_iter()
            .rev()
            .filter(|&node| !self.store.is_used_as_mask(node))
            .find_map(|node| self.store.hit_test_point(node, point, true))
    }
}

/// Prints each draw call with its composed state.
#[derive(Default)]
struct ConsoleRenderer {
    ctx: DrawContext,
    draws: usize,
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, store: &NodeStore, node: NodeId) {
        let m = store.composed_matrix(node);
        let shadow = if self.ctx == DrawContext::NEUTRAL {
            String::new()
        } else {
            format!(
                " shadow(blur={} color={:#010x})",
                self.ctx.shadow_blur, self.ctx.shadow_color
            )
        };
        println!(
            "    draw {:<8} at ({:.1}, {:.1}) alpha={:.2}{shadow}",
            store.name(node),
            m.tx,
            m.ty,
            store.composed_alpha(node),
        );
        self.draws += 1;
    }

    fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.ctx
    }
}

/// A sound that only reports the signals it receives.
struct LoggingSound(&'static str);

impl SoundHandle for LoggingSound {
    fn name(&self) -> &str {
        self.0
    }
    fn resume(&mut self) {
        println!("    sound {} resume", self.0);
    }
    fn soft_stop(&mut self) {
        println!("    sound {} soft stop", self.0);
    }
    fn hard_stop(&mut self) {
        println!("    sound {} hard stop", self.0);
    }
    fn destroy(&mut self) {
        println!("    sound {} destroy", self.0);
    }
}

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).quiet_updates(true);
    let mut renderer = ConsoleRenderer::default();
    let mut scene = Scene::new();

    // -- build -------------------------------------------------------------
    let group = scene.spawn(NodeKind::Container, "group", Rect::ZERO);
    let hero = scene.spawn(NodeKind::Bitmap, "hero", Rect::new(0.0, 0.0, 64.0, 64.0));
    let label = scene.spawn(NodeKind::Text, "label", Rect::new(0.0, 0.0, 120.0, 16.0));
    let window = scene.spawn(NodeKind::Shape, "window", Rect::new(0.0, 0.0, 80.0, 80.0));

    scene.store.set_position(group, 100.0, 100.0);
    scene.store.set_alpha(group, 0.8);
    scene.store.set_filters(
        group,
        vec![Filter::Shadow(ShadowFilter {
            blur: 4.0,
            color: 0x0000_0080,
            offset_x: 2.0,
            offset_y: 2.0,
        })],
    );
    scene.store.set_anchor(hero, 32.0, 32.0);
    scene.store.set_position(label, 0.0, 70.0);
    scene.store.add_sound(label, Box::new(LoggingSound("chatter")));

    let stage = scene.stage;
    scene.add_child(group, hero, &mut pretty);
    scene.add_child(group, label, &mut pretty);
    scene.add_child(stage, group, &mut pretty);
    scene.add_child(stage, window, &mut pretty);

    // -- frames ------------------------------------------------------------
    for frame in 0..FRAME_COUNT {
        println!("frame {frame}");
        scene.store.set_rotation(hero, f64::from(frame) * 15.0);

        match frame {
            1 => {
                scene.store.set_mask(hero, Some(window));
                println!("    hero draw rect {:?}", scene.store.draw_rect(hero));
            }
            2 => {
                scene.store.start_drag(hero, DragPoint::Center, None);
                let state = scene.store.drag_state(stage).copied().unwrap_or_default();
                println!(
                    "    dragging {:?} follow={:?}",
                    state.target.map(|id| scene.store.name(id)),
                    state.follow_point
                );
            }
            3 => {
                scene.remove_child(label, &mut pretty);
                scene.store.set_width(window, 160.0);
            }
            4 => {
                scene.add_child(group, label, &mut pretty);
                scene.store.stop_drag(hero);
            }
            _ => {}
        }

        scene.frame(&mut renderer, &mut pretty);

        let pointer = Point::new(20.0, 20.0);
        let picked = scene.pick(pointer).map(|id| scene.store.name(id));
        println!("    pick {pointer:?} -> {picked:?}");
    }

    // -- snapshot ----------------------------------------------------------
    let nodes = scene.draw_order();
    let path = "frame_loop_snapshot.json";
    let file = File::create(path).expect("failed to create snapshot file");
    let mut writer = BufWriter::new(file);
    stagegraph_debug::snapshot::write_snapshot(&scene.store, &nodes, &mut writer)
        .expect("failed to write snapshot");

    // -- teardown (children before parents) --------------------------------
    scene.store.set_mask(hero, None);
    for node in nodes.into_iter().rev().filter(|&n| n != stage) {
        scene.store.destroy(node);
    }
    scene.store.destroy(stage);

    println!(
        "Wrote {path} ({FRAME_COUNT} frames, {} draws)",
        renderer.draws
    );
}
