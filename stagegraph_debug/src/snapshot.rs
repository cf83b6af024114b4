// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of composed node state.
//!
//! Each node becomes one object holding its identity, linkage, local
//! appearance, and the values cached by its last update. Snapshots are meant
//! for diffing between frames and for attaching to bug reports; there is no
//! reader.

use std::io::{self, Write};

use serde_json::{Value, json};

use stagegraph_core::filter::Filter;
use stagegraph_core::geometry::Matrix;
use stagegraph_core::node::{NodeId, NodeStore};

/// Describes one node as a JSON object.
///
/// # Panics
///
/// Panics if the handle is stale.
#[must_use]
pub fn node_json(store: &NodeStore, id: NodeId) -> Value {
    let rect = store.draw_rect(id);
    json!({
        "id": id.index(),
        "generation": id.generation(),
        "name": store.name(id),
        "kind": format!("{:?}", store.kind(id)),
        "parent": store.parent(id).map(NodeId::index),
        "stage": store.stage(id).map(NodeId::index),
        "visible": store.visible(id),
        "alpha": store.alpha(id),
        "composed_alpha": store.composed_alpha(id),
        "composed_matrix": matrix_json(store.composed_matrix(id)),
        "draw_rect": [rect.x0, rect.y0, rect.x1, rect.y1],
        "filters": store.composed_filters(id).iter().map(filter_name).collect::<Vec<_>>(),
        "mask": store.mask(id).map(NodeId::index),
        "mask_users": store.mask_use_count(id),
        "sounds": store.sounds(id).len(),
    })
}

/// Describes the given nodes, in order, as a JSON array.
#[must_use]
pub fn snapshot(store: &NodeStore, nodes: &[NodeId]) -> Value {
    Value::Array(nodes.iter().map(|&id| node_json(store, id)).collect())
}

/// Writes a pretty-printed snapshot of `nodes` to `writer`.
pub fn write_snapshot(store: &NodeStore, nodes: &[NodeId], writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &snapshot(store, nodes))?;
    writeln!(writer)
}

fn matrix_json(m: Matrix) -> Value {
    json!([m.a, m.b, m.c, m.d, m.tx, m.ty])
}

fn filter_name(filter: &Filter) -> &'static str {
    match filter {
        Filter::Shadow(_) => "shadow",
        Filter::Blur { .. } => "blur",
        Filter::Glow { .. } => "glow",
        Filter::ColorMatrix(_) => "color-matrix",
        Filter::Custom(_) => "custom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use stagegraph_core::event::NoopLifecycle;
    use stagegraph_core::filter::ShadowFilter;
    use stagegraph_core::node::NodeKind;

    fn scene() -> (NodeStore, NodeId, NodeId) {
        let mut store = NodeStore::new();
        let stage = store.create_stage();
        let sprite = store.create_node(NodeKind::Bitmap);
        store.set_name(sprite, "hero");
        store.set_bounds(sprite, Rect::new(0.0, 0.0, 10.0, 20.0));
        store.set_position(sprite, 5.0, 5.0);
        store.set_alpha(sprite, 0.5);
        store.set_filters(
            sprite,
            vec![Filter::Shadow(ShadowFilter {
                blur: 1.0,
                color: 0xff,
                offset_x: 0.0,
                offset_y: 0.0,
            })],
        );
        store.attach(sprite, stage, &mut NoopLifecycle);
        let _ = store.update(stage);
        let _ = store.update(sprite);
        (store, stage, sprite)
    }

    #[test]
    fn node_json_reports_composed_state() {
        let (store, stage, sprite) = scene();
        let v = node_json(&store, sprite);
        assert_eq!(v["name"], "hero");
        assert_eq!(v["kind"], "Bitmap");
        assert_eq!(v["parent"], stage.index());
        assert_eq!(v["stage"], stage.index());
        assert_eq!(v["composed_alpha"], 0.5);
        assert_eq!(v["composed_matrix"], json!([1.0, 0.0, 0.0, 1.0, 5.0, 5.0]));
        assert_eq!(v["draw_rect"], json!([5.0, 5.0, 15.0, 25.0]));
        assert_eq!(v["filters"], json!(["shadow"]));
        assert_eq!(v["mask"], Value::Null);
    }

    #[test]
    fn write_snapshot_produces_valid_json() {
        let (store, stage, sprite) = scene();
        let mut out = Vec::new();
        write_snapshot(&store, &[stage, sprite], &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let nodes = parsed.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["kind"], "Stage");
        assert_eq!(nodes[0]["parent"], Value::Null);
    }
}
