use petgraph::visit::EdgeRef;
use serde_json::json;

use super::GraphFormatter;
use crate::core::DependencyGraph;
use crate::error::Result;

/// JSON rendering with minimal keys
///
/// Nodes are `{"n": name, "v": visible, "h": highlighted}`; edges are
/// `[source_index, target_index, weight, dashed]` with indices into `nodes`.
pub struct JsonCompactFormatter {
    pretty: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl GraphFormatter for JsonCompactFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        let nodes: Vec<_> = graph
            .node_weights()
            .map(|node| {
                json!({
                    "n": node.id,
                    "v": u8::from(node.visible),
                    "h": u8::from(node.highlighted)
                })
            })
            .collect();

        let edges: Vec<_> = graph
            .edge_references()
            .map(|edge_ref| {
                let edge = edge_ref.weight();
                json!([
                    edge_ref.source().index(),
                    edge_ref.target().index(),
                    edge.weight,
                    u8::from(edge.dashed)
                ])
            })
            .collect();

        let visible = graph.node_weights().filter(|node| node.visible).count();

        let output = json!({
            "meta": {
                "nodes": graph.node_count(),
                "visible": visible,
                "edges": graph.edge_count(),
                "format": "compact"
            },
            "nodes": nodes,
            "edges": edges
        });

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
