use std::fmt::Write;

use super::GraphFormatter;
use crate::core::graph::visible_nodes;
use crate::core::DependencyGraph;
use crate::error::Result;

pub const DEFAULT_GRAPH_NAME: &str = "Module Dependencies";

/// Graphviz DOT rendering of a module dependency graph
pub struct DotFormatter {
    graph_name: String,
    rankdir: &'static str,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            rankdir: "LR",
        }
    }

    pub fn with_graph_name(mut self, name: &str) -> Self {
        self.graph_name = name.to_string();
        self
    }

    pub fn with_top_to_bottom(mut self) -> Self {
        self.rankdir = "TB";
        self
    }

    fn quote(id: &str) -> String {
        let mut quoted = String::with_capacity(id.len() + 2);
        quoted.push('"');
        for c in id.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    }
}

impl GraphFormatter for DotFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "digraph {} {{", Self::quote(&self.graph_name));
        let _ = writeln!(out, "    graph [rankdir={}]", self.rankdir);

        let mut nodes = visible_nodes(graph).peekable();
        if nodes.peek().is_some() {
            out.push('\n');
        }
        for node in nodes {
            let _ = if node.highlighted {
                writeln!(out, "    {} [style=filled]", Self::quote(&node.id))
            } else {
                writeln!(out, "    {}", Self::quote(&node.id))
            };
        }

        if graph.edge_count() > 0 {
            out.push('\n');
        }
        for edge in graph.edge_weights() {
            let _ = writeln!(
                out,
                "    {} -> {} [weight={}, style={}]",
                Self::quote(&edge.source_id),
                Self::quote(&edge.target_id),
                edge.weight,
                if edge.dashed { "dashed" } else { "solid" }
            );
        }

        out.push_str("}\n");
        Ok(out)
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}
