use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::aggregator::AggregatedEdges;
use super::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Hidden nodes anchor edges but are not declared on their own
    pub visible: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub weight: u32,
    pub dashed: bool,
}

pub type DependencyGraph = Graph<Node, Edge, Directed>;

impl Node {
    pub fn new(id: String) -> Self {
        Self {
            id,
            visible: true,
            highlighted: false,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

impl Edge {
    pub fn new(source_id: String, target_id: String, weight: u32) -> Self {
        Self {
            source_id,
            target_id,
            weight,
            dashed: false,
        }
    }

    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }
}

pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the display graph from catalog facts and aggregated edges.
    ///
    /// Every non-ignored module becomes a node, hidden when its file is empty and
    /// highlighted when it carries an entry-point marker. An edge is kept unless one
    /// of its endpoints is ignored; hidden endpoints do not drop it.
    pub fn from_analysis(
        catalog: &Catalog,
        edges: &AggregatedEdges,
        ignored: &BTreeSet<String>,
    ) -> DependencyGraph {
        let mut builder = Self::new();

        for module in catalog.iter().filter(|m| !ignored.contains(&m.name)) {
            builder.add_node(
                Node::new(module.name.clone())
                    .with_visible(!module.is_empty)
                    .with_highlighted(module.has_entry_point_marker),
            );
        }

        for edge in edges {
            if ignored.contains(&edge.source) || ignored.contains(&edge.target) {
                continue;
            }
            builder.add_edge(
                Edge::new(edge.source.clone(), edge.target.clone(), edge.weight)
                    .with_dashed(edge.is_delayed_only()),
            );
        }

        builder.build()
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.id) {
            self.graph[index] = node;
            return index;
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(id, index);
        index
    }

    pub fn add_edge(&mut self, edge: Edge) -> Option<EdgeIndex> {
        let source_idx = self.node_map.get(&edge.source_id)?;
        let target_idx = self.node_map.get(&edge.target_id)?;
        Some(self.graph.add_edge(*source_idx, *target_idx, edge))
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }

    pub fn get_node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Nodes that get their own statement, in insertion order.
pub fn visible_nodes(graph: &DependencyGraph) -> impl Iterator<Item = &Node> {
    graph.node_weights().filter(|node| node.visible)
}
