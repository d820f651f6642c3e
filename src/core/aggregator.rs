use serde::Serialize;
use std::collections::HashMap;

use super::catalog::Catalog;

/// Import references collapsed onto one (source, target) module pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
    pub has_nondelayed: bool,
    pub has_delayed: bool,
}

impl AggregatedEdge {
    fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            weight: 0,
            has_nondelayed: false,
            has_delayed: false,
        }
    }

    fn record(&mut self, delayed: bool) {
        self.weight += 1;
        if delayed {
            self.has_delayed = true;
        } else {
            self.has_nondelayed = true;
        }
    }

    /// True iff every contributing reference was delayed.
    pub fn is_delayed_only(&self) -> bool {
        self.has_delayed && !self.has_nondelayed
    }
}

/// Edges in first-discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedEdges {
    edges: Vec<AggregatedEdge>,
    #[serde(skip)]
    index: HashMap<(String, String), usize>,
}

impl AggregatedEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one reference from `source` to `target`.
    pub fn record(&mut self, source: &str, target: &str, delayed: bool) {
        let key = (source.to_string(), target.to_string());
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.edges.push(AggregatedEdge::new(source, target));
                self.index.insert(key, self.edges.len() - 1);
                self.edges.len() - 1
            }
        };
        self.edges[slot].record(delayed);
    }

    pub fn get(&self, source: &str, target: &str) -> Option<&AggregatedEdge> {
        self.index
            .get(&(source.to_string(), target.to_string()))
            .map(|&slot| &self.edges[slot])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregatedEdge> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a AggregatedEdges {
    type Item = &'a AggregatedEdge;
    type IntoIter = std::slice::Iter<'a, AggregatedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct EdgeAggregator;

impl EdgeAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Collapses every in-catalog import reference into weighted edges.
    ///
    /// References to names outside the catalog are external dependencies and are
    /// dropped.
    pub fn aggregate(&self, catalog: &Catalog) -> AggregatedEdges {
        let mut edges = AggregatedEdges::new();

        for module in catalog {
            for (target, delayed) in module.imports() {
                if catalog.contains(target) {
                    edges.record(&module.name, target, delayed);
                }
            }
        }

        edges
    }
}

impl Default for EdgeAggregator {
    fn default() -> Self {
        Self::new()
    }
}
