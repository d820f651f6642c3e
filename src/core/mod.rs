pub mod aggregator;
pub mod analyzer;
pub mod catalog;
pub mod graph;
pub mod resolver;
pub mod scanner;

pub use aggregator::{AggregatedEdge, AggregatedEdges, EdgeAggregator};
pub use analyzer::{Analysis, CatalogObserver, CodebaseAnalyzer, DebugDump};
pub use catalog::{module_name, Catalog, CatalogBuilder, Module};
pub use graph::{DependencyGraph, Edge, GraphBuilder, Node};
pub use resolver::{RelativeImportResolver, Rewrite};
pub use scanner::{FileScanner, SourceText, SourceTree};
