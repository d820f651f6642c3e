use std::path::Path;
use std::time::Instant;

use super::aggregator::{AggregatedEdges, EdgeAggregator};
use super::catalog::{Catalog, CatalogBuilder};
use super::graph::{DependencyGraph, GraphBuilder};
use super::resolver::RelativeImportResolver;
use super::scanner::{FileScanner, SourceTree};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::parsers::python::PythonExtractor;

/// Side channel notified as the catalog takes shape.
pub trait CatalogObserver {
    fn catalog_built(&self, _catalog: &Catalog) {}
    fn catalog_resolved(&self, _catalog: &Catalog) {}
}

/// Prints the catalog as pretty JSON to stderr.
pub struct DebugDump;

impl DebugDump {
    fn dump(stage: &str, catalog: &Catalog) {
        match serde_json::to_string_pretty(catalog) {
            Ok(json) => eprintln!("{stage} catalog:\n{json}"),
            Err(err) => eprintln!("Warning: Failed to dump {stage} catalog: {err}"),
        }
    }
}

impl CatalogObserver for DebugDump {
    fn catalog_built(&self, catalog: &Catalog) {
        Self::dump("Extracted", catalog);
    }

    fn catalog_resolved(&self, catalog: &Catalog) {
        Self::dump("Resolved", catalog);
    }
}

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Catalog after relative-import resolution
    pub catalog: Catalog,
    pub edges: AggregatedEdges,
    pub graph: DependencyGraph,
}

pub struct CodebaseAnalyzer {
    config: AnalysisConfig,
    extractor: PythonExtractor,
    resolver: RelativeImportResolver,
    aggregator: EdgeAggregator,
    observer: Option<Box<dyn CatalogObserver>>,
}

impl CodebaseAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Ok(Self {
            config,
            extractor: PythonExtractor::new()?,
            resolver: RelativeImportResolver::new(),
            aggregator: EdgeAggregator::new(),
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn CatalogObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn analyze(&self, root_path: &Path) -> Result<Analysis> {
        self.analyze_tree(&FileScanner::new(), root_path)
    }

    pub fn analyze_tree<T: SourceTree + ?Sized>(
        &self,
        tree: &T,
        root_path: &Path,
    ) -> Result<Analysis> {
        let start = Instant::now();
        self.progress(format_args!("Scanning {}...", root_path.display()));

        let catalog = CatalogBuilder::new(&self.config, &self.extractor).build(tree, root_path)?;
        self.progress(format_args!("Cataloged {} modules", catalog.len()));
        if let Some(observer) = &self.observer {
            observer.catalog_built(&catalog);
        }

        let catalog = self.resolver.resolve(&catalog);
        if let Some(observer) = &self.observer {
            observer.catalog_resolved(&catalog);
        }

        let edges = self.aggregator.aggregate(&catalog);
        self.progress(format_args!("Aggregated {} edges", edges.len()));

        let graph = GraphBuilder::from_analysis(&catalog, &edges, &self.config.ignored);
        self.progress(format_args!(
            "Analysis completed in {:.2}s",
            start.elapsed().as_secs_f64()
        ));

        Ok(Analysis {
            catalog,
            edges,
            graph,
        })
    }

    fn progress(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            eprintln!("{message}");
        }
    }
}
