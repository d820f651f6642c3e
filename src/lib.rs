//! # pydeps
//!
//! Module dependency graphs for Python source trees.
//!
//! pydeps walks a directory of Python sources, pulls import statements out of
//! each file with line-oriented pattern matching, promotes sibling-relative
//! imports to fully-qualified names and renders the in-tree dependencies as a
//! directed graph.
//!
//! ## Pipeline
//!
//! 1. `core::catalog` builds a `Catalog` of modules (one per source file)
//! 2. `core::resolver` rewrites relative import names
//! 3. `core::aggregator` collapses references into weighted edges
//! 4. `core::graph` produces the display graph
//! 5. `formatters` serialize it (Graphviz DOT or compact JSON)
//!
//! Imports indented under a block are "delayed": edges made only of delayed
//! imports render dashed. Modules with an entry-point guard render filled.

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use crate::config::AnalysisConfig;
pub use crate::error::{PydepsError, Result};
