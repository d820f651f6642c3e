pub mod python;

use serde::{Deserialize, Serialize};

/// Facts pulled out of a single source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImports {
    /// Top-level imports, in line order, as written
    pub direct_imports: Vec<String>,
    /// Indented imports, in line order, as written
    pub delayed_imports: Vec<String>,
    /// True iff the file had zero bytes
    pub is_empty: bool,
    pub has_entry_point_marker: bool,
}

pub trait ImportExtractor {
    fn extract(&self, source: &str) -> ExtractedImports;
}
