use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_SOURCE_SUFFIX: &str = "py";

/// What to do when a discovered source file cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadErrorPolicy {
    /// Abort the whole run
    #[default]
    Fail,
    /// Warn and continue with the next file
    Skip,
}

/// What to do when two files canonicalize to the same module name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Last one wins, silently
    #[default]
    Overwrite,
    /// Last one wins, with a warning
    Warn,
    /// Fail with `PydepsError::DuplicateModuleName`
    Error,
}

/// Run configuration handed to `CodebaseAnalyzer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// File-name suffix (without the dot) of source files
    pub source_suffix: String,
    /// Module names excluded from the rendered graph
    pub ignored: BTreeSet<String>,
    pub verbose: bool,
    pub read_errors: ReadErrorPolicy,
    pub duplicates: DuplicatePolicy,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self {
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            ignored: BTreeSet::new(),
            verbose: false,
            read_errors: ReadErrorPolicy::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_source_suffix(mut self, suffix: &str) -> Self {
        self.source_suffix = suffix.trim_start_matches('.').to_string();
        self
    }

    /// Adds ignored module names, dropping blank entries.
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored.extend(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty()),
        );
        self
    }

    /// Parses a comma-separated ignore list such as `"a,b,"`.
    pub fn with_ignore_list(self, list: &str) -> Self {
        self.with_ignored(list.split(','))
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_read_errors(mut self, policy: ReadErrorPolicy) -> Self {
        self.read_errors = policy;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
