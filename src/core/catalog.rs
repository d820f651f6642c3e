use serde::Serialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use super::scanner::SourceTree;
use crate::config::{AnalysisConfig, DuplicatePolicy, ReadErrorPolicy};
use crate::error::{PydepsError, Result};
use crate::parsers::{ExtractedImports, ImportExtractor};

/// Last path segment that names a package's own module.
pub const PACKAGE_INIT: &str = "__init__";

/// One source file's extracted facts, keyed by its dotted name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    pub direct_imports: Vec<String>,
    pub delayed_imports: Vec<String>,
    pub is_empty: bool,
    pub has_entry_point_marker: bool,
}

impl Module {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            direct_imports: Vec::new(),
            delayed_imports: Vec::new(),
            is_empty: false,
            has_entry_point_marker: false,
        }
    }

    pub fn from_extracted(name: String, path: PathBuf, facts: ExtractedImports) -> Self {
        Self {
            name,
            path,
            direct_imports: facts.direct_imports,
            delayed_imports: facts.delayed_imports,
            is_empty: facts.is_empty,
            has_entry_point_marker: facts.has_entry_point_marker,
        }
    }

    pub fn with_direct_imports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direct_imports.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_delayed_imports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delayed_imports.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_empty(mut self, is_empty: bool) -> Self {
        self.is_empty = is_empty;
        self
    }

    pub fn with_entry_point_marker(mut self, has_marker: bool) -> Self {
        self.has_entry_point_marker = has_marker;
        self
    }

    /// Dotted name of the containing package, or `None` for a top-level module.
    pub fn package(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(package, _)| package)
    }

    /// Every raw import name, direct first then delayed, with its delayed flag.
    pub fn imports(&self) -> impl Iterator<Item = (&str, bool)> {
        self.direct_imports
            .iter()
            .map(|name| (name.as_str(), false))
            .chain(self.delayed_imports.iter().map(|name| (name.as_str(), true)))
    }
}

/// Insertion-ordered mapping from module name to module facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    modules: Vec<Module>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts a module. A module with the same name is replaced in place, keeping
    /// its original position, and returned.
    pub fn insert(&mut self, module: Module) -> Option<Module> {
        match self.index.get(&module.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.modules[slot], module)),
            None => {
                self.index.insert(module.name.clone(), self.modules.len());
                self.modules.push(module);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&slot| &self.modules[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.name.as_str())
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Module> {
        self.modules.iter_mut()
    }
}

impl FromIterator<Module> for Catalog {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for module in iter {
            catalog.insert(module);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Canonical dotted module name for `path` relative to `root`.
///
/// `pkg/sub/mod.py` becomes `pkg.sub.mod` and `pkg/__init__.py` becomes `pkg`.
/// Returns `None` when `path` is outside `root`, lacks the suffix, or names
/// nothing (a package initializer at the root itself).
pub fn module_name(root: &Path, path: &Path, suffix: &str) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts: Vec<&str> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let last = parts.pop()?;
    let stem = last.strip_suffix(suffix)?.strip_suffix('.')?;
    if stem != PACKAGE_INIT {
        parts.push(stem);
    }

    if parts.is_empty() || parts.iter().any(|part| part.is_empty()) {
        None
    } else {
        Some(parts.join("."))
    }
}

/// Walks a source tree and extracts every file into a `Catalog`
pub struct CatalogBuilder<'a, E: ImportExtractor> {
    config: &'a AnalysisConfig,
    extractor: &'a E,
}

impl<'a, E: ImportExtractor> CatalogBuilder<'a, E> {
    pub fn new(config: &'a AnalysisConfig, extractor: &'a E) -> Self {
        Self { config, extractor }
    }

    pub fn build<T: SourceTree + ?Sized>(&self, tree: &T, root: &Path) -> Result<Catalog> {
        let files = tree.source_files(root, &self.config.source_suffix)?;
        if self.config.verbose {
            eprintln!("Found {} source files", files.len());
        }

        let mut catalog = Catalog::new();

        for path in files {
            let Some(name) = module_name(root, &path, &self.config.source_suffix) else {
                eprintln!(
                    "Warning: Skipping {}: no module name can be derived from it",
                    path.display()
                );
                continue;
            };

            let source = match tree.read_source(&path) {
                Ok(source) => source,
                Err(err) if self.config.read_errors == ReadErrorPolicy::Skip => {
                    eprintln!("Warning: {err}");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut facts = self.extractor.extract(&source.text);
            facts.is_empty = source.is_empty;

            self.insert(&mut catalog, Module::from_extracted(name, path, facts))?;
        }

        Ok(catalog)
    }

    fn insert(&self, catalog: &mut Catalog, module: Module) -> Result<()> {
        if let Some(existing) = catalog.get(&module.name) {
            match self.config.duplicates {
                DuplicatePolicy::Overwrite => {}
                DuplicatePolicy::Warn => eprintln!(
                    "Warning: Module '{}' defined by both {} and {}; keeping the latter",
                    module.name,
                    existing.path.display(),
                    module.path.display()
                ),
                DuplicatePolicy::Error => {
                    return Err(PydepsError::DuplicateModuleName {
                        name: module.name,
                        first: existing.path.clone(),
                        second: module.path,
                    })
                }
            }
        }

        catalog.insert(module);
        Ok(())
    }
}
