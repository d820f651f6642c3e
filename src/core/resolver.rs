//! Promotion of sibling-relative import names to fully-qualified module names.
//!
//! A module `pkg.sub.mod` importing `helper` is rewritten to import
//! `pkg.sub.helper` when that module exists in the catalog. Only one level is
//! attempted: an import that would need walking further up the package tree is
//! left untouched.

use std::collections::{HashMap, HashSet};

use super::catalog::{Catalog, Module};

/// Replace every occurrence of `from` in `module`'s import lists with `to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub module: String,
    pub from: String,
    pub to: String,
}

pub struct RelativeImportResolver;

impl RelativeImportResolver {
    pub fn new() -> Self {
        Self
    }

    /// Read-only pass: every rewrite the catalog calls for, in catalog order.
    pub fn plan(&self, catalog: &Catalog) -> Vec<Rewrite> {
        let mut rewrites: Vec<Rewrite> = Vec::new();

        for module in catalog {
            let Some(package) = module.package() else {
                continue;
            };

            let mut seen: HashSet<&str> = HashSet::new();
            for (raw, _) in module.imports() {
                if !seen.insert(raw) {
                    continue;
                }
                let candidate = format!("{package}.{raw}");
                if catalog.contains(&candidate) {
                    rewrites.push(Rewrite {
                        module: module.name.clone(),
                        from: raw.to_string(),
                        to: candidate,
                    });
                }
            }
        }

        rewrites
    }

    /// Applies `rewrites` to a copy of `catalog`.
    ///
    /// Each import name is looked up once against its module's rewrites, so a
    /// name produced by one rewrite is never rewritten again.
    pub fn apply(&self, catalog: &Catalog, rewrites: &[Rewrite]) -> Catalog {
        let mut by_module: HashMap<&str, HashMap<&str, &str>> = HashMap::new();
        for rewrite in rewrites {
            by_module
                .entry(rewrite.module.as_str())
                .or_default()
                .insert(rewrite.from.as_str(), rewrite.to.as_str());
        }

        let mut resolved = catalog.clone();

        for module in resolved.iter_mut() {
            let Module {
                name: module_name,
                direct_imports,
                delayed_imports,
                ..
            } = module;

            let Some(renames) = by_module.get(module_name.as_str()) else {
                continue;
            };

            for name in direct_imports.iter_mut().chain(delayed_imports.iter_mut()) {
                if let Some(&to) = renames.get(name.as_str()) {
                    *name = to.to_string();
                }
            }
        }

        resolved
    }

    pub fn resolve(&self, catalog: &Catalog) -> Catalog {
        let rewrites = self.plan(catalog);
        self.apply(catalog, &rewrites)
    }
}

impl Default for RelativeImportResolver {
    fn default() -> Self {
        Self::new()
    }
}
