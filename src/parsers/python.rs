//! Line-oriented import extraction for Python sources.
//!
//! This is text pattern matching, not parsing: commented-out imports and imports
//! inside string literals are reported like real ones, and statements spanning
//! several lines are only seen through their first line.

use regex::Regex;

use super::{ExtractedImports, ImportExtractor};
use crate::error::Result;

/// Substring that marks a script entry point.
pub const ENTRY_POINT_MARKER: &str = "if __name__ == '__main__':";

const DOTTED_NAME: &str = r"[a-zA-Z_.]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Direct,
    Delayed,
}

/// One line-classification rule; the first capture group is the imported module.
#[derive(Debug, Clone)]
pub struct ImportRule {
    pub pattern: Regex,
    pub kind: ImportKind,
}

/// Classifies each line against an ordered rule list, stopping at the first match.
///
/// Rule order matters: top-level forms come first, indented forms after. The
/// indented rules require at least one leading non-word character, so a line can
/// never satisfy both a top-level and an indented rule.
#[derive(Debug, Clone)]
pub struct PythonExtractor {
    rules: Vec<ImportRule>,
}

impl PythonExtractor {
    pub fn new() -> Result<Self> {
        let rules = vec![
            Self::rule(&format!(r"^import ({DOTTED_NAME})"), ImportKind::Direct)?,
            Self::rule(
                &format!(r"^from ({DOTTED_NAME}) import ({DOTTED_NAME})"),
                ImportKind::Direct,
            )?,
            Self::rule(&format!(r"^\W+import ({DOTTED_NAME})"), ImportKind::Delayed)?,
            Self::rule(
                &format!(r"^\W+from ({DOTTED_NAME}) import ({DOTTED_NAME})"),
                ImportKind::Delayed,
            )?,
        ];
        Ok(Self { rules })
    }

    fn rule(pattern: &str, kind: ImportKind) -> Result<ImportRule> {
        Ok(ImportRule {
            pattern: Regex::new(pattern)?,
            kind,
        })
    }

    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    /// Returns the imported module name and its kind for a single line, if any.
    pub fn classify_line<'a>(&self, line: &'a str) -> Option<(&'a str, ImportKind)> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|name| (name.as_str(), rule.kind))
        })
    }
}

impl ImportExtractor for PythonExtractor {
    fn extract(&self, source: &str) -> ExtractedImports {
        let mut result = ExtractedImports {
            is_empty: source.is_empty(),
            ..ExtractedImports::default()
        };

        for raw_line in source.split('\n') {
            let line = raw_line.trim_end_matches(['\r', '\n']);

            match self.classify_line(line) {
                Some((name, ImportKind::Direct)) => result.direct_imports.push(name.to_string()),
                Some((name, ImportKind::Delayed)) => {
                    result.delayed_imports.push(name.to_string())
                }
                None => {}
            }

            if line.contains(ENTRY_POINT_MARKER) {
                result.has_entry_point_marker = true;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> ExtractedImports {
        PythonExtractor::new().unwrap().extract(source)
    }

    #[test]
    fn top_level_imports_are_direct() {
        let facts = extract("import os.path\nfrom pkg.sub import thing\n");
        assert_eq!(facts.direct_imports, vec!["os.path", "pkg.sub"]);
        assert!(facts.delayed_imports.is_empty());
        assert!(!facts.is_empty);
    }

    #[test]
    fn indented_imports_are_delayed() {
        let source = "def f():\n    import json\n    from collections import OrderedDict\n";
        let facts = extract(source);
        assert!(facts.direct_imports.is_empty());
        assert_eq!(facts.delayed_imports, vec!["json", "collections"]);
    }

    #[test]
    fn tab_indentation_counts_as_delayed() {
        let facts = extract("if x:\r\n\timport foo\r\n");
        assert_eq!(facts.delayed_imports, vec!["foo"]);
    }

    #[test]
    fn entry_point_marker_is_substring_match() {
        let facts = extract("def main(): pass\n\nif __name__ == '__main__':\n    main()\n");
        assert!(facts.has_entry_point_marker);

        let facts = extract("    if __name__ == '__main__':  # nested\n");
        assert!(facts.has_entry_point_marker);

        let facts = extract("if __name__ == \"__main__\":\n");
        assert!(!facts.has_entry_point_marker);
    }

    #[test]
    fn empty_file_is_flagged() {
        let facts = extract("");
        assert!(facts.is_empty);

        let facts = extract("\n");
        assert!(!facts.is_empty);
    }

    #[test]
    fn commented_import_is_a_known_false_positive() {
        let facts = extract("# import disabled\n");
        assert_eq!(facts.delayed_imports, vec!["disabled"]);
    }

    #[test]
    fn non_import_lines_contribute_nothing() {
        let facts = extract("x = 1\nimported = True\nfrom_here = 2\nprint('import x')\n");
        assert!(facts.direct_imports.is_empty());
        assert!(facts.delayed_imports.is_empty());
    }

    #[test]
    fn relative_from_import_captures_dots() {
        let facts = extract("from . import sibling\nfrom .. import parent\n");
        assert_eq!(facts.direct_imports, vec![".", ".."]);
    }

    #[test]
    fn classify_line_reports_first_matching_rule() {
        let extractor = PythonExtractor::new().unwrap();
        assert_eq!(extractor.rules().len(), 4);
        assert_eq!(
            extractor.classify_line("import a.b as c"),
            Some(("a.b", ImportKind::Direct))
        );
        assert_eq!(
            extractor.classify_line("    from x import y"),
            Some(("x", ImportKind::Delayed))
        );
        assert_eq!(extractor.classify_line("importlib.reload(m)"), None);
    }
}
