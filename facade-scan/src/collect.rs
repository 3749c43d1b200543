//! Symbol collection and export path validation.

use std::collections::BTreeMap;
use std::fmt;

use crate::{ModuleId, ScannedModule};

/// Dotted public-facing location at which a symbol becomes importable.
///
/// All segments but the last denote directory levels; the last is the name
/// the symbol is bound to at that level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExportPath(String);

impl ExportPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, split on `.`.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// Whether this path is rooted at the owning package.
    pub fn is_within(&self, package: &str) -> bool {
        self.0
            .strip_prefix(package)
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl fmt::Display for ExportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A symbol to re-export: its defining location plus every declared export
/// path. Identity is the (module, name) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSymbol {
    pub module: ModuleId,
    pub name: String,
    pub paths: Vec<ExportPath>,
}

/// A symbol excluded from the export set because one of its paths escapes
/// the owning package. Recorded for diagnostics only; exclusion is silent
/// during generation.
#[derive(Debug, Clone)]
pub struct SkippedExport {
    pub module: ModuleId,
    pub name: String,
    pub path: String,
}

/// Outcome of collection: the deduplicated export set in deterministic
/// (module, name) order, plus the symbols that were silently skipped.
#[derive(Debug, Clone, Default)]
pub struct ExportSet {
    pub symbols: Vec<ExportedSymbol>,
    pub skipped: Vec<SkippedExport>,
}

/// Collect the deduplicated set of exportable symbols from scanned modules.
///
/// Underscore-prefixed names are private and skipped. A symbol with any
/// export path not prefixed by `<package>.` is excluded entirely — a
/// deliberate filter for incompletely annotated code, not an error.
/// Symbols reached through more than one module scan collapse to one entry
/// keyed by defining module and name, with their paths merged in
/// encounter order.
pub fn collect_symbols(package: &str, modules: &[ScannedModule]) -> ExportSet {
    let mut by_identity: BTreeMap<(ModuleId, String), Vec<ExportPath>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for module in modules {
        for symbol in &module.symbols {
            if symbol.name.starts_with('_') {
                continue;
            }
            if symbol.paths.is_empty() {
                continue;
            }
            if let Some(bad) = symbol
                .paths
                .iter()
                .find(|p| !ExportPath::new(p.as_str()).is_within(package))
            {
                skipped.push(SkippedExport {
                    module: module.id.clone(),
                    name: symbol.name.clone(),
                    path: bad.clone(),
                });
                continue;
            }

            by_identity
                .entry((module.id.clone(), symbol.name.clone()))
                .or_default()
                .extend(symbol.paths.iter().cloned().map(ExportPath::new));
        }
    }

    let symbols = by_identity
        .into_iter()
        .map(|((module, name), paths)| ExportedSymbol {
            module,
            name,
            paths,
        })
        .collect();

    ExportSet {
        symbols,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use crate::ScannedSymbol;

    use super::*;

    fn module(id: &str, symbols: Vec<ScannedSymbol>) -> ScannedModule {
        ScannedModule {
            id: ModuleId::new(id),
            symbols,
        }
    }

    fn symbol(name: &str, paths: &[&str]) -> ScannedSymbol {
        ScannedSymbol {
            name: name.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_is_within_requires_package_prefix() {
        assert!(ExportPath::new("pkg.shapes.Widget").is_within("pkg"));
        assert!(!ExportPath::new("other.Widget").is_within("pkg"));
        // Prefix must be the whole first segment.
        assert!(!ExportPath::new("pkgx.Widget").is_within("pkg"));
        assert!(!ExportPath::new("pkg").is_within("pkg"));
    }

    #[test]
    fn test_underscore_names_are_private() {
        let set = collect_symbols(
            "pkg",
            &[module(
                "pkg.src.inner",
                vec![symbol("_hidden", &["pkg._hidden"])],
            )],
        );
        assert!(set.symbols.is_empty());
        assert!(set.skipped.is_empty());
    }

    #[test]
    fn test_foreign_path_excludes_whole_symbol() {
        let set = collect_symbols(
            "pkg",
            &[module(
                "pkg.src.widget",
                vec![symbol("Widget", &["pkg.Widget", "other_pkg.Widget"])],
            )],
        );
        assert!(set.symbols.is_empty());
        assert_eq!(set.skipped.len(), 1);
        assert_eq!(set.skipped[0].path, "other_pkg.Widget");
    }

    #[test]
    fn test_dedup_by_identity_merges_paths() {
        let set = collect_symbols(
            "pkg",
            &[
                module("pkg.src.widget", vec![symbol("Widget", &["pkg.a.Widget"])]),
                module("pkg.src.widget", vec![symbol("Widget", &["pkg.b.Widget"])]),
            ],
        );
        assert_eq!(set.symbols.len(), 1);
        assert_eq!(
            set.symbols[0].paths,
            vec![
                ExportPath::new("pkg.a.Widget"),
                ExportPath::new("pkg.b.Widget")
            ]
        );
    }

    #[test]
    fn test_symbols_sorted_by_module_then_name() {
        let set = collect_symbols(
            "pkg",
            &[
                module("pkg.src.zed", vec![symbol("Zed", &["pkg.Zed"])]),
                module(
                    "pkg.src.alpha",
                    vec![symbol("Beta", &["pkg.Beta"]), symbol("Alpha", &["pkg.Alpha"])],
                ),
            ],
        );
        let names: Vec<&str> = set.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Zed"]);
    }
}
