//! Entry-file content synthesis.

use std::fmt;
use std::path::{Path, PathBuf};

use facade_scan::{ExportedSymbol, ModuleId};
use indexmap::IndexMap;

/// Name of every generated entry file.
pub const ENTRY_FILE_NAME: &str = "__init__.py";

/// Banner prepended to every generated file. A docstring so the file stays
/// valid Python.
pub const GENERATED_HEADER: &str = r#""""DO NOT EDIT.

This file was autogenerated. Do not edit it by hand,
since your modifications would be overwritten.
"""

"#;

/// One statement in an entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLine {
    /// Bind a public name to a symbol defined elsewhere:
    /// `from <module> import <original> as <bound>`.
    ReExport {
        module: ModuleId,
        original: String,
        bound: String,
    },
    /// Import a nested submodule so deeper entry files become reachable:
    /// `from <location> import <name>`.
    Submodule { location: String, name: String },
}

impl fmt::Display for EntryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryLine::ReExport {
                module,
                original,
                bound,
            } => write!(f, "from {module} import {original} as {bound}"),
            EntryLine::Submodule { location, name } => {
                write!(f, "from {location} import {name}")
            }
        }
    }
}

/// Ordered statements for one entry file.
#[derive(Debug, Clone, Default)]
pub struct EntryFile {
    lines: Vec<EntryLine>,
}

impl EntryFile {
    pub fn lines(&self) -> &[EntryLine] {
        &self.lines
    }

    /// Render the full file: banner, one statement per line, trailing
    /// newline.
    pub fn render(&self) -> String {
        let statements: Vec<String> = self.lines.iter().map(EntryLine::to_string).collect();
        format!("{}{}\n", GENERATED_HEADER, statements.join("\n"))
    }
}

/// Entry-file contents for every directory level implied by the export
/// paths, keyed by directory path relative to the output base.
///
/// Insertion order follows symbol processing order, which is deterministic
/// because the collected set is sorted; rendering the same input twice
/// therefore produces byte-identical files.
#[derive(Debug, Clone, Default)]
pub struct EntryTree {
    files: IndexMap<PathBuf, EntryFile>,
}

impl EntryTree {
    /// Synthesize entry-file contents from the collected export set.
    ///
    /// For a path `s1.s2...sn`, the terminal directory `s1/.../s(n-1)` gets
    /// a re-export binding `sn`, and every intermediate prefix directory
    /// gets a pass-through import of its next segment so the whole subtree
    /// is reachable by importing `s1`. Pass-through imports are emitted
    /// once per distinct segment; duplicate re-exports of one bound name
    /// are kept verbatim, so the later definition wins at load time.
    pub fn build(symbols: &[ExportedSymbol]) -> Self {
        let mut files: IndexMap<PathBuf, EntryFile> = IndexMap::new();

        for symbol in symbols {
            for path in &symbol.paths {
                let segments = path.segments();
                let terminal: PathBuf = segments[..segments.len() - 1].iter().collect();
                let bound = segments[segments.len() - 1];

                files
                    .entry(terminal)
                    .or_default()
                    .lines
                    .push(EntryLine::ReExport {
                        module: symbol.module.clone(),
                        original: symbol.name.clone(),
                        bound: bound.to_string(),
                    });

                for i in 1..segments.len() - 1 {
                    let dir: PathBuf = segments[..i].iter().collect();
                    let line = EntryLine::Submodule {
                        location: segments[..i].join("."),
                        name: segments[i].to_string(),
                    };
                    let file = files.entry(dir).or_default();
                    if !file.lines.contains(&line) {
                        file.lines.push(line);
                    }
                }
            }
        }

        Self { files }
    }

    /// Iterate directories and their entry-file contents in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &EntryFile)> {
        self.files.iter().map(|(dir, file)| (dir.as_path(), file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, dir: impl AsRef<Path>) -> Option<&EntryFile> {
        self.files.get(dir.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use facade_scan::ExportPath;

    use super::*;

    fn exported(module: &str, name: &str, paths: &[&str]) -> ExportedSymbol {
        ExportedSymbol {
            module: ModuleId::new(module),
            name: name.to_string(),
            paths: paths.iter().map(|p| ExportPath::new(*p)).collect(),
        }
    }

    #[test]
    fn test_terminal_reexport_and_parent_passthrough() {
        let tree = EntryTree::build(&[exported(
            "pkg.src.shapes.widget",
            "Widget",
            &["pkg.shapes.Widget"],
        )]);

        assert_eq!(tree.len(), 2);
        assert_eq!(
            tree.get("pkg/shapes").unwrap().lines(),
            &[EntryLine::ReExport {
                module: ModuleId::new("pkg.src.shapes.widget"),
                original: "Widget".to_string(),
                bound: "Widget".to_string(),
            }]
        );
        assert_eq!(
            tree.get("pkg").unwrap().lines(),
            &[EntryLine::Submodule {
                location: "pkg".to_string(),
                name: "shapes".to_string(),
            }]
        );
    }

    #[test]
    fn test_deep_path_chains_passthroughs() {
        let tree = EntryTree::build(&[exported("pkg.src.impl_", "Name", &["pkg.a.b.Name"])]);

        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.get("pkg").unwrap().lines(),
            &[EntryLine::Submodule {
                location: "pkg".to_string(),
                name: "a".to_string(),
            }]
        );
        assert_eq!(
            tree.get("pkg/a").unwrap().lines(),
            &[EntryLine::Submodule {
                location: "pkg.a".to_string(),
                name: "b".to_string(),
            }]
        );
        assert!(matches!(
            tree.get("pkg/a/b").unwrap().lines(),
            [EntryLine::ReExport { bound, .. }] if bound == "Name"
        ));
    }

    #[test]
    fn test_passthroughs_deduplicated_per_directory() {
        let tree = EntryTree::build(&[
            exported("pkg.src.a", "One", &["pkg.sub.One"]),
            exported("pkg.src.b", "Two", &["pkg.sub.Two"]),
        ]);

        let top = tree.get("pkg").unwrap();
        assert_eq!(
            top.lines(),
            &[EntryLine::Submodule {
                location: "pkg".to_string(),
                name: "sub".to_string(),
            }]
        );
        assert_eq!(tree.get("pkg/sub").unwrap().lines().len(), 2);
    }

    #[test]
    fn test_multi_path_fan_out() {
        let tree = EntryTree::build(&[exported(
            "pkg.src.math",
            "matmul",
            &["pkg.ops.matmul", "pkg.linalg.matmul"],
        )]);

        assert!(tree.get("pkg/ops").is_some());
        assert!(tree.get("pkg/linalg").is_some());
        assert_eq!(tree.get("pkg").unwrap().lines().len(), 2);
    }

    #[test]
    fn test_collision_keeps_both_lines_in_order() {
        let tree = EntryTree::build(&[
            exported("pkg.src.first", "Tool", &["pkg.Tool"]),
            exported("pkg.src.second", "Tool", &["pkg.Tool"]),
        ]);

        let lines = tree.get("pkg").unwrap().lines();
        assert_eq!(lines.len(), 2);
        assert!(matches!(&lines[0], EntryLine::ReExport { module, .. } if module.as_str() == "pkg.src.first"));
        assert!(matches!(&lines[1], EntryLine::ReExport { module, .. } if module.as_str() == "pkg.src.second"));
    }

    #[test]
    fn test_bound_name_may_differ_from_original() {
        let tree = EntryTree::build(&[exported("pkg.src.widget", "Widget", &["pkg.Gadget"])]);
        let lines = tree.get("pkg").unwrap().lines();
        assert_eq!(
            lines[0].to_string(),
            "from pkg.src.widget import Widget as Gadget"
        );
    }

    #[test]
    fn test_render_format() {
        let tree = EntryTree::build(&[exported(
            "pkg.src.shapes.widget",
            "Widget",
            &["pkg.shapes.Widget"],
        )]);

        let content = tree.get("pkg/shapes").unwrap().render();
        assert_eq!(
            content,
            "\"\"\"DO NOT EDIT.\n\nThis file was autogenerated. Do not edit it by hand,\nsince your modifications would be overwritten.\n\"\"\"\n\nfrom pkg.src.shapes.widget import Widget as Widget\n"
        );
    }
}
