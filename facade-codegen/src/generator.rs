//! The one-shot generation pipeline.

use std::path::PathBuf;

use facade_scan::{
    AnnotationScanner, ExportSet, PackageLayout, collect_symbols, enumerate_modules, scan_module,
};

use crate::{ENTRY_FILE_NAME, EntryTree, PreviewFile, file::write_file};

/// Result of writing the entry-file tree.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Entry files written, in generation order.
    pub written: Vec<PathBuf>,
}

/// Discovers the export surface of a package and materializes its entry
/// files.
///
/// The pipeline is strictly one-shot: enumerate modules, scan each once,
/// collect and validate symbols, synthesize the entry tree, then either
/// preview it or write it. No state survives between invocations; the
/// generated files themselves are the only durable output.
#[derive(Debug)]
pub struct Generator {
    layout: PackageLayout,
    exports: ExportSet,
    tree: EntryTree,
}

impl Generator {
    /// Run discovery: enumerate, scan, collect, synthesize.
    ///
    /// Fails fast with a configuration error when the package root or the
    /// implementation subdirectory is missing, and with a read error when a
    /// discovered module cannot be loaded.
    pub fn discover(
        package_root: impl Into<PathBuf>,
        src: &str,
        decorator: &str,
    ) -> facade_scan::Result<Self> {
        let layout = PackageLayout::new(package_root, src)?;
        let scanner = AnnotationScanner::new(decorator);

        let modules = enumerate_modules(&layout)?;
        let scanned = modules
            .iter()
            .map(|module| scan_module(&scanner, module))
            .collect::<facade_scan::Result<Vec<_>>>()?;

        let exports = collect_symbols(layout.name(), &scanned);
        let tree = EntryTree::build(&exports.symbols);

        Ok(Self {
            layout,
            exports,
            tree,
        })
    }

    /// The resolved package layout.
    pub fn layout(&self) -> &PackageLayout {
        &self.layout
    }

    /// The collected export set, including silently skipped symbols.
    pub fn exports(&self) -> &ExportSet {
        &self.exports
    }

    /// The synthesized entry tree.
    pub fn tree(&self) -> &EntryTree {
        &self.tree
    }

    /// Render every entry file without touching disk.
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.tree
            .iter()
            .map(|(dir, file)| PreviewFile {
                path: self
                    .layout
                    .base()
                    .join(dir)
                    .join(ENTRY_FILE_NAME)
                    .display()
                    .to_string(),
                content: file.render(),
            })
            .collect()
    }

    /// Write the entry tree to disk, creating directories as needed and
    /// fully overwriting prior entry files.
    pub fn generate(&self) -> eyre::Result<GenerateReport> {
        let mut report = GenerateReport::default();

        for (dir, file) in self.tree.iter() {
            let path = self.layout.base().join(dir).join(ENTRY_FILE_NAME);
            write_file(&path, &file.render())?;
            report.written.push(path);
        }

        Ok(report)
    }
}
