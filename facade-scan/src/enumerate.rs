//! Module enumeration over the implementation tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, ModuleId, Result};

/// File that marks a directory as a loadable package level.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Extension recognized as a source module.
const SOURCE_EXTENSION: &str = ".py";

/// Name suffix that marks a file as a test module, excluded from scanning.
const TEST_SUFFIX: &str = "_test.py";

/// Resolved location of a package and its implementation subdirectory.
///
/// Construction fails fast when either directory is absent, before any
/// scanning begins.
#[derive(Debug, Clone)]
pub struct PackageLayout {
    root: PathBuf,
    name: String,
    src: String,
}

impl PackageLayout {
    /// Resolve the package root and implementation subdirectory.
    ///
    /// The package name is taken from the root directory's final path
    /// component; export paths must be prefixed with it.
    pub fn new(root: impl Into<PathBuf>, src: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let src = src.into();

        if !root.is_dir() {
            return Err(Box::new(Error::MissingPackage { path: root }));
        }
        let name = match root.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Err(Box::new(Error::UnnamedPackage { path: root })),
        };
        let src_dir = root.join(&src);
        if !src_dir.is_dir() {
            return Err(Box::new(Error::MissingSourceDir { path: src_dir }));
        }

        Ok(Self { root, name, src })
    }

    /// Package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package name, the required first segment of every export path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Implementation subdirectory name relative to the root.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Implementation directory: `<root>/<src>`.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(&self.src)
    }

    /// Directory that generated entry-file paths are resolved against.
    ///
    /// Export path segments start with the package name, so output is
    /// rooted at the package root's parent.
    pub fn base(&self) -> &Path {
        self.root.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// A discovered module: its dotted identifier and the file backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    pub id: ModuleId,
    pub path: PathBuf,
}

/// Walk the implementation tree and list every loadable module.
///
/// Each directory holding a package marker yields one identifier for that
/// package level; every other `.py` file yields one identifier for the file
/// itself, except test modules (`*_test.py`), which are skipped. The walk
/// order is sorted so verbose output is stable, though correctness does not
/// depend on it.
pub fn enumerate_modules(layout: &PackageLayout) -> Result<Vec<SourceModule>> {
    let src_dir = layout.src_dir();
    let mut modules = Vec::new();

    for entry in WalkDir::new(&src_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| src_dir.clone());
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let dir = entry
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| src_dir.clone());

        if file_name == PACKAGE_MARKER {
            modules.push(SourceModule {
                id: ModuleId::new(dotted_path(layout, &dir)),
                path: entry.into_path(),
            });
        } else if let Some(stem) = file_name.strip_suffix(SOURCE_EXTENSION) {
            if file_name.ends_with(TEST_SUFFIX) {
                continue;
            }
            let id = format!("{}.{}", dotted_path(layout, &dir), stem);
            modules.push(SourceModule {
                id: ModuleId::new(id),
                path: entry.into_path(),
            });
        }
    }

    Ok(modules)
}

/// Dotted import path of a directory inside the package.
fn dotted_path(layout: &PackageLayout, dir: &Path) -> String {
    // The walk never escapes the package root.
    let rel = dir.strip_prefix(layout.root()).unwrap_or(dir);
    let mut parts = vec![layout.name().to_string()];
    parts.extend(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_layout_missing_package_dir() {
        let temp = TempDir::new().unwrap();
        let err = PackageLayout::new(temp.path().join("nope"), "src").unwrap_err();
        assert!(matches!(*err, Error::MissingPackage { .. }));
    }

    #[test]
    fn test_layout_missing_source_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("pkg");
        fs::create_dir(&root).unwrap();

        let err = PackageLayout::new(&root, "src").unwrap_err();
        assert!(matches!(*err, Error::MissingSourceDir { .. }));
    }

    #[test]
    fn test_layout_name_from_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("pkg");
        fs::create_dir_all(root.join("src")).unwrap();

        let layout = PackageLayout::new(&root, "src").unwrap();
        assert_eq!(layout.name(), "pkg");
        assert_eq!(layout.src_dir(), root.join("src"));
        assert_eq!(layout.base(), temp.path());
    }

    #[test]
    fn test_enumerate_markers_and_modules() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("pkg");
        touch(&root.join("src/__init__.py"));
        touch(&root.join("src/shapes/__init__.py"));
        touch(&root.join("src/shapes/widget.py"));
        touch(&root.join("src/shapes/widget_test.py"));
        touch(&root.join("src/shapes/data.json"));

        let layout = PackageLayout::new(&root, "src").unwrap();
        let mut ids: Vec<String> = enumerate_modules(&layout)
            .unwrap()
            .into_iter()
            .map(|m| m.id.to_string())
            .collect();
        ids.sort();

        assert_eq!(
            ids,
            vec!["pkg.src", "pkg.src.shapes", "pkg.src.shapes.widget"]
        );
    }

    #[test]
    fn test_enumerate_maps_marker_to_directory_id() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("pkg");
        touch(&root.join("src/ops/__init__.py"));

        let layout = PackageLayout::new(&root, "src").unwrap();
        let modules = enumerate_modules(&layout).unwrap();

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].id.as_str(), "pkg.src.ops");
        assert_eq!(modules[0].path, root.join("src/ops/__init__.py"));
    }
}
