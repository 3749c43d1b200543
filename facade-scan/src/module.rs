//! Scanned module representation.

use std::fmt;

use crate::{AnnotationScanner, Error, Result, ScannedSymbol, SourceModule};

/// Dotted import path identifying a loadable module
/// (e.g. `pkg.src.shapes.widget`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A module's identifier plus the annotated symbols found in it.
#[derive(Debug, Clone)]
pub struct ScannedModule {
    pub id: ModuleId,
    pub symbols: Vec<ScannedSymbol>,
}

/// Read a discovered module and extract its annotated top-level symbols.
///
/// This is the static stand-in for loading the module: the file is read
/// once, never executed. A read failure is fatal and aborts the run.
pub fn scan_module(scanner: &AnnotationScanner, module: &SourceModule) -> Result<ScannedModule> {
    let source =
        std::fs::read_to_string(&module.path).map_err(|e| Error::io(&module.path, e))?;
    Ok(ScannedModule {
        id: module.id.clone(),
        symbols: scanner.scan(&source),
    })
}
