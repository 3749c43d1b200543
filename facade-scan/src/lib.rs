//! Module enumeration and export annotation collection.
//!
//! This crate implements the discovery half of the facade pipeline: walking
//! a package's implementation tree, scanning each module for export-path
//! annotations, and collecting the deduplicated set of exported symbols.
//!
//! ```text
//! PackageLayout → enumerate_modules → scan_module → collect_symbols
//! ```
//!
//! Discovery is static: module files are read and scanned for a well-known
//! decorator rather than imported, so no implementation code ever runs.

mod annotation;
mod collect;
mod enumerate;
mod error;
mod module;

pub use annotation::{AnnotationScanner, ScannedSymbol};
pub use collect::{ExportPath, ExportSet, ExportedSymbol, SkippedExport, collect_symbols};
pub use enumerate::{PACKAGE_MARKER, PackageLayout, SourceModule, enumerate_modules};
pub use error::{Error, Result};
pub use module::{ModuleId, ScannedModule, scan_module};
