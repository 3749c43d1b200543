// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod validate;

use std::str::FromStr;

pub use error::{Error, Result};
pub use file::FacadeToml;
use serde::Deserialize;

/// Decorator scanned for when facade.toml does not override it.
pub const DEFAULT_DECORATOR: &str = "api_export";

/// Implementation subdirectory used when facade.toml does not override it.
pub const DEFAULT_SRC: &str = "src";

/// Root schema for facade.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// The package whose API surface is generated
    pub package: PackageConfig,

    /// Export annotation settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[package]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageConfig {
    /// Package root directory name, also the required first segment of
    /// every export path
    pub name: String,

    /// Implementation subdirectory inside the package root
    #[serde(default = "default_src")]
    pub src: String,
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Decorator name that carries export paths
    #[serde(default = "default_decorator")]
    pub decorator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            decorator: default_decorator(),
        }
    }
}

fn default_src() -> String {
    DEFAULT_SRC.to_string()
}

fn default_decorator() -> String {
    DEFAULT_DECORATOR.to_string()
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "facade.toml")
    }
}

/// Parse a manifest from content with the given filename for error
/// reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
    validate::validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}
