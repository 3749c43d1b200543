use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for facade-scan operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no directory named '{path}'")]
    #[diagnostic(
        code(facade::missing_package),
        help("pass --package <DIR> pointing at the package root, or set [package] name in facade.toml")
    )]
    MissingPackage { path: PathBuf },

    #[error("no directory named '{path}'")]
    #[diagnostic(
        code(facade::missing_source_dir),
        help("the implementation tree must live inside the package root; override the subdirectory name with --src")
    )]
    MissingSourceDir { path: PathBuf },

    #[error("package root '{path}' has no directory name")]
    #[diagnostic(
        code(facade::unnamed_package),
        help("the package name is taken from the root directory's final component, so pass the directory by name rather than '.'")
    )]
    UnnamedPackage { path: PathBuf },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(facade::read_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a read error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
