mod check;
mod completions;
mod generate;
mod list;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use facade_codegen::Generator;
use facade_manifest::{DEFAULT_DECORATOR, DEFAULT_SRC, FacadeToml};
use generate::GenerateCommand;
use list::ListCommand;

/// Extension trait for exiting on diagnostic errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Resolved inputs for a scan: flags win over facade.toml, which is only
/// consulted when --package is absent.
pub(crate) struct Settings {
    pub package: PathBuf,
    pub src: String,
    pub decorator: String,
}

impl Settings {
    pub fn resolve(
        config: &Path,
        package: Option<&Path>,
        src: Option<&str>,
        decorator: Option<&str>,
    ) -> Self {
        if let Some(package) = package {
            return Self {
                package: package.to_path_buf(),
                src: src.unwrap_or(DEFAULT_SRC).to_string(),
                decorator: decorator.unwrap_or(DEFAULT_DECORATOR).to_string(),
            };
        }

        let facade_toml = FacadeToml::open(config).unwrap_or_exit();
        let manifest = facade_toml.manifest();
        Self {
            package: PathBuf::from(&manifest.package.name),
            src: src.unwrap_or(&manifest.package.src).to_string(),
            decorator: decorator.unwrap_or(&manifest.export.decorator).to_string(),
        }
    }

    /// Run discovery, exiting with a rendered diagnostic on failure.
    pub fn discover(&self) -> Generator {
        Generator::discover(&self.package, &self.src, &self.decorator).unwrap_or_exit()
    }
}

/// Scan inputs shared by the generate, check, and list commands.
#[derive(Args)]
pub(crate) struct ScanArgs {
    /// Path to facade.toml (defaults to ./facade.toml)
    #[arg(short, long, default_value = "facade.toml")]
    pub config: PathBuf,

    /// Package root directory (bypasses facade.toml)
    #[arg(short, long)]
    pub package: Option<PathBuf>,

    /// Implementation subdirectory inside the package root
    #[arg(short, long)]
    pub src: Option<String>,

    /// Decorator name that carries export paths
    #[arg(short, long)]
    pub decorator: Option<String>,
}

impl ScanArgs {
    pub fn settings(&self) -> Settings {
        Settings::resolve(
            &self.config,
            self.package.as_deref(),
            self.src.as_deref(),
            self.decorator.as_deref(),
        )
    }
}

#[derive(Parser)]
#[command(name = "facade")]
#[command(version)]
#[command(about = "Generate a Python package's public API surface from export annotations")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate entry files for the declared export surface
    Generate(GenerateCommand),

    /// Scan and report what would be exported, without writing
    Check(CheckCommand),

    /// List the declared export surface
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
