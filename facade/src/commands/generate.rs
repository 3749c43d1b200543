use clap::Args;
use eyre::Result;

use super::ScanArgs;

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Print progress while scanning and writing
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let settings = self.scan.settings();

        if self.verbose {
            println!(
                "Generating files for package '{}' from sources found in '{}'.",
                settings.package.display(),
                settings.package.join(&settings.src).display(),
            );
        }

        let generator = settings.discover();

        if self.verbose {
            println!("Compiling list of symbols to export.");
            for symbol in &generator.exports().symbols {
                println!("...processing symbol '{}'", symbol.name);
            }
        }

        if self.dry_run {
            let files = generator.preview();
            for file in &files {
                println!("── {} ──", file.path);
                println!("{}", file.content);
            }
            println!("── Summary ──");
            println!("{} files would be generated", files.len());
            return Ok(());
        }

        if self.verbose {
            println!("Writing out API files.");
        }
        let report = generator.generate()?;
        if self.verbose {
            for path in &report.written {
                println!("...writing {}", path.display());
            }
        }

        println!(
            "Generated {} entry file{} for package '{}'",
            report.written.len(),
            if report.written.len() == 1 { "" } else { "s" },
            generator.layout().name(),
        );

        Ok(())
    }
}
