use clap::Args;
use eyre::Result;
use facade_scan::ExportSet;

use super::ScanArgs;

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let settings = self.scan.settings();
        let generator = settings.discover();

        print_skipped(generator.exports(), generator.layout().name());

        let symbol_count = generator.exports().symbols.len();
        println!(
            "✓ {} exported symbol{} across {} entry file{}",
            symbol_count,
            if symbol_count == 1 { "" } else { "s" },
            generator.tree().len(),
            if generator.tree().len() == 1 { "" } else { "s" },
        );

        Ok(())
    }
}

/// Surface the symbols generation would silently drop. These are warnings,
/// never failures: incompletely annotated code is expected mid-development.
fn print_skipped(exports: &ExportSet, package: &str) {
    for skipped in &exports.skipped {
        eprintln!(
            "warning: '{}.{}' skipped: export path '{}' is not inside package '{}'",
            skipped.module, skipped.name, skipped.path, package,
        );
    }
    if !exports.skipped.is_empty() {
        println!();
    }
}
