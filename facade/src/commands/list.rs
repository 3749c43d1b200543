use clap::Args;
use eyre::Result;

use super::ScanArgs;

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl ListCommand {
    /// Run the list command
    pub fn run(&self) -> Result<()> {
        let settings = self.scan.settings();
        let generator = settings.discover();

        let mut entries: Vec<(String, String)> = generator
            .exports()
            .symbols
            .iter()
            .flat_map(|symbol| {
                symbol.paths.iter().map(|path| {
                    (
                        path.to_string(),
                        format!("{}.{}", symbol.module, symbol.name),
                    )
                })
            })
            .collect();
        entries.sort();

        for (path, source) in &entries {
            println!("{path}  ({source})");
        }
        println!();
        println!(
            "{} export path{}",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" },
        );

        Ok(())
    }
}
