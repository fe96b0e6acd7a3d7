use clap::Args;
use eyre::Result;

use super::{ManifestArgs, UnwrapOrExit};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = self.manifest.open();
        let grammar = file.grammar().unwrap_or_exit();

        let undefined = grammar.undefined_references();
        for name in &undefined {
            eprintln!("warning: '{}' is referenced but never defined", name);
        }
        if !undefined.is_empty() {
            println!();
        }

        println!("✓ {} is valid\n", self.manifest.config.display());

        let counts = [
            ("terminal", grammar.terminals().count()),
            ("rule", grammar.rules().count()),
            ("template", grammar.templates().count()),
            ("directive", grammar.directives().len()),
        ];
        for (kind, count) in counts {
            println!("  {} {}{}", count, kind, if count == 1 { "" } else { "s" });
        }

        let context = &file.manifest().context;
        if !context.is_empty() {
            println!(
                "\n  {} context value{}:",
                context.len(),
                if context.len() == 1 { "" } else { "s" }
            );
            for (key, value) in context.iter() {
                println!("    {} = {}", key, value);
            }
        }

        Ok(())
    }
}
