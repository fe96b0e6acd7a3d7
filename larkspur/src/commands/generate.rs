use std::path::PathBuf;

use clap::Args;
use eyre::{Context as _, Result};
use larkspur_core::{Context, ContextValue};

use super::{ManifestArgs, UnwrapOrExit, parse_assignment};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Write the grammar to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set a context value, overriding [context] (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, ContextValue)>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let file = self.manifest.open();

        let mut overrides = Context::new();
        for (key, value) in &self.set {
            overrides.set(key.clone(), value.clone());
        }

        let grammar = file.generate(overrides).unwrap_or_exit();
        tracing::debug!(bytes = grammar.len(), "rendered grammar");

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{grammar}\n"))
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                println!("✓ Wrote {}", path.display());
            }
            None => println!("{grammar}"),
        }

        Ok(())
    }
}
