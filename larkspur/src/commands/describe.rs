use clap::Args;
use eyre::Result;
use larkspur_grammar::Render;

use super::{ManifestArgs, UnwrapOrExit};

#[derive(Args)]
pub struct DescribeCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl DescribeCommand {
    /// Run the describe command
    pub fn run(&self) -> Result<()> {
        let grammar = self.manifest.open().grammar().unwrap_or_exit();
        println!("{}", grammar.describe());
        Ok(())
    }
}
