mod check;
mod describe;
mod generate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use describe::DescribeCommand;
use eyre::Result;
use generate::GenerateCommand;
use larkspur_core::{Context, ContextValue};
use larkspur_manifest::GrammarToml;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for larkspur_manifest::Result<T> {
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

/// Manifest location shared by every command.
#[derive(Args)]
pub struct ManifestArgs {
    /// Path to larkspur.toml (defaults to ./larkspur.toml)
    #[arg(short, long, default_value = "larkspur.toml")]
    pub config: PathBuf,
}

impl ManifestArgs {
    pub fn open(&self) -> GrammarToml {
        GrammarToml::open(&self.config).unwrap_or_exit()
    }
}

/// Parse a `key=value` context assignment.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, ContextValue), String> {
    Context::parse_assignment(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

#[derive(Parser)]
#[command(name = "larkspur")]
#[command(version)]
#[command(about = "Generate Lark grammars from TOML definitions")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Describe(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the grammar from larkspur.toml
    Generate(GenerateCommand),

    /// Validate larkspur.toml without rendering
    Check(CheckCommand),

    /// Print a debug dump of every definition
    Describe(DescribeCommand),
}
