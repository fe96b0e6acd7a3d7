use std::path::{Path, PathBuf};

use larkspur_core::Context;
use larkspur_grammar::Grammar;

use crate::{Error, Manifest, Result};

/// A larkspur.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct GrammarToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl GrammarToml {
    /// Open and parse a larkspur.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let manifest = Manifest::from_str_with_filename(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Build the grammar, labelling failures within this file.
    pub fn grammar(&self) -> Result<Grammar> {
        self.manifest
            .build(&self.content, &self.path.display().to_string())
    }

    /// The manifest's `[context]` table with `overrides` layered on top.
    pub fn context(&self, overrides: Context) -> Context {
        let mut ctx = self.manifest.context.clone();
        ctx.merge(overrides);
        ctx
    }

    /// Render the grammar with the layered context.
    pub fn generate(&self, overrides: Context) -> Result<String> {
        let grammar = self.grammar()?;
        grammar
            .generate(&self.context(overrides))
            .map_err(|source| Box::new(Error::Render { source }))
    }
}
