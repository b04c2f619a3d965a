//! CLI module - flags for the one-shot build.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// kisetsu - builds the static anime-season JSON API from a published sheet
#[derive(Parser, Debug)]
#[command(name = "kisetsu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Published CSV export URL (overrides SHEET_CSV_URL and config.toml)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory the JSON documents are written under
    #[arg(long)]
    pub out_root: Option<PathBuf>,

    /// Explicit config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Folds the CLI overrides into a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.source.url_override = Some(url.clone());
        }
        if let Some(out_root) = &self.out_root {
            config.output.root = out_root.display().to_string();
        }
    }
}
