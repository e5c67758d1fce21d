//! Command line arguments.

use clap::Parser;
use socialdash_config::Config;
use std::path::PathBuf;

/// Renders the social media analytics dashboard to a static HTML page.
#[derive(Debug, Clone, Parser)]
#[command(name = "socialdash", version, about)]
pub struct Cli {
    /// Configuration file (YAML or TOML).
    #[arg(short, long, env = "SOCIALDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the page is written to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Language of the page text, e.g. `en-US` or `id-ID`.
    #[arg(short, long)]
    pub language: Option<String>,

    /// Also export every chart as a PNG file.
    #[arg(long)]
    pub png: bool,
}

impl Cli {
    /// Applies the command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.output.dir.clone_from(dir);
        }
        if let Some(language) = &self.language {
            config.dashboard.language.clone_from(language);
        }
        if self.png {
            config.output.export_png = true;
        }
    }
}
