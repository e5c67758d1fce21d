//! Main entry point for the social media dashboard.

use anyhow::Context;
use clap::Parser;
use socialdash::{Cli, Dashboard};
use socialdash_common::logging::init_logging;
use socialdash_config::ConfigLoader;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);

    let _guard = init_logging(&config.logging).context("failed to initialize logging")?;
    info!("Starting socialdash {}", env!("CARGO_PKG_VERSION"));

    // Sources are fetched one after another; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let dashboard = Dashboard::new(config)?;
    match runtime.block_on(dashboard.build()) {
        Ok(path) => {
            info!("Done: {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Dashboard generation failed: {}", e);
            Err(e.into())
        }
    }
}
