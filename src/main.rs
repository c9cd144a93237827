use anyhow::{Context, Result};
use celeba_fetch::Config;
use celeba_fetch::cli::Args;
use clap::Parser;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging setup
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::from_args(&args).context("Failed to build configuration")?;
    let root = config.root.clone();

    let summary = celeba_fetch::run(config)
        .await
        .with_context(|| format!("Failed to download datasets into {}", root.display()))?;

    info!(
        "Done: {} downloaded, {} already present",
        summary.downloaded, summary.skipped
    );
    Ok(())
}
