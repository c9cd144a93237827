//! Downloads the Celeb-A dataset and lays it out for GAN training.
//!
//! The layout under the target root is fixed: `Anno/`, `Eval/`, `README.txt`
//! and the extracted images in `img_align_celeba/`. Anything already present
//! is left alone, so re-running is cheap.

pub mod cli;
pub mod config;
pub mod datasets;
pub mod downloader;
pub mod utils;

pub use config::Config;
pub use datasets::{Dataset, DatasetManager, RunSummary};
pub use utils::{Error, Result};

use downloader::HttpDownloader;

/// Runs every dataset in `config` against the real provider.
pub async fn run(config: Config) -> Result<RunSummary> {
    let downloader = HttpDownloader::new(config.drive_endpoint.clone())?;
    DatasetManager::new(config, downloader).run().await
}
