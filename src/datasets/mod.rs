//! Dataset orchestration: decides what to fetch, extract and rename.

pub mod celeba;

use clap::ValueEnum;
use log::info;
use std::fmt;

use crate::config::Config;
use crate::downloader::Fetcher;
use crate::simple_error;
use crate::utils::{Error, Result};

/// Datasets accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Dataset {
    #[value(name = "celebA")]
    CelebA,
    #[value(name = "lsun")]
    Lsun,
    #[value(name = "mnist")]
    Mnist,
}

impl Dataset {
    /// Whether a downloader exists for this dataset.
    pub const fn is_supported(self) -> bool {
        match self {
            Self::CelebA => true,
            Self::Lsun | Self::Mnist => false,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CelebA => "celebA",
            Self::Lsun => "lsun",
            Self::Mnist => "mnist",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

pub struct DatasetManager<F> {
    config: Config,
    fetcher: F,
}

impl<F: Fetcher> DatasetManager<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes every requested dataset in order.
    ///
    /// Unsupported datasets are rejected before anything touches the disk.
    pub async fn run(&self) -> Result<RunSummary> {
        let unsupported: Vec<&str> = self
            .config
            .datasets
            .iter()
            .filter(|dataset| !dataset.is_supported())
            .map(|dataset| dataset.as_str())
            .collect();
        if !unsupported.is_empty() {
            return Err(simple_error!(
                "No downloader available for: {}",
                unsupported.join(", ")
            ));
        }

        let mut summary = RunSummary::default();
        for dataset in &self.config.datasets {
            info!("Preparing {dataset} in {:?}", self.config.root);
            match dataset {
                Dataset::CelebA => {
                    celeba::download(
                        &self.config.root,
                        &self.config.celeba,
                        &self.fetcher,
                        &mut summary,
                    )
                    .await?
                }
                Dataset::Lsun | Dataset::Mnist => return Err(unsupported_dataset(*dataset)),
            }
        }

        Ok(summary)
    }
}

fn unsupported_dataset(dataset: Dataset) -> Error {
    simple_error!("No downloader available for: {dataset}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_celeba_has_a_downloader() {
        assert!(Dataset::CelebA.is_supported());
        assert!(!Dataset::Lsun.is_supported());
        assert!(!Dataset::Mnist.is_supported());
    }

    #[test]
    fn display_matches_the_command_line_spelling() {
        for dataset in Dataset::value_variants() {
            let name = dataset.to_possible_value().unwrap();
            assert_eq!(name.get_name(), dataset.to_string());
        }
    }
}
