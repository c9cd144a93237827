//! Run configuration and the fixed Celeb-A file tables.

use reqwest::Url;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::datasets::Dataset;
use crate::downloader::DRIVE_EXPORT_URL;
use crate::simple_error;
use crate::utils::Result;

/// Default target root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "data/raw";

/// A provider file and where it lands, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub id: String,
    pub path: PathBuf,
}

impl DatasetFile {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CelebaSource {
    /// Zipped aligned images.
    pub archive: DatasetFile,
    /// Canonical name of the extracted image directory.
    pub data_dir: String,
    /// Readme, annotation and evaluation files, in download order.
    pub metadata: Vec<DatasetFile>,
}

impl CelebaSource {
    /// Directories holding metadata files, in first-seen order.
    pub fn directories(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for file in &self.metadata {
            if let Some(parent) = file.path.parent()
                && !parent.as_os_str().is_empty()
                && !dirs.contains(&parent)
            {
                dirs.push(parent);
            }
        }
        dirs
    }
}

impl Default for CelebaSource {
    fn default() -> Self {
        Self {
            archive: DatasetFile::new("0B7EVK8r0v71pZjFTYXZWM3FlRnM", "img_align_celeba.zip"),
            data_dir: "img_align_celeba".to_string(),
            metadata: vec![
                DatasetFile::new("0B7EVK8r0v71pOXBhSUdJWU1MYUk", "README.txt"),
                DatasetFile::new("0B7EVK8r0v71pbThiMVRxWXZ4dU0", "Anno/list_bbox_celeba.txt"),
                DatasetFile::new("0B7EVK8r0v71pblRyaVFSWGxPY0U", "Anno/list_attr_celeba.txt"),
                DatasetFile::new(
                    "0B7EVK8r0v71pd0FJY3Blby1HUTQ",
                    "Anno/list_landmarks_align_celeba.txt",
                ),
                DatasetFile::new("0B7EVK8r0v71pTzJIdlJWdHczRlU", "Anno/list_landmarks_celeba.txt"),
                DatasetFile::new("0B7EVK8r0v71pY0NSMzRuSXJEVkk", "Eval/list_eval_partition.txt"),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub datasets: Vec<Dataset>,
    pub drive_endpoint: Url,
    pub celeba: CelebaSource,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, datasets: Vec<Dataset>) -> Result<Self> {
        let drive_endpoint = Url::parse(DRIVE_EXPORT_URL)
            .map_err(|e| simple_error!("Invalid provider endpoint {DRIVE_EXPORT_URL}: {e}"))?;

        Ok(Self {
            root: root.into(),
            datasets,
            drive_endpoint,
            celeba: CelebaSource::default(),
        })
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        Self::new(args.root.clone(), args.datasets.clone())
    }

    pub fn with_drive_endpoint(mut self, drive_endpoint: Url) -> Self {
        self.drive_endpoint = drive_endpoint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_the_celeba_layout() {
        let source = CelebaSource::default();

        assert_eq!(source.data_dir, "img_align_celeba");
        assert_eq!(source.metadata.len(), 6);
        assert_eq!(source.metadata[0].path, PathBuf::from("README.txt"));
        let anno = source
            .metadata
            .iter()
            .filter(|file| file.path.starts_with("Anno"))
            .count();
        assert_eq!(anno, 4);
    }

    #[test]
    fn directories_are_unique_and_ordered() {
        let source = CelebaSource::default();
        assert_eq!(
            source.directories(),
            vec![Path::new("Anno"), Path::new("Eval")]
        );
    }

    #[test]
    fn endpoint_defaults_to_the_provider() {
        let config = Config::new("data/raw", vec![Dataset::CelebA]).unwrap();
        assert_eq!(config.drive_endpoint.as_str(), DRIVE_EXPORT_URL);
    }
}
