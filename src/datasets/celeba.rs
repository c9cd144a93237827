//! Celeb-A: aligned face images plus annotation files.

use log::{debug, info};
use std::path::Path;

use super::RunSummary;
use crate::config::CelebaSource;
use crate::downloader::{Fetcher, RemoteFile};
use crate::simple_error;
use crate::utils::{Result, extract_zip};
use crate::utils::file_utils::{ensure_directory, ensure_parent_directory, is_present, rename_entry};

/// Brings `root` up to the full Celeb-A layout, skipping anything already present.
pub async fn download<F: Fetcher>(
    root: &Path,
    source: &CelebaSource,
    fetcher: &F,
    summary: &mut RunSummary,
) -> Result<()> {
    for dir in source.directories() {
        ensure_directory(root.join(dir)).await?;
    }

    download_images(root, source, fetcher, summary).await?;
    download_metadata(root, source, fetcher, summary).await
}

async fn download_images<F: Fetcher>(
    root: &Path,
    source: &CelebaSource,
    fetcher: &F,
    summary: &mut RunSummary,
) -> Result<()> {
    let data_dir = root.join(&source.data_dir);
    if is_present(&data_dir).await? {
        println!("Found Celeb-A - skip");
        summary.skipped += 1;
        return Ok(());
    }

    let save_path = root.join(&source.archive.path);
    if is_present(&save_path).await? {
        println!("[*] {} already exists", save_path.display());
    } else {
        ensure_parent_directory(&save_path).await?;
        fetcher
            .fetch(&RemoteFile::drive(&source.archive.id), &save_path)
            .await?;
        summary.downloaded += 1;
    }

    let extracted = extract_zip(&save_path).await?;
    let top_level = extracted.top_level_dir().ok_or_else(|| {
        simple_error!(
            "Cannot find the image directory in {}: first entry is {:?}",
            save_path.display(),
            extracted.first_entry
        )
    })?;

    let extract_root = save_path.parent().unwrap_or(root);
    rename_entry(extract_root.join(top_level), data_dir.clone()).await?;
    info!("Celeb-A images ready in {data_dir:?}");

    Ok(())
}

async fn download_metadata<F: Fetcher>(
    root: &Path,
    source: &CelebaSource,
    fetcher: &F,
    summary: &mut RunSummary,
) -> Result<()> {
    let total = source.metadata.len();

    for (i, file) in source.metadata.iter().enumerate() {
        let path = root.join(&file.path);
        println!("{}/{} downloading {}", i + 1, total, path.display());

        if is_present(&path).await? {
            debug!("{path:?} already exists");
            summary.skipped += 1;
            continue;
        }

        ensure_parent_directory(&path).await?;
        fetcher.fetch(&RemoteFile::drive(&file.id), &path).await?;
        summary.downloaded += 1;
    }

    Ok(())
}
