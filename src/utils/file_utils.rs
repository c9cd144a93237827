use log::debug;
use std::path::Path;
use tokio::fs;

use crate::utils::Result;

/// Ensures a directory exists, creating it and all parent directories if necessary.
pub async fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !fs::try_exists(path).await? {
        fs::create_dir_all(path).await?;
        debug!("Created directory: {path:?}");
    }
    Ok(())
}

/// Ensures the parent directory of a file exists.
pub async fn ensure_parent_directory<P: AsRef<Path>>(file_path: P) -> Result<()> {
    if let Some(parent) = file_path.as_ref().parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_directory(parent).await?;
    }
    Ok(())
}

/// Returns `true` when something (file or directory) already sits at `path`.
pub async fn is_present<P: AsRef<Path>>(path: P) -> Result<bool> {
    Ok(fs::try_exists(path).await?)
}

/// Renames `from` to `to`, doing nothing when both point at the same path.
pub async fn rename_entry<P: AsRef<Path>>(from: P, to: P) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    if from == to {
        return Ok(());
    }
    fs::rename(from, to).await?;
    debug!("Renamed {from:?} to {to:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn ensure_parent_directory_creates_missing_levels() {
        let temp = TempDir::new().expect("tempdir");
        let file = temp.path().join("Anno").join("nested").join("list.txt");

        ensure_parent_directory(&file).await.expect("parent");

        assert!(temp.path().join("Anno").join("nested").is_dir());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn is_present_sees_files_and_directories() {
        let temp = TempDir::new().expect("tempdir");
        let file = temp.path().join("README.txt");
        std::fs::write(&file, b"readme").expect("write");

        assert!(is_present(&file).await.expect("file"));
        assert!(is_present(temp.path()).await.expect("dir"));
        assert!(!is_present(temp.path().join("missing")).await.expect("missing"));
    }

    #[tokio::test]
    async fn rename_entry_is_a_no_op_for_identical_paths() {
        let temp = TempDir::new().expect("tempdir");
        let dir = temp.path().join("img_align_celeba");
        std::fs::create_dir(&dir).expect("dir");

        rename_entry(&dir, &dir).await.expect("rename");

        assert!(dir.is_dir());
    }
}
