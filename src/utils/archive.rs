//! ZIP extraction for downloaded dataset archives.

use log::{debug, info, warn};
use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::simple_error;
use crate::utils::Result;

/// What an extraction left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArchive {
    /// Name of the first entry as stored in the archive.
    pub first_entry: String,
    /// Number of regular files written.
    pub files: usize,
}

impl ExtractedArchive {
    /// First path component of the first entry.
    ///
    /// Providers wrap archives in a generated top-level directory; this is it.
    pub fn top_level_dir(&self) -> Option<&str> {
        Path::new(&self.first_entry)
            .components()
            .find_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
    }
}

/// Extracts a ZIP archive next to itself and deletes it afterwards.
///
/// The archive is only removed once every entry has been written, so a
/// corrupt archive stays on disk.
pub async fn extract_zip<P: AsRef<Path>>(archive_path: P) -> Result<ExtractedArchive> {
    let archive_path = archive_path.as_ref().to_path_buf();
    println!("Extracting: {}", archive_path.display());

    let extracted = tokio::task::spawn_blocking({
        let archive_path = archive_path.clone();
        move || extract_zip_blocking(&archive_path)
    })
    .await??;

    tokio::fs::remove_file(&archive_path).await?;
    info!(
        "Extracted {} files from {:?}",
        extracted.files, archive_path
    );
    Ok(extracted)
}

fn extract_zip_blocking(archive_path: &Path) -> Result<ExtractedArchive> {
    let extract_dir = archive_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let file = File::open(archive_path)
        .map_err(|e| simple_error!("Failed to open archive {archive_path:?}: {e}"))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| simple_error!("Failed to read ZIP archive {archive_path:?}: {e}"))?;

    if archive.len() == 0 {
        return Err(simple_error!("Archive {archive_path:?} has no entries"));
    }

    let first_entry = archive.by_index(0)?.name().to_string();
    let mut files = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping entry with unsafe path: {}", entry.name());
            continue;
        };
        let out_path = extract_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut output = File::create(&out_path)
            .map_err(|e| simple_error!("Failed to create file {out_path:?}: {e}"))?;
        io::copy(&mut entry, &mut output)
            .map_err(|e| simple_error!("Failed to extract {}: {e}", entry.name()))?;

        files += 1;
        debug!("Extracted: {out_path:?}");
    }

    Ok(ExtractedArchive { first_entry, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).expect("dir entry");
            } else {
                writer.start_file(*name, options).expect("file entry");
                writer.write_all(contents).expect("contents");
            }
        }
        writer.finish().expect("finish zip");
    }

    #[tokio::test]
    async fn extracts_next_to_the_archive_and_removes_it() {
        let temp = TempDir::new().expect("tempdir");
        let archive = temp.path().join("images.zip");
        write_zip(
            &archive,
            &[
                ("CelebA_raw_9f2a/", b""),
                ("CelebA_raw_9f2a/000001.jpg", b"one"),
                ("CelebA_raw_9f2a/000002.jpg", b"two"),
            ],
        );

        let extracted = extract_zip(&archive).await.expect("extract");

        assert_eq!(extracted.files, 2);
        assert_eq!(extracted.top_level_dir(), Some("CelebA_raw_9f2a"));
        assert!(!archive.exists());
        let image = temp.path().join("CelebA_raw_9f2a").join("000002.jpg");
        assert_eq!(std::fs::read(image).expect("read"), b"two");
    }

    #[tokio::test]
    async fn top_level_dir_comes_from_a_file_entry_when_no_directory_entry_exists() {
        let temp = TempDir::new().expect("tempdir");
        let archive = temp.path().join("images.zip");
        write_zip(&archive, &[("raw/nested/a.jpg", b"a")]);

        let extracted = extract_zip(&archive).await.expect("extract");

        assert_eq!(extracted.first_entry, "raw/nested/a.jpg");
        assert_eq!(extracted.top_level_dir(), Some("raw"));
    }

    #[tokio::test]
    async fn overwrites_files_that_already_exist() {
        let temp = TempDir::new().expect("tempdir");
        std::fs::write(temp.path().join("note.txt"), b"old").expect("seed");
        let archive = temp.path().join("notes.zip");
        write_zip(&archive, &[("note.txt", b"new")]);

        extract_zip(&archive).await.expect("extract");

        assert_eq!(
            std::fs::read(temp.path().join("note.txt")).expect("read"),
            b"new"
        );
    }

    #[tokio::test]
    async fn corrupt_archive_fails_and_stays_on_disk() {
        let temp = TempDir::new().expect("tempdir");
        let archive = temp.path().join("broken.zip");
        std::fs::write(&archive, b"<html>not a zip</html>").expect("write");

        let err = extract_zip(&archive).await.expect_err("corrupt archive");

        assert!(err.to_string().contains("Failed to read ZIP archive"));
        assert!(archive.exists());
    }
}
