use reqwest::Url;
use std::path::{Path, PathBuf};

/// Block size used when saving a plain URL download.
pub const URL_CHUNK_SIZE: usize = 8 * 1024;
/// Block size used when saving a file served through the storage provider.
pub const DRIVE_CHUNK_SIZE: usize = 32 * 1024;

/// Where the bytes of a download come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFile {
    /// Direct HTTP GET.
    Url(Url),
    /// File id on the storage provider's export endpoint.
    Drive { id: String },
}

impl RemoteFile {
    pub fn drive(id: impl Into<String>) -> Self {
        Self::Drive { id: id.into() }
    }

    /// Size of the blocks written to disk while streaming.
    pub const fn chunk_size(&self) -> usize {
        match self {
            Self::Url(_) => URL_CHUNK_SIZE,
            Self::Drive { .. } => DRIVE_CHUNK_SIZE,
        }
    }
}

impl std::fmt::Display for RemoteFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Drive { id } => write!(f, "drive:{id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub source: RemoteFile,
    pub destination: PathBuf,
}

impl DownloadTask {
    pub fn new(source: RemoteFile, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Saves `url` into `dir` under the last segment of its path.
    ///
    /// Returns `None` when the URL has no usable file name.
    pub fn into_dir(url: Url, dir: &Path) -> Option<Self> {
        let file_name = file_name_from_url(&url)?.to_string();
        Some(Self::new(RemoteFile::Url(url), dir.join(file_name)))
    }
}

/// Last non-empty path segment of `url`.
pub fn file_name_from_url(url: &Url) -> Option<&str> {
    url.path_segments()?.next_back().filter(|name| !name.is_empty())
}
