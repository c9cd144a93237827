//! HTTP downloading and progress tracking.

pub mod http;
pub mod models;
pub mod progress;

pub use http::{DRIVE_EXPORT_URL, Fetcher, HttpDownloader};
pub use models::{DownloadTask, RemoteFile};
pub use progress::ProgressTracker;
