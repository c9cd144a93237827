use futures_util::StreamExt;
use log::debug;
use reqwest::{Client, Response, Url};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use super::models::{RemoteFile, file_name_from_url};
use super::progress::{DisplayStyle, ProgressTracker};
use crate::utils::Result;

/// Export endpoint of the storage provider.
pub const DRIVE_EXPORT_URL: &str = "https://docs.google.com/uc?export=download";

/// Cookie name prefix the provider uses to hand out confirmation tokens.
pub const WARNING_COOKIE_PREFIX: &str = "download_warning";

/// Something that can write the bytes of a [`RemoteFile`] to disk.
pub trait Fetcher {
    /// Downloads `remote` into `destination`, overwriting it. Returns the bytes written.
    fn fetch(
        &self,
        remote: &RemoteFile,
        destination: &Path,
    ) -> impl Future<Output = Result<u64>> + Send;
}

/// Streams downloads over HTTP.
///
/// The cookie store makes one downloader behave like a browser session,
/// which the provider's confirmation handshake relies on.
pub struct HttpDownloader {
    client: Client,
    drive_endpoint: Url,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new(drive_endpoint: Url) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("celeba-fetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            drive_endpoint,
            show_progress: true,
        })
    }

    /// Turns progress drawing on or off.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    async fn open(&self, remote: &RemoteFile) -> Result<Response> {
        match remote {
            RemoteFile::Url(url) => {
                debug!("GET {url}");
                Ok(self.client.get(url.clone()).send().await?.error_for_status()?)
            }
            RemoteFile::Drive { id } => self.open_drive_file(id).await,
        }
    }

    async fn open_drive_file(&self, id: &str) -> Result<Response> {
        debug!("Requesting provider file {id}");
        let response = self
            .client
            .get(self.drive_endpoint.clone())
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?;

        let Some(token) = confirm_token(&response) else {
            return Ok(response);
        };

        debug!("Provider asked for confirmation of {id}");
        drop(response);
        Ok(self
            .client
            .get(self.drive_endpoint.clone())
            .query(&[("id", id), ("confirm", token.as_str())])
            .send()
            .await?
            .error_for_status()?)
    }

    fn tracker(&self, remote: &RemoteFile, destination: &Path) -> ProgressTracker {
        let (name, display) = match remote {
            RemoteFile::Url(url) => (
                file_name_from_url(url).unwrap_or("download").to_string(),
                DisplayStyle::Bar,
            ),
            RemoteFile::Drive { .. } => (destination.display().to_string(), DisplayStyle::Labeled),
        };

        if self.show_progress {
            ProgressTracker::new(name, display)
        } else {
            ProgressTracker::hidden(name, display)
        }
    }
}

impl Fetcher for HttpDownloader {
    async fn fetch(&self, remote: &RemoteFile, destination: &Path) -> Result<u64> {
        let response = self.open(remote).await?;
        let mut tracker = self.tracker(remote, destination);

        if let RemoteFile::Url(url) = remote {
            println!(
                "Downloading: {} Bytes: {}",
                file_name_from_url(url).unwrap_or("download"),
                response
                    .content_length()
                    .map_or_else(|| "unknown".to_string(), |size| size.to_string())
            );
        }

        save_response(response, destination, remote.chunk_size(), &mut tracker).await
    }
}

/// Value of the provider's warning cookie, if the response carries one.
pub fn confirm_token(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name().starts_with(WARNING_COOKIE_PREFIX))
        .map(|cookie| cookie.value().to_string())
}

/// Streams the body of `response` into `destination` in `chunk_size` blocks.
///
/// A missing `Content-Length` is treated as an unknown total.
pub async fn save_response(
    response: Response,
    destination: &Path,
    chunk_size: usize,
    tracker: &mut ProgressTracker,
) -> Result<u64> {
    tracker.set_total(response.content_length().unwrap_or(0));

    let file = File::create(destination).await?;
    let mut writer = BufWriter::with_capacity(chunk_size, file);
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        // Keep-alive frames arrive as empty chunks.
        if chunk.is_empty() {
            continue;
        }

        writer.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        tracker.update(downloaded);
    }

    writer.flush().await?;
    tracker.complete();
    debug!("Wrote {downloaded} bytes to {destination:?}");

    Ok(downloaded)
}
