//! Template archive download
//!
//! Streams the HTTP response body straight into the archive file. There is
//! no retry and no timeout; a body stream that fails mid-transfer leaves the
//! partially written file on disk.

use crate::error::{Error, Result};
use camino::Utf8Path;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Downloads template archives over HTTP(S)
pub struct ArchiveDownloader {
    /// HTTP client
    client: reqwest::Client,
}

impl ArchiveDownloader {
    /// Create a downloader that identifies itself with `user_agent`
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self { client })
    }

    /// Download `url` into a newly created file at `destination`
    ///
    /// Returns the number of bytes written.
    pub async fn download(&self, url: &str, destination: &Utf8Path) -> Result<u64> {
        info!("Download {} ...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }

        let mut file = File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) => {
                    file.flush().await?;
                    return Err(Error::download(
                        url,
                        format!("transfer interrupted after {} bytes: {}", written, e),
                    ));
                }
            };

            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        debug!("Wrote {} bytes to {}", written, destination);

        Ok(written)
    }
}
