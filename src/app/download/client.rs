//! Retrieval tasks: streaming one web source to disk
//!
//! Each task owns exactly one job id and publishes everything it learns over
//! the manager's event channel; it never touches shared state. A stalled
//! response (no bytes for [`http::READ_STALL_TIMEOUT`]) fails the job rather
//! than hanging the session.

use std::path::PathBuf;

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::catalog::WebSource;
use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult};

use super::types::JobEvent;

/// Build the HTTP client shared by every retrieval task of one session
pub fn build_client() -> DownloadResult<Client> {
    Ok(Client::builder()
        .user_agent(http::USER_AGENT)
        .connect_timeout(http::CONNECT_TIMEOUT)
        .build()?)
}

/// The request URL for a source, with its checksum directive attached
pub fn request_url(source: &WebSource) -> DownloadResult<Url> {
    let mut url = Url::parse(&source.url).map_err(|e| DownloadError::InvalidUrl {
        url: source.url.clone(),
        source: e,
    })?;
    if let Some(checksum) = &source.checksum {
        url.query_pairs_mut().append_pair("checksum", checksum);
    }
    Ok(url)
}

/// Destination file name for a source: the explicit name when the catalog
/// provides one, otherwise the last path segment of the URL
pub fn destination_file_name(source: &WebSource) -> String {
    if let Some(name) = &source.file_name {
        return name.clone();
    }
    Url::parse(&source.url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.last().map(str::to_owned))
        })
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| "download".to_string())
}

/// Run one retrieval to completion and publish its terminal state
///
/// Never returns an error: every failure is converted into a `Failed` event
/// for this job alone.
pub(super) async fn retrieve(
    client: Client,
    source: WebSource,
    destination: PathBuf,
    job: usize,
    events: UnboundedSender<JobEvent>,
) {
    let _ = events.send(JobEvent::Started { job });

    match stream_to_file(&client, &source, &destination, job, &events).await {
        Ok(received) => {
            info!(job, path = %destination.display(), received, "download finished");
            let _ = events.send(JobEvent::Finished { job });
        }
        Err(e) => {
            warn!(job, path = %destination.display(), error = %e, "download failed");
            let _ = events.send(JobEvent::Failed {
                job,
                reason: e.to_string(),
            });
        }
    }
}

async fn stream_to_file(
    client: &Client,
    source: &WebSource,
    destination: &PathBuf,
    job: usize,
    events: &UnboundedSender<JobEvent>,
) -> DownloadResult<u64> {
    let url = request_url(source)?;
    debug!(job, %url, "requesting");

    let mut response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(DownloadError::ServerError {
            status: response.status().as_u16(),
        });
    }

    let total = response.content_length();
    let _ = events.send(JobEvent::Progress {
        job,
        received: 0,
        total,
    });

    let mut file = tokio::fs::File::create(destination).await?;
    let mut received: u64 = 0;
    loop {
        let chunk = timeout(http::READ_STALL_TIMEOUT, response.chunk())
            .await
            .map_err(|_| DownloadError::Stalled {
                seconds: http::READ_STALL_TIMEOUT.as_secs(),
            })??;
        let Some(chunk) = chunk else {
            break;
        };
        file.write_all(&chunk).await?;
        received += chunk.len() as u64;
        let _ = events.send(JobEvent::Progress {
            job,
            received,
            total,
        });
    }
    file.flush().await?;

    Ok(received)
}
