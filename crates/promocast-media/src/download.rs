//! HTTP asset download into the workspace.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};
use crate::workspace::Workspace;

/// Download one asset to `dest`, streaming the body to disk.
///
/// Any network or IO failure maps to [`MediaError::DownloadFailed`] and
/// fails the request; asset acquisition is never retried here.
pub async fn fetch_asset(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<PathBuf> {
    let dest = dest.as_ref();
    debug!("Downloading {} to {}", url, dest.display());

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MediaError::download_failed(format!("{url}: {e}")))?
        .error_for_status()
        .map_err(|e| MediaError::download_failed(format!("{url}: {e}")))?;

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| MediaError::download_failed(format!("{url}: {e}")))?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!("Downloaded {} ({})", url, dest.display());
    Ok(dest.to_path_buf())
}

/// Download a capped list of candidate assets into the workspace.
///
/// Files are named `{stem}_{index}.{ext}` in candidate order. The planner
/// only ever consumes index 0; the remaining fetches mirror the upstream
/// contract.
pub async fn fetch_candidates(
    client: &reqwest::Client,
    urls: &[String],
    workspace: &Workspace,
    stem: &str,
    ext: &str,
) -> MediaResult<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        let dest = workspace.file(format!("{stem}_{i}.{ext}"));
        files.push(fetch_asset(client, url, dest).await?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_asset_bad_url() {
        let client = reqwest::Client::new();
        let ws = Workspace::new().unwrap();
        let err = fetch_asset(&client, "http://127.0.0.1:1/missing.mp3", ws.file("a.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::DownloadFailed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_candidates_empty() {
        let client = reqwest::Client::new();
        let ws = Workspace::new().unwrap();
        let files = fetch_candidates(&client, &[], &ws, "video", "mp4")
            .await
            .unwrap();
        assert!(files.is_empty());
    }
}
