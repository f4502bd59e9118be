//! Streaming file saver for issued download URLs.
//!
//! A download receipt carries a short-lived URL; this module streams it to
//! disk with a progress callback so the CLI can render a progress bar.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use assetbay_core::{DownloadReceipt, StorefrontError, StorefrontResult};

/// Progress callback, called with (`downloaded_bytes`, `total_bytes`).
/// Total is `None` when the server does not report a content length.
pub type ProgressCallback<'a> = &'a (dyn Fn(u64, Option<u64>) + Send + Sync);

/// Stream the receipt's download URL into `dest_dir`.
///
/// The file name comes from the URL's last path segment, falling back to a
/// sanitized form of the asset name. The stream goes to a `.part` sibling
/// that is renamed into place only after the transfer completes, so the
/// final path never holds a partial archive. Returns the path written.
pub async fn save_to_file(
    receipt: &DownloadReceipt,
    dest_dir: &Path,
    progress: ProgressCallback<'_>,
) -> StorefrontResult<PathBuf> {
    let file_name = file_name_for(receipt);
    let dest_path = dest_dir.join(&file_name);
    let part_path = partial_path(&dest_path);

    fs::create_dir_all(dest_dir).await.map_err(|e| io_error(dest_dir, &e))?;

    let response = reqwest::get(&receipt.download_url)
        .await
        .map_err(net_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(StorefrontError::Network {
            message: format!(
                "download URL responded with status {}: {}",
                status.as_u16(),
                receipt.download_url
            ),
        });
    }

    let total = response.content_length();
    debug!(file = %dest_path.display(), ?total, "saving asset archive");

    if let Err(err) = write_stream(&part_path, response, progress).await {
        // Best effort; the .part file is garbage at this point
        let _ = fs::remove_file(&part_path).await;
        return Err(err);
    }

    fs::rename(&part_path, &dest_path)
        .await
        .map_err(|e| io_error(&dest_path, &e))?;
    Ok(dest_path)
}

async fn write_stream(
    part_path: &Path,
    response: reqwest::Response,
    progress: ProgressCallback<'_>,
) -> StorefrontResult<()> {
    let total = response.content_length();
    let mut file = fs::File::create(part_path)
        .await
        .map_err(|e| io_error(part_path, &e))?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(net_error)?;
        file.write_all(&chunk)
            .await
            .map_err(|e| io_error(part_path, &e))?;
        downloaded += chunk.len() as u64;
        progress(downloaded, total);
    }

    file.flush().await.map_err(|e| io_error(part_path, &e))
}

/// The in-progress sibling a transfer streams into before the rename.
fn partial_path(dest_path: &Path) -> PathBuf {
    let mut name = dest_path
        .file_name()
        .map_or_else(|| "download".to_string(), |n| n.to_string_lossy().into_owned());
    name.push_str(".part");
    dest_path.with_file_name(name)
}

/// Derive a file name: URL last segment, else sanitized asset name.
fn file_name_for(receipt: &DownloadReceipt) -> String {
    if let Ok(url) = url::Url::parse(&receipt.download_url) {
        if let Some(segment) = url.path_segments().and_then(|mut s| s.next_back()) {
            if !segment.is_empty() {
                return segment.to_string();
            }
        }
    }
    let stem: String = receipt
        .asset_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.zip")
}

fn net_error(err: reqwest::Error) -> StorefrontError {
    StorefrontError::Network {
        message: err.to_string(),
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> StorefrontError {
    StorefrontError::Network {
        message: format!("failed to write {}: {err}", path.display()),
    }
}
