use std::path::PathBuf;

use bytes::Bytes;
use tokio::io::AsyncWriteExt;

use crate::{
    api::{ApiClient, ApiError},
    domain::{AppError, DownloadPlan, QualityOption},
    utils::sanitize_filename,
};

/// Save name used when the server sends no usable Content-Disposition.
const FALLBACK_FILENAME: &str = "youtube_video.mp4";

const GENERIC_LISTING_ERROR: &str = "Error fetching qualities.";
const GENERIC_DOWNLOAD_ERROR: &str = "Download failed.";

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Ask the listing endpoint for the qualities available at `video_url`
    /// and normalize them into chooser options, preserving server order.
    ///
    /// Server-supplied error text is surfaced as-is; transport and decode
    /// failures collapse to a generic fetch-failure message.
    pub async fn negotiate(&self, video_url: String) -> Result<Vec<QualityOption>, AppError> {
        let entries = self
            .api_client
            .fetch_qualities(video_url.trim())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "quality negotiation failed");
                user_error(e, GENERIC_LISTING_ERROR)
            })?;

        Ok(entries
            .into_iter()
            .map(|entry| QualityOption {
                identifier: entry.itag,
                label: entry.quality_label,
                container: entry.extension,
                has_audio: entry.has_audio,
                has_video: entry.has_video,
            })
            .collect())
    }

    /// Fetch the payload for the chosen quality and resolve its save name.
    ///
    /// Both inputs must be non-empty; the check is repeated here so the
    /// coordinator never issues a request for an incomplete selection.
    pub async fn prepare_download(
        &self,
        video_url: String,
        itag: String,
    ) -> Result<DownloadPlan, AppError> {
        if video_url.trim().is_empty() || itag.trim().is_empty() {
            return Err(AppError::MissingSelection);
        }

        let payload = self
            .api_client
            .fetch_download(video_url.trim(), itag.trim())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "download request failed");
                user_error(e, GENERIC_DOWNLOAD_ERROR)
            })?;

        let filename = payload
            .filename
            .map(|name| sanitize_filename(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

        Ok(DownloadPlan {
            filename,
            payload: payload.bytes,
        })
    }

    /// Let the user pick where to save, pre-filled with the resolved name.
    /// `None` means the dialog was dismissed.
    pub async fn choose_save_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(&suggested_filename)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Write the fetched payload to disk and flush it.
    pub async fn save_payload(&self, path: PathBuf, payload: Bytes) -> Result<PathBuf, AppError> {
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

        file.write_all(&payload)
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

        tracing::debug!(path = %path.display(), bytes = payload.len(), "payload saved");
        Ok(path)
    }
}

/// Prefer the server's own error text; anything else gets the generic
/// per-operation message.
fn user_error(error: ApiError, generic: &str) -> AppError {
    match error {
        ApiError::Server(message) => AppError::Api(message),
        _ => AppError::Api(generic.to_string()),
    }
}
