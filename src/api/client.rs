use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::utils::parse_disposition_filename;

use super::models::{
    ApiConfig, DownloadRequest, ErrorBody, QualitiesRequest, QualitiesResponse, QualityEntry,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Server(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid server URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Binary download response: the payload plus the filename the server
/// suggested via Content-Disposition, if any.
#[derive(Debug, Clone)]
pub struct DownloadPayload {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)?;
        Ok(base.join(path)?)
    }

    /// Ask the listing endpoint for the qualities available at `video_url`.
    ///
    /// The server signals failure either with a non-2xx status or with a
    /// 200 body carrying an `error` field; both surface as `Server` errors
    /// with the server's own text.
    pub async fn fetch_qualities(&self, video_url: &str) -> Result<Vec<QualityEntry>> {
        let endpoint = self.endpoint("api/get_qualities")?;
        tracing::debug!(url = %video_url, "requesting quality listing");

        let response = self
            .http
            .post(endpoint)
            .json(&QualitiesRequest {
                url: video_url.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let parsed: QualitiesResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        if let Some(message) = parsed.error {
            return Err(ApiError::Server(message));
        }
        if !status.is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "listing failed with status {}",
                status
            )));
        }

        Ok(parsed.qualities)
    }

    /// Fetch the binary payload for one chosen quality.
    ///
    /// On success the whole body is read into memory and the suggested
    /// filename is taken from the Content-Disposition header when present.
    pub async fn fetch_download(&self, video_url: &str, itag: &str) -> Result<DownloadPayload> {
        let endpoint = self.endpoint("api/download")?;
        tracing::debug!(url = %video_url, itag, "requesting download");

        let response = self
            .http
            .post(endpoint)
            .json(&DownloadRequest {
                url: video_url.to_string(),
                itag: itag.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => ApiError::Server(parsed.error),
                Err(_) => {
                    ApiError::InvalidResponse(format!("download failed with status {}", status))
                }
            });
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_disposition_filename);

        let bytes = response.bytes().await?;

        Ok(DownloadPayload { filename, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: server.url(),
        })
    }

    #[tokio::test]
    async fn test_fetch_qualities_preserves_server_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/get_qualities")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"qualities": [
                    {"itag": "18", "quality_label": "360p", "extension": "mp4", "has_audio": true, "has_video": true},
                    {"itag": "137", "quality_label": "1080p", "ext": "mp4", "has_audio": false, "has_video": true},
                    {"itag": "251", "quality_label": "160k", "ext": "webm", "has_audio": true, "has_video": false}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let qualities = client
            .fetch_qualities("https://youtu.be/abc")
            .await
            .unwrap();

        assert_eq!(qualities.len(), 3);
        assert_eq!(qualities[0].itag, "18");
        assert_eq!(qualities[1].itag, "137");
        assert_eq!(qualities[1].extension, "mp4");
        assert_eq!(qualities[2].itag, "251");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_qualities_200_with_error_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/get_qualities")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid url"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch_qualities("not a url")
            .await
            .unwrap_err();

        match err {
            ApiError::Server(msg) => assert_eq!(msg, "invalid url"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_qualities_non_2xx_with_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/get_qualities")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid YouTube URL."}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch_qualities("https://example.com")
            .await
            .unwrap_err();

        match err {
            ApiError::Server(msg) => assert_eq!(msg, "Invalid YouTube URL."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_qualities_unparsable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/get_qualities")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch_qualities("https://youtu.be/abc")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_download_resolves_filename_and_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/download")
            .with_status(200)
            .with_header("content-disposition", r#"attachment; filename="clip.mp4""#)
            .with_body(&b"\x00\x01\x02video-bytes"[..])
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = client
            .fetch_download("https://youtu.be/abc", "18")
            .await
            .unwrap();

        assert_eq!(payload.filename.as_deref(), Some("clip.mp4"));
        assert_eq!(&payload.bytes[..], b"\x00\x01\x02video-bytes");
    }

    #[tokio::test]
    async fn test_fetch_download_without_disposition_header() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/download")
            .with_status(200)
            .with_body("payload")
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = client
            .fetch_download("https://youtu.be/abc", "18")
            .await
            .unwrap();

        assert_eq!(payload.filename, None);
    }

    #[tokio::test]
    async fn test_fetch_download_non_2xx_surfaces_error_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/download")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Download failed: video unavailable"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch_download("https://youtu.be/abc", "18")
            .await
            .unwrap_err();

        match err {
            ApiError::Server(msg) => assert_eq!(msg, "Download failed: video unavailable"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_download_non_2xx_unparsable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/download")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch_download("https://youtu.be/abc", "18")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
