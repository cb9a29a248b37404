use serde::{Deserialize, Serialize};

/// Request body for the /api/get_qualities endpoint
#[derive(Debug, Clone, Serialize)]
pub struct QualitiesRequest {
    pub url: String,
}

/// One quality entry as the listing endpoint reports it. The container
/// field is spelled `extension` or `ext` depending on server version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityEntry {
    pub itag: String,
    pub quality_label: String,
    #[serde(alias = "ext")]
    pub extension: String,
    pub has_audio: bool,
    pub has_video: bool,
}

/// Response from the /api/get_qualities endpoint. The server may signal
/// failure either with a non-2xx status or with a 200 carrying `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct QualitiesResponse {
    #[serde(default)]
    pub qualities: Vec<QualityEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for the /api/download endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub itag: String,
}

/// Structured error body returned by either endpoint on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const BASE_URL_ENV: &str = "TUBEFETCH_SERVER";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read the server base URL from the environment, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self { base_url: value },
            _ => Self::default(),
        }
    }
}
