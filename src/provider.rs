use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::warn;

use crate::validation::preview;

// Raw image returned by a text-to-image provider
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl GeneratedImage {
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider credentials are not configured")]
    MissingCredentials,

    #[error("provider rejected the api key")]
    Unauthorized,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider rejected the request")]
    BadRequest,

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read provider response: {0}")]
    Body(#[source] reqwest::Error),
}

/// A text-to-image backend. One call per cache miss, never retried.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn text_to_image(&self, prompt: &str) -> Result<GeneratedImage, ProviderError>;
}

/// ClipDrop `text-to-image/v1`: multipart `prompt` in, raw image bytes out.
pub struct ClipDropProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ClipDropProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageProvider for ClipDropProvider {
    async fn text_to_image(&self, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials)?;

        let form = reqwest::multipart::Form::new().text("prompt", prompt.to_string());

        let res = self
            .client
            .post(format!("{}/text-to-image/v1", self.base_url))
            .header("x-api-key", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        if status.is_success() {
            let content_type = res
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
                .filter(|v| v.starts_with("image/"))
                .unwrap_or_else(|| "image/png".to_string());
            let bytes = res.bytes().await.map_err(ProviderError::Body)?;
            return Ok(GeneratedImage {
                bytes: bytes.to_vec(),
                content_type,
            });
        }

        // body is for the log only, callers get the mapped code
        let body = res.text().await.unwrap_or_default();
        warn!(
            status = status.as_u16(),
            error = %body,
            prompt = %preview(prompt),
            "ClipDrop API error"
        );

        Err(match status.as_u16() {
            401 => ProviderError::Unauthorized,
            429 => ProviderError::RateLimited,
            400 => ProviderError::BadRequest,
            other => ProviderError::Status {
                status: other,
                body,
            },
        })
    }
}
