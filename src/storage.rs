use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::CloudinaryCredentials;
use crate::models::StoredImage;

// Applied on upload: automatic quality, stored as png
const UPLOAD_TRANSFORMATION: &str = "q_auto/f_png";

#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage service answered and refused the upload.
    #[error("{0}")]
    Rejected(String),

    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected upload response: {0}")]
    Decode(String),
}

impl StorageError {
    /// Text safe to hand back to callers. Only the service's own refusal
    /// message is passed through; transport and decoding details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            StorageError::Rejected(message) => message.clone(),
            StorageError::Transport(_) | StorageError::Decode(_) => {
                "Cloudinary upload failed".to_string()
            }
        }
    }
}

/// Durable hosting for generated images. Failures never fail a generation.
#[async_trait]
pub trait SecondaryStorage: Send + Sync {
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredImage, StorageError>;
}

pub struct CloudinaryStorage {
    client: reqwest::Client,
    base_url: String,
    credentials: CloudinaryCredentials,
}

#[derive(Deserialize)]
struct UploadSuccess {
    public_id: String,
    secure_url: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct UploadFailure {
    error: UploadFailureDetail,
}

#[derive(Deserialize)]
struct UploadFailureDetail {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(client: reqwest::Client, base_url: &str, credentials: CloudinaryCredentials) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url, self.credentials.cloud_name
        )
    }
}

// Signed-upload signature: params sorted by name, joined as k=v&k=v, secret appended
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl SecondaryStorage for CloudinaryStorage {
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredImage, StorageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.credentials.api_secret,
        );

        let form = reqwest::multipart::Form::new()
            .text("file", data_uri.to_string())
            .text("folder", folder.to_string())
            .text("timestamp", timestamp)
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let res = self.client.post(self.upload_url()).multipart(form).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<UploadFailure>(&body)
                .map(|f| f.error.message)
                .unwrap_or_else(|_| format!("upload rejected with HTTP {}", status.as_u16()));
            return Err(StorageError::Rejected(message));
        }

        let uploaded: UploadSuccess =
            serde_json::from_str(&body).map_err(|e| StorageError::Decode(e.to_string()))?;

        Ok(StoredImage {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
            width: uploaded.width,
            height: uploaded.height,
        })
    }
}
