use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorCode;

fn default_upload() -> bool {
    true
}

// POST /api/generate-image body. `prompt` stays a raw JSON value so a missing
// field and a non-string field can be told apart during validation.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default = "default_upload")]
    pub upload_to_secondary_storage: bool,
}

impl GenerateRequest {
    // Only a JSON object carries fields; any other JSON value has no prompt
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Ok(Self {
                prompt: None,
                upload_to_secondary_storage: default_upload(),
            }),
        }
    }
}

// Hosted copy of a generated image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub public_id: String,
    pub secure_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// Success body. `error`/`errorCode` only carry CACHE_HIT or a storage failure.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

// Failure body
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: ErrorCode,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub cache_entries: usize,
}
