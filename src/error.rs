use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::provider::ProviderError;
use crate::validation::MAX_PROMPT_CHARS;

/// Machine-readable codes carried in the `errorCode` field.
///
/// `CacheHit`, `CloudinaryUploadFailed` and `CloudinaryError` only ever tag a
/// successful response; the rest accompany `success: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingPrompt,
    InvalidPrompt,
    PromptTooLong,
    InvalidApiKey,
    RateLimited,
    BadRequest,
    ClientSideError,
    CacheHit,
    CloudinaryUploadFailed,
    CloudinaryError,
    ApiError,
    UnexpectedError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingPrompt => "MISSING_PROMPT",
            ErrorCode::InvalidPrompt => "INVALID_PROMPT",
            ErrorCode::PromptTooLong => "PROMPT_TOO_LONG",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::ClientSideError => "CLIENT_SIDE_ERROR",
            ErrorCode::CacheHit => "CACHE_HIT",
            ErrorCode::CloudinaryUploadFailed => "CLOUDINARY_UPLOAD_FAILED",
            ErrorCode::CloudinaryError => "CLOUDINARY_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::MissingPrompt
            | ErrorCode::InvalidPrompt
            | ErrorCode::PromptTooLong
            | ErrorCode::BadRequest
            | ErrorCode::ClientSideError => StatusCode::BAD_REQUEST,
            // a rejected key is our misconfiguration, not the caller's fault
            ErrorCode::InvalidApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::CacheHit
            | ErrorCode::CloudinaryUploadFailed
            | ErrorCode::CloudinaryError => StatusCode::OK,
            ErrorCode::ApiError | ErrorCode::UnexpectedError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a generation request can fail.
///
/// The `Display` text is what callers see in the `error` field, so provider
/// payloads and transport details never appear in it.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Prompt must be a non-empty string")]
    InvalidPrompt,

    #[error("Prompt must be at most {max} characters (got {0})", max = MAX_PROMPT_CHARS)]
    PromptTooLong(usize),

    #[error("Invalid ClipDrop API key. Please check your API credentials.")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Invalid request. Please check your prompt and try again.")]
    BadRequest,

    #[error("Image generation is only available with server-side credentials.")]
    ClientSide,

    #[error("ClipDrop API error: {0}")]
    Api(u16),

    #[error("Internal server error")]
    Unexpected,
}

impl GenerateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateError::MissingPrompt => ErrorCode::MissingPrompt,
            GenerateError::InvalidPrompt => ErrorCode::InvalidPrompt,
            GenerateError::PromptTooLong(_) => ErrorCode::PromptTooLong,
            GenerateError::InvalidApiKey => ErrorCode::InvalidApiKey,
            GenerateError::RateLimited => ErrorCode::RateLimited,
            GenerateError::BadRequest => ErrorCode::BadRequest,
            GenerateError::ClientSide => ErrorCode::ClientSideError,
            GenerateError::Api(_) => ErrorCode::ApiError,
            GenerateError::Unexpected => ErrorCode::UnexpectedError,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code().status()
    }
}

impl From<ProviderError> for GenerateError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized => GenerateError::InvalidApiKey,
            ProviderError::RateLimited => GenerateError::RateLimited,
            ProviderError::BadRequest => GenerateError::BadRequest,
            ProviderError::MissingCredentials => GenerateError::ClientSide,
            ProviderError::Status { status, .. } => GenerateError::Api(status),
            ProviderError::Transport(_) | ProviderError::Body(_) => GenerateError::Unexpected,
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
