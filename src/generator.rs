use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::PromptCache;
use crate::error::{ErrorCode, GenerateError};
use crate::metrics::{CACHE_HITS, CACHE_MISSES, PROVIDER_LATENCY, UPLOAD_FAILURES};
use crate::models::{GenerateRequest, GenerateResponse};
use crate::provider::ImageProvider;
use crate::storage::{SecondaryStorage, StorageError};
use crate::validation::{preview, validate_prompt};

/// Validates generation requests and routes them through the prompt cache to
/// the provider, optionally persisting fresh images to secondary storage.
///
/// Identical prompts arriving together are not coalesced: each misses, each
/// calls the provider, and the last `set` wins.
pub struct ImageGenerator {
    cache: PromptCache,
    provider: Arc<dyn ImageProvider>,
    storage: Option<Arc<dyn SecondaryStorage>>,
    upload_folder: String,
}

impl ImageGenerator {
    pub fn new(
        cache: PromptCache,
        provider: Arc<dyn ImageProvider>,
        storage: Option<Arc<dyn SecondaryStorage>>,
        upload_folder: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            provider,
            storage,
            upload_folder: upload_folder.into(),
        }
    }

    pub fn cache(&self) -> &PromptCache {
        &self.cache
    }

    /// Entry point for a raw request body.
    pub async fn handle_generate(&self, body: &[u8]) -> Result<GenerateResponse, GenerateError> {
        let request = GenerateRequest::from_body(body).map_err(|e| {
            warn!(error = %e, "Unreadable generate request body");
            GenerateError::Unexpected
        })?;

        let prompt = validate_prompt(request.prompt.as_ref())?;
        self.generate(&prompt, request.upload_to_secondary_storage).await
    }

    /// Cache-or-generate for an already validated, trimmed prompt.
    pub async fn generate(
        &self,
        prompt: &str,
        upload: bool,
    ) -> Result<GenerateResponse, GenerateError> {
        if let Some(image_url) = self.cache.get(prompt) {
            CACHE_HITS.inc();
            info!(prompt = %preview(prompt), "Cache hit");
            let mut response = success(prompt, image_url);
            response.error_code = Some(ErrorCode::CacheHit);
            return Ok(response);
        }
        CACHE_MISSES.inc();
        info!(prompt = %preview(prompt), "Cache miss, calling provider");

        let start = Instant::now();
        let result = self.provider.text_to_image(prompt).await;
        let elapsed = start.elapsed();
        PROVIDER_LATENCY.observe(elapsed.as_secs_f64());

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                error!(
                    error = %e,
                    elapsed_ms = elapsed.as_millis() as u64,
                    prompt = %preview(prompt),
                    "Image generation failed"
                );
                return Err(e.into());
            }
        };
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = image.bytes.len(),
            "Image generated"
        );

        let image_url = image.to_data_uri();
        self.cache.set(prompt, &image_url);
        let mut response = success(prompt, image_url);

        if !upload {
            return Ok(response);
        }
        let Some(storage) = &self.storage else {
            debug!("Secondary storage not configured, skipping upload");
            return Ok(response);
        };

        match storage.upload(&response.image_url, &self.upload_folder).await {
            Ok(stored) => {
                info!(public_id = %stored.public_id, "Image uploaded");
                response.public_id = Some(stored.public_id);
                response.secure_url = Some(stored.secure_url);
                response.width = stored.width;
                response.height = stored.height;
            }
            Err(e) => {
                // generation already succeeded, the upload failure is reported alongside it
                UPLOAD_FAILURES.inc();
                warn!(error = %e, "Secondary storage upload failed");
                response.error_code = Some(match e {
                    StorageError::Rejected(_) => ErrorCode::CloudinaryUploadFailed,
                    StorageError::Transport(_) | StorageError::Decode(_) => {
                        ErrorCode::CloudinaryError
                    }
                });
                response.error = Some(e.public_message());
            }
        }

        Ok(response)
    }
}

fn success(prompt: &str, image_url: String) -> GenerateResponse {
    GenerateResponse {
        success: true,
        image_url,
        public_id: None,
        secure_url: None,
        width: None,
        height: None,
        prompt: prompt.to_string(),
        error: None,
        error_code: None,
    }
}
