use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use imagegen_gateway::cache::PromptCache;
use imagegen_gateway::generator::ImageGenerator;
use imagegen_gateway::handlers::router;
use imagegen_gateway::models::StoredImage;
use imagegen_gateway::provider::{GeneratedImage, ImageProvider, ProviderError};
use imagegen_gateway::state::AppState;
use imagegen_gateway::storage::{SecondaryStorage, StorageError};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::util::ServiceExt;

pub const FIVE_MINUTES: Duration = Duration::from_secs(300);

/// What the fake provider answers with.
#[derive(Clone)]
pub enum ProviderReply {
    Image,
    Status(u16),
    NoCredentials,
}

pub struct CountingProvider {
    reply: ProviderReply,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(reply: ProviderReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for CountingProvider {
    async fn text_to_image(&self, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            // distinct bytes per call so a cached answer is distinguishable from a fresh one
            ProviderReply::Image => Ok(GeneratedImage {
                bytes: format!("{}#{}", prompt, n).into_bytes(),
                content_type: "image/png".to_string(),
            }),
            ProviderReply::Status(401) => Err(ProviderError::Unauthorized),
            ProviderReply::Status(429) => Err(ProviderError::RateLimited),
            ProviderReply::Status(400) => Err(ProviderError::BadRequest),
            ProviderReply::Status(status) => Err(ProviderError::Status {
                status: *status,
                body: "internal provider failure".to_string(),
            }),
            ProviderReply::NoCredentials => Err(ProviderError::MissingCredentials),
        }
    }
}

#[derive(Clone)]
pub enum StorageReply {
    Stored,
    Rejected,
    Broken,
}

pub struct CountingStorage {
    reply: StorageReply,
    calls: AtomicUsize,
}

impl CountingStorage {
    pub fn new(reply: StorageReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecondaryStorage for CountingStorage {
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredImage, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(data_uri.starts_with("data:image/png;base64,"));
        match self.reply {
            StorageReply::Stored => Ok(StoredImage {
                public_id: format!("{}/generated", folder),
                secure_url: "https://cdn.example/generated.png".to_string(),
                width: Some(1024),
                height: Some(768),
            }),
            StorageReply::Rejected => Err(StorageError::Rejected("Invalid Signature".to_string())),
            StorageReply::Broken => Err(StorageError::Decode("expected value".to_string())),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub fn create_test_app(
    provider: Arc<CountingProvider>,
    storage: Option<Arc<CountingStorage>>,
    ttl: Duration,
) -> TestApp {
    let generator = ImageGenerator::new(
        PromptCache::new(ttl),
        provider,
        storage.map(|s| s as Arc<dyn SecondaryStorage>),
        "clipdrop",
    );
    let state = Arc::new(AppState::new(generator));
    TestApp {
        router: router(state.clone()),
        state,
    }
}

pub async fn post_json(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn generate(router: &Router, body: Value) -> (StatusCode, Value) {
    post_json(router, "/api/generate-image", &body.to_string()).await
}
