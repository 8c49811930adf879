use std::sync::Arc;
use std::time::Duration;

use crate::cache::PromptCache;
use crate::config::Args;
use crate::generator::ImageGenerator;
use crate::provider::ClipDropProvider;
use crate::storage::{CloudinaryStorage, SecondaryStorage};

// app's shared state
pub struct AppState {
    pub generator: ImageGenerator,
}

impl AppState {
    pub fn new(generator: ImageGenerator) -> Self {
        Self { generator }
    }

    // Wire the real ClipDrop and Cloudinary clients from CLI/env config
    pub fn from_args(args: &Args) -> Self {
        let client = reqwest::Client::new();

        let provider = Arc::new(ClipDropProvider::new(
            client.clone(),
            &args.provider_url,
            args.clipdrop_api_key.clone(),
        ));

        let storage = args.cloudinary_credentials().map(|creds| {
            Arc::new(CloudinaryStorage::new(client, &args.cloudinary_url, creds))
                as Arc<dyn SecondaryStorage>
        });

        let generator = ImageGenerator::new(
            PromptCache::new(Duration::from_secs(args.cache_ttl)),
            provider,
            storage,
            args.upload_folder.clone(),
        );

        Self::new(generator)
    }
}
