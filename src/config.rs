use clap::Parser;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "imagegen-gateway")]
#[command(about = "Caching text-to-image gateway with optional CDN persistence")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Cache TTL in seconds (five minutes)
    #[arg(short, long, env = "CACHE_TTL", default_value_t = 300)]
    pub cache_ttl: u64,

    // Text-to-image provider base url
    #[arg(long, env = "CLIPDROP_API_URL", default_value = "https://clipdrop-api.co")]
    pub provider_url: String,

    // Provider credential. Without it every generation fails with CLIENT_SIDE_ERROR
    #[arg(long, env = "CLIPDROP_API_KEY", hide_env_values = true)]
    pub clipdrop_api_key: Option<String>,

    // Secondary storage base url
    #[arg(long, env = "CLOUDINARY_API_URL", default_value = "https://api.cloudinary.com")]
    pub cloudinary_url: String,

    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloudinary_cloud_name: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_KEY", hide_env_values = true)]
    pub cloudinary_api_key: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub cloudinary_api_secret: Option<String>,

    // Folder uploads land in
    #[arg(long, env = "UPLOAD_FOLDER", default_value = "clipdrop")]
    pub upload_folder: String,
}

// Cloudinary credentials, present only when all three parts are configured
#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Args {
    pub fn cloudinary_credentials(&self) -> Option<CloudinaryCredentials> {
        match (
            &self.cloudinary_cloud_name,
            &self.cloudinary_api_key,
            &self.cloudinary_api_secret,
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
                cloud_name: cloud_name.clone(),
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => None,
        }
    }
}
