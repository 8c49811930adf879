use clap::Parser; // for cli
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use imagegen_gateway::config::Args;
use imagegen_gateway::handlers::router;
use imagegen_gateway::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();

    let state = Arc::new(AppState::from_args(&args));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Generating through {}", args.provider_url);
    info!("Cache TTL: {} seconds", args.cache_ttl);
    if args.clipdrop_api_key.is_none() {
        tracing::warn!("CLIPDROP_API_KEY not set, generation requests will fail");
    }
    if args.cloudinary_credentials().is_none() {
        info!("Cloudinary not configured, uploads disabled");
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
