mod health;
mod metrics;
mod generate;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use generate::generate_handler;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::GenerateError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate-image", post(generate_handler))
        // path the original frontend still posts to
        .route("/api/clipdrop/text-to-image", post(generate_handler))
        .route("/metrics", get(metrics_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// A panic anywhere below becomes the generic 500 body, never a dropped connection
fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    GenerateError::Unexpected.into_response()
}
