use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{FAILURES, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::state::AppState;

pub async fn generate_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let result = state.generator.handle_generate(&body).await;

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            FAILURES.with_label_values(&[e.code().as_str()]).inc();
            e.into_response()
        }
    }
}
