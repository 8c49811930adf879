use crate::fixtures::{CountingProvider, FIVE_MINUTES, ProviderReply, create_test_app, generate};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use imagegen_gateway::models::HealthResponse;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_health_reports_cache_entries() {
    let provider = CountingProvider::new(ProviderReply::Image);
    let app = create_test_app(provider, None, FIVE_MINUTES);

    generate(&app.router, json!({"prompt": "one"})).await;
    generate(&app.router, json!({"prompt": "two"})).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.cache_entries, 2);
}

#[tokio::test]
async fn test_metrics_exposes_request_counter() {
    let provider = CountingProvider::new(ProviderReply::Image);
    let app = create_test_app(provider, None, FIVE_MINUTES);

    generate(&app.router, json!({"prompt": "counted"})).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("imagegen_requests_total"));
    assert!(text.contains("imagegen_cache_misses_total"));
}
