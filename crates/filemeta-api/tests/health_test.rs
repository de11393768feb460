mod helpers;

use helpers::{setup_test_app, setup_unreachable_db_app};

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();

    let response = app.server.get("/health/live").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_working_store() {
    let app = setup_test_app();

    let response = app.server.get("/health/ready").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["database"], "ready");
}

#[tokio::test]
async fn test_readiness_with_unreachable_database() {
    let server = setup_unreachable_db_app();

    let response = server.get("/health/ready").await;
    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let response = app.server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/file/post/"].is_object());
}
