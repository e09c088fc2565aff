//! Contract Test: GET / と POST /
//!
//! 単一レコードの上書き・部分書き込み・署名必須の契約テスト

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use sealed_record_common::config::WritePolicy;
use sealed_record_common::types::Record;
use sealed_record_store::{api, record::RecordStore, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_app(write_policy: WritePolicy) -> Router {
    let store = RecordStore::with_record(Record::default(), write_policy);
    api::create_router(AppState { store })
}

async fn post(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn signature_only_write_keeps_previous_data() {
    let app = build_app(WritePolicy::AllowSignatureOnly);

    let (status, _) = post(&app, r#"{"data":"x","signature":"s1"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post(&app, r#"{"signature":"s2"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    assert_eq!(get(&app).await, json!({"data": "x", "signature": "s2"}));
}

#[tokio::test]
async fn missing_signature_is_rejected_and_record_unchanged() {
    let app = build_app(WritePolicy::AllowSignatureOnly);
    post(&app, r#"{"data":"x","signature":"s1"}"#).await;

    let (status, body) = post(&app, r#"{"data":"y"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({"error": "Signature is required"}));

    let (status, _) = post(&app, r#"{"data":"y","signature":""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(get(&app).await, json!({"data": "x", "signature": "s1"}));
}

#[tokio::test]
async fn last_write_wins() {
    let app = build_app(WritePolicy::AllowSignatureOnly);
    post(&app, r#"{"data":"first","signature":"a1"}"#).await;
    post(&app, r#"{"data":"second","signature":"b2"}"#).await;

    assert_eq!(get(&app).await, json!({"data": "second", "signature": "b2"}));
}

#[tokio::test]
async fn require_data_policy_rejects_detached_signature() {
    let app = build_app(WritePolicy::RequireData);

    let (status, body) = post(&app, r#"{"signature":"s2"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({"error": "Data is required"}));

    assert_eq!(
        get(&app).await,
        json!({"data": "Hello World", "signature": ""})
    );
}

#[tokio::test]
async fn unreadable_body_is_reported_as_missing_signature() {
    let app = build_app(WritePolicy::AllowSignatureOnly);

    let (status, body) = post(&app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({"error": "Signature is required"}));

    let (status, body) = post(&app, r#"{"data":"x","signature":123}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({"error": "Signature is required"}));

    assert_eq!(
        get(&app).await,
        json!({"data": "Hello World", "signature": ""})
    );
}

#[tokio::test]
async fn body_without_content_type_is_reported_as_missing_signature() {
    let app = build_app(WritePolicy::AllowSignatureOnly);
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(r#"{"data":"x","signature":"s1"}"#))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({"error": "Signature is required"}));

    assert_eq!(
        get(&app).await,
        json!({"data": "Hello World", "signature": ""})
    );
}
