//! Ejercita la superficie HTTP del catalogo de archivos: listado
//! autenticado y descarga en streaming sin token (§4.3, §6).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hashwarden_coordinator::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

const AUTH_TOKEN: &str = "test-token";

async fn setup() -> (axum::Router, AppState, uuid::Uuid, uuid::Uuid) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.keep();
    tokio::fs::write(root.join("dump.hash"), b"admin:5f4dcc3b5aa765d61d8327deb882cf99\n")
        .await
        .unwrap();
    tokio::fs::write(root.join("rockyou.txt"), b"password\n123456\nletmein\n")
        .await
        .unwrap();

    let state = AppState::new(root, AUTH_TOKEN.to_string());
    let hash_file = state.catalog.register_hash_file("dump", "dump.hash", "0").await.unwrap();
    let wordlist = state.catalog.register_wordlist("rockyou", "rockyou.txt").await.unwrap();

    (build(state.clone()), state, hash_file.id, wordlist.id)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn hash_file_download_requires_no_bearer_token() {
    let (app, _state, hash_file_id, _wordlist_id) = setup().await;

    let request = Request::builder()
        .uri(format!("/hashfiles/{hash_file_id}/download"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    let disposition = response.headers().get("content-disposition").unwrap().to_str().unwrap().to_string();
    assert_eq!(content_type, "application/octet-stream");
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("dump"));

    let bytes = body_bytes(response).await;
    assert_eq!(bytes, b"admin:5f4dcc3b5aa765d61d8327deb882cf99\n");
}

#[tokio::test]
async fn wordlist_download_requires_no_bearer_token() {
    let (app, _state, _hash_file_id, wordlist_id) = setup().await;

    let request = Request::builder()
        .uri(format!("/wordlists/{wordlist_id}/download"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert_eq!(bytes, b"password\n123456\nletmein\n");
}

#[tokio::test]
async fn download_of_an_unknown_id_is_not_found() {
    let (app, _state, _hash_file_id, _wordlist_id) = setup().await;

    let request = Request::builder()
        .uri(format!("/hashfiles/{}/download", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_hash_files_requires_a_bearer_token() {
    let (app, _state, _hash_file_id, _wordlist_id) = setup().await;

    let request = Request::builder()
        .uri("/hashfiles")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_reflects_registered_catalog_entries() {
    let (app, _state, hash_file_id, wordlist_id) = setup().await;

    let request = Request::builder()
        .uri("/hashfiles")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], serde_json::json!(hash_file_id));

    let request = Request::builder()
        .uri("/wordlists")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], serde_json::json!(wordlist_id));
}
