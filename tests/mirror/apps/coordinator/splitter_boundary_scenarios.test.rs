//! Ejercita `/jobs/auto` de punta a punta contra escenarios de division
//! que son propensos a casos borde: sin agentes en linea, y division
//! desigual entre velocidades dispares (§4.4).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hashwarden_coordinator::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

const AUTH_TOKEN: &str = "test-token";

async fn setup_with_catalog() -> (axum::Router, AppState, uuid::Uuid, uuid::Uuid) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.keep();
    tokio::fs::write(root.join("dump.hash"), b"admin:5f4dcc3b5aa765d61d8327deb882cf99\n")
        .await
        .unwrap();
    tokio::fs::write(root.join("rockyou.txt"), b"password\n123456\nletmein\nqwerty\nadmin\nhunter2\n")
        .await
        .unwrap();

    let state = AppState::new(root, AUTH_TOKEN.to_string());
    let hash_file = state.catalog.register_hash_file("dump", "dump.hash", "0").await.unwrap();
    let wordlist = state.catalog.register_wordlist("rockyou", "rockyou.txt").await.unwrap();

    (build(state.clone()), state, hash_file.id, wordlist.id)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn auto_split_rejects_when_no_agents_are_online() {
    let (app, _state, hash_file_id, wordlist_id) = setup_with_catalog().await;

    let request = Request::builder()
        .method("POST")
        .uri("/jobs/auto")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(
            json!({
                "hash_file_id": hash_file_id,
                "wordlist_id": wordlist_id,
                "name": null,
                "hash_type": 1000,
                "attack_mode": 0,
                "rules": null,
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn auto_split_partitions_the_wordlist_across_online_agents() {
    let (app, state, hash_file_id, wordlist_id) = setup_with_catalog().await;

    let (_, key_a) = state.registry.issue_key("cpu1").unwrap();
    state.registry.claim(&key_a, None, None, Some(8081), Some("CPU".to_string())).unwrap();
    let (_, key_b) = state.registry.issue_key("gpu1").unwrap();
    state
        .registry
        .claim(&key_b, None, None, Some(8082), Some("RTX 4090".to_string()))
        .unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/jobs/auto")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(
            json!({
                "hash_file_id": hash_file_id,
                "wordlist_id": wordlist_id,
                "name": "ntlm-dump",
                "hash_type": 1000,
                "attack_mode": 0,
                "rules": null,
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let subjobs = body.as_array().unwrap();
    assert_eq!(subjobs.len(), 2);

    let total: u64 = subjobs.iter().map(|sj| sj["limit"].as_u64().unwrap()).sum();
    assert_eq!(total, 6, "windows must cover the full 6-word dictionary");

    let gpu_window = subjobs.iter().find(|sj| sj["name"].as_str().unwrap().contains("gpu1")).unwrap();
    let cpu_window = subjobs.iter().find(|sj| sj["name"].as_str().unwrap().contains("cpu1")).unwrap();
    assert!(
        gpu_window["limit"].as_u64().unwrap() > cpu_window["limit"].as_u64().unwrap(),
        "the faster agent should receive a larger window"
    );
}

#[tokio::test]
async fn auto_split_requires_a_registered_hash_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.keep(), AUTH_TOKEN.to_string());
    let (_, key) = state.registry.issue_key("cpu1").unwrap();
    state.registry.claim(&key, None, None, Some(8081), None).unwrap();
    let app = build(state);

    let request = Request::builder()
        .method("POST")
        .uri("/jobs/auto")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(
            json!({
                "hash_file_id": uuid::Uuid::new_v4(),
                "wordlist_id": uuid::Uuid::new_v4(),
                "name": null,
                "hash_type": 1000,
                "attack_mode": 0,
                "rules": null,
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
