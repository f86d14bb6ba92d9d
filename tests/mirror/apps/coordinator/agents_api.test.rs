//! Ejercita la superficie HTTP del registro de agentes de punta a
//! punta: emision de clave, reclamo, guardian de autenticacion y la
//! ruta publica de salud (§6).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hashwarden_coordinator::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

const AUTH_TOKEN: &str = "test-token";

fn app_and_state() -> (axum::Router, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.keep(), AUTH_TOKEN.to_string());
    (build(state.clone()), state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_is_reachable_without_a_bearer_token() {
    let (app, _state) = app_and_state();
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn claim_without_a_bearer_token_is_rejected() {
    let (app, _state) = app_and_state();
    let request = Request::builder()
        .method("POST")
        .uri("/agents")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "agent_key": "deadbeef", "name": null, "ip_address": null, "port": null, "capabilities": null })
                .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn claim_against_an_issued_key_brings_the_agent_online() {
    let (app, state) = app_and_state();
    let (id, key) = state.registry.issue_key("gpu1").unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/agents")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(
            json!({
                "agent_key": key,
                "name": null,
                "ip_address": "10.0.0.9",
                "port": 8081,
                "capabilities": "GPU",
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["status"], json!("online"));
}

#[tokio::test]
async fn claim_with_an_unknown_key_is_rejected() {
    let (app, _state) = app_and_state();
    let request = Request::builder()
        .method("POST")
        .uri("/agents")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(
            json!({ "agent_key": "nonexistent", "name": null, "ip_address": null, "port": null, "capabilities": null })
                .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_reflects_claimed_agents() {
    let (app, state) = app_and_state();
    let (_, key) = state.registry.issue_key("gpu1").unwrap();
    state.registry.claim(&key, None, None, Some(8081), None).unwrap();

    let request = Request::builder()
        .uri("/agents")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
