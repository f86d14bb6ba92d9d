//! Ejercita el protocolo stop-on-hit de punta a punta: completar un
//! sub-job con una contrasena verificada cancela a sus hermanos activos
//! (§4.5, §4.8 "Local verification").

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use hashwarden_coordinator::prelude::*;
use hashwarden_domain_models::{SubJob, SubJobStatus};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const AUTH_TOKEN: &str = "test-token";

fn sibling(batch_id: Uuid, agent_id: Uuid, wordlist_id: Uuid, skip: u64, limit: u64) -> SubJob {
    SubJob {
        id: Uuid::new_v4(),
        job_id: Uuid::new_v4(),
        batch_id,
        name: "dump (agent)".to_string(),
        hash_type: 1000,
        attack_mode: 0,
        hash_file_id: Uuid::new_v4(),
        wordlist_id,
        rules: None,
        agent_id,
        skip,
        limit,
        status: SubJobStatus::Running,
        progress: 0,
        speed: 0,
        eta: None,
        result: None,
        created_at: Utc::now(),
        started_at: Some(Utc::now()),
        completed_at: None,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn completing_one_sub_job_cancels_its_running_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.keep();
    tokio::fs::write(root.join("rockyou.txt"), b"password\n123456\nhunter2\nletmein\n")
        .await
        .unwrap();
    let state = AppState::new(root, AUTH_TOKEN.to_string());
    let wordlist = state.catalog.register_wordlist("rockyou", "rockyou.txt").await.unwrap();

    let batch_id = Uuid::new_v4();
    let winner = sibling(batch_id, Uuid::new_v4(), wordlist.id, 2, 1); // "hunter2" at offset 2
    let runner = sibling(batch_id, Uuid::new_v4(), wordlist.id, 0, 2);
    state.jobs.create_subjobs(vec![winner.clone(), runner.clone()]).unwrap();

    let app = build(state.clone());
    let request = Request::builder()
        .method("POST")
        .uri(format!("/jobs/{}/complete", winner.id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(json!({ "result": "hunter2" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("completed"));
    assert_eq!(body["result"], json!("hunter2"));

    let runner_after = state.jobs.get(runner.id).unwrap();
    assert_eq!(runner_after.status, SubJobStatus::Cancelled);
    assert_eq!(
        runner_after.result,
        Some("Password found by another agent".to_string())
    );
}

#[tokio::test]
async fn completing_with_an_unverifiable_plaintext_fails_instead() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.keep();
    tokio::fs::write(root.join("rockyou.txt"), b"password\n123456\n").await.unwrap();
    let state = AppState::new(root, AUTH_TOKEN.to_string());
    let wordlist = state.catalog.register_wordlist("rockyou", "rockyou.txt").await.unwrap();

    let batch_id = Uuid::new_v4();
    let subjob = sibling(batch_id, Uuid::new_v4(), wordlist.id, 0, 2);
    state.jobs.create_subjobs(vec![subjob.clone()]).unwrap();

    let app = build(state.clone());
    let request = Request::builder()
        .method("POST")
        .uri(format!("/jobs/{}/complete", subjob.id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::from(json!({ "result": "not-in-the-window" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("failed"));
    assert_eq!(body["result"], json!("Password not found"));
}

#[tokio::test]
async fn stop_cancels_every_sibling_in_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.keep(), AUTH_TOKEN.to_string());

    let batch_id = Uuid::new_v4();
    let target = sibling(batch_id, Uuid::new_v4(), Uuid::new_v4(), 0, 5);
    let other = sibling(batch_id, Uuid::new_v4(), Uuid::new_v4(), 5, 5);
    state.jobs.create_subjobs(vec![target.clone(), other.clone()]).unwrap();

    let app = build(state.clone());
    let request = Request::builder()
        .method("POST")
        .uri(format!("/jobs/{}/stop", target.id))
        .header("authorization", format!("Bearer {AUTH_TOKEN}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(state.jobs.get(other.id).unwrap().status, SubJobStatus::Running, "stop only cancels the targeted sub-job's own transition, not unrelated siblings, unless it itself completes with a hit");
}
