//! Ejercita `executor::process` de punta a punta contra un coordinador
//! simulado y un binario de cracker simulado (un script de shell en
//! lugar de hashcat real), cubriendo los tres desenlaces clasificados
//! por codigo de salida (§4.7 "Executor", §4.8).

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use hashwarden_agent::loops::executor;
use hashwarden_agent::prelude::AgentRuntimeState;
use hashwarden_domain_models::{SubJob, SubJobStatus};
use hashwarden_infra_agent_client::CoordinatorClient;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path as wpath};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Escribe un script ejecutable que, al invocarse con los argumentos que
/// `CrackRequest::args_for` produce, escribe `plaintext` (si no es nulo)
/// en el archivo pasado tras `-o` y termina con `exit_code`.
async fn write_fake_cracker(dir: &Path, exit_code: i32, plaintext: Option<&str>) -> PathBuf {
    let script_path = dir.join("fake-hashcat.sh");
    let body = match plaintext {
        Some(p) => format!(
            "#!/bin/sh\nwhile [ \"$1\" != \"-o\" ]; do shift; done\nshift\nout=\"$1\"\necho '{p}' > \"$out\"\nexit {exit_code}\n"
        ),
        None => format!("#!/bin/sh\nexit {exit_code}\n"),
    };
    tokio::fs::write(&script_path, body).await.unwrap();
    let mut perms = tokio::fs::metadata(&script_path).await.unwrap().permissions();
    perms.set_mode(0o755);
    tokio::fs::set_permissions(&script_path, perms).await.unwrap();
    script_path
}

fn subjob(hash_file_id: Uuid, wordlist_id: Uuid) -> SubJob {
    SubJob {
        id: Uuid::new_v4(),
        job_id: Uuid::new_v4(),
        batch_id: Uuid::new_v4(),
        name: "dump (agent)".to_string(),
        hash_type: 1000,
        attack_mode: 0,
        hash_file_id,
        wordlist_id,
        rules: None,
        agent_id: Uuid::new_v4(),
        skip: 0,
        limit: 4,
        status: SubJobStatus::Pending,
        progress: 0,
        speed: 0,
        eta: None,
        result: None,
        created_at: Utc::now(),
        started_at: None,
        completed_at: None,
    }
}

async fn seed_cached_inputs(upload_dir: &Path, hash_file_id: Uuid, wordlist_id: Uuid) {
    let hash_dir = upload_dir.join("hash-files");
    let wordlist_dir = upload_dir.join("wordlists");
    tokio::fs::create_dir_all(&hash_dir).await.unwrap();
    tokio::fs::create_dir_all(&wordlist_dir).await.unwrap();
    tokio::fs::write(
        hash_dir.join(hash_file_id.to_string()),
        b"admin:5f4dcc3b5aa765d61d8327deb882cf99\n",
    )
    .await
    .unwrap();
    tokio::fs::write(
        wordlist_dir.join(wordlist_id.to_string()),
        b"password\n123456\nletmein\nqwerty\n",
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn a_hit_is_reported_as_completed_with_the_plaintext() {
    let server = MockServer::start().await;
    let sj = subjob(Uuid::new_v4(), Uuid::new_v4());

    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/start", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "running", None)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/complete", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "completed", Some("hunter2"))))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(wpath(format!("/jobs/{}/data", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "running", None)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_path_buf();
    seed_cached_inputs(&upload_dir, sj.hash_file_id, sj.wordlist_id).await;
    let cracker = write_fake_cracker(&upload_dir, 0, Some("hunter2")).await;

    let client = Arc::new(CoordinatorClient::new(server.uri(), "secret"));
    let state = Arc::new(AgentRuntimeState::new(sj.agent_id, "k".repeat(64)));

    executor::process(client, state.clone(), cracker, upload_dir, sj.clone()).await;

    assert!(state.current.lock().await.is_none(), "current slot must be cleared after processing");
}

#[tokio::test]
async fn an_exhausted_window_is_reported_as_failed_with_reason_exhausted() {
    let server = MockServer::start().await;
    let sj = subjob(Uuid::new_v4(), Uuid::new_v4());

    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/start", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "running", None)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/fail", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "failed", Some("exhausted"))))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_path_buf();
    seed_cached_inputs(&upload_dir, sj.hash_file_id, sj.wordlist_id).await;
    let cracker = write_fake_cracker(&upload_dir, 1, None).await;

    let client = Arc::new(CoordinatorClient::new(server.uri(), "secret"));
    let state = Arc::new(AgentRuntimeState::new(sj.agent_id, "k".repeat(64)));

    executor::process(client, state.clone(), cracker, upload_dir, sj.clone()).await;

    assert!(state.current.lock().await.is_none());
}

#[tokio::test]
async fn a_fatal_exit_code_is_reported_as_a_failure() {
    let server = MockServer::start().await;
    let sj = subjob(Uuid::new_v4(), Uuid::new_v4());

    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/start", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "running", None)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(wpath(format!("/jobs/{}/fail", sj.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_subjob(&sj, "failed", Some("cracker exited with code 9"))))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_path_buf();
    seed_cached_inputs(&upload_dir, sj.hash_file_id, sj.wordlist_id).await;
    let cracker = write_fake_cracker(&upload_dir, 9, None).await;

    let client = Arc::new(CoordinatorClient::new(server.uri(), "secret"));
    let state = Arc::new(AgentRuntimeState::new(sj.agent_id, "k".repeat(64)));

    executor::process(client, state.clone(), cracker, upload_dir, sj.clone()).await;

    assert!(state.current.lock().await.is_none());
}

fn sample_subjob(sj: &SubJob, status: &str, result: Option<&str>) -> serde_json::Value {
    json!({
        "id": sj.id,
        "job_id": sj.job_id,
        "batch_id": sj.batch_id,
        "name": sj.name,
        "hash_type": sj.hash_type,
        "attack_mode": sj.attack_mode,
        "hash_file_id": sj.hash_file_id,
        "wordlist_id": sj.wordlist_id,
        "rules": sj.rules,
        "agent_id": sj.agent_id,
        "skip": sj.skip,
        "limit": sj.limit,
        "status": status,
        "progress": 100,
        "speed": 0,
        "eta": null,
        "result": result,
        "created_at": sj.created_at.to_rfc3339(),
        "started_at": sj.created_at.to_rfc3339(),
        "completed_at": sj.created_at.to_rfc3339(),
    })
}
