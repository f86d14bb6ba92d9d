//! Ejercita la secuencia de arranque completa del agente contra un
//! coordinador simulado (§4.7 pasos 1-5).

use hashwarden_agent::config::Cli;
use hashwarden_agent::identity::{claim_identity, StartupError};
use hashwarden_infra_agent_client::CoordinatorClient;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(server: &str, ip: Option<&str>, capabilities: &str) -> Cli {
    Cli {
        server: server.to_string(),
        name: None,
        ip: ip.map(str::to_string),
        port: 8081,
        capabilities: capabilities.to_string(),
        agent_key: "k".repeat(64),
        upload_dir: "./uploads".to_string(),
        auth_token: "secret".to_string(),
        cracker_binary: "hashcat".to_string(),
    }
}

fn sample_agent(id: Uuid, capabilities: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "gpu1",
        "agent_key": "k".repeat(64),
        "ip_address": "10.0.0.3",
        "port": 8081,
        "original_port": 8080,
        "capabilities": capabilities,
        "speed": 0,
        "status": "online",
        "last_seen": chrono::Utc::now().to_rfc3339(),
    })
}

#[tokio::test]
async fn claim_identity_with_a_valid_key_brings_the_agent_online() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_agent(id, "CPU")))
        .mount(&server)
        .await;

    let client = CoordinatorClient::new(server.uri(), "secret");
    let cli = cli(&server.uri(), None, "CPU");

    let agent = claim_identity(&client, &cli).await.unwrap();
    assert_eq!(agent.id, id);
}

#[tokio::test]
async fn claim_identity_auto_detects_capabilities_when_requested() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_agent(id, "CPU")))
        .mount(&server)
        .await;

    let client = CoordinatorClient::new(server.uri(), "secret");
    let cli = cli(&server.uri(), None, "auto");

    // No debe entrar en panico al invocar la sonda de hardware real del
    // entorno de pruebas; el valor exacto detectado no importa aqui.
    let agent = claim_identity(&client, &cli).await.unwrap();
    assert_eq!(agent.id, id);
}

#[tokio::test]
async fn claim_identity_rejects_an_ip_that_is_not_local_without_calling_the_coordinator() {
    let server = MockServer::start().await;
    // Ninguna ruta esta montada: si el cliente llegase a llamar a la red,
    // wiremock respondera 404 y la prueba fallara con un error distinto.
    let client = CoordinatorClient::new(server.uri(), "secret");
    let cli = cli(&server.uri(), Some("203.0.113.77"), "CPU");

    let err = claim_identity(&client, &cli).await.unwrap_err();
    assert!(matches!(err, StartupError::AddressMismatch(ip) if ip == "203.0.113.77"));
}

#[tokio::test]
async fn claim_identity_surfaces_an_unknown_key_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = CoordinatorClient::new(server.uri(), "secret");
    let cli = cli(&server.uri(), None, "CPU");

    let err = claim_identity(&client, &cli).await.unwrap_err();
    assert!(matches!(err, StartupError::Rejected(_)));
}
