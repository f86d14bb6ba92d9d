// [apps/agent/src/main.rs]
/*!
 * APARATO: AGENT ENTRY POINT
 * RESPONSABILIDAD: ARRANQUE DEL PROCESO: RECLAMO DE IDENTIDAD,
 * INVENTARIO LOCAL INICIAL Y LANZAMIENTO DE LOS CINCO BUCLES
 * COOPERATIVOS (§4.7).
 */

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use hashwarden_agent::prelude::*;
use hashwarden_infra_agent_client::CoordinatorClient;
use hashwarden_shared_telemetry::init_tracing;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("hashwarden_agent");

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(CoordinatorClient::new(cli.server.clone(), cli.auth_token.clone()));

    let agent = match hashwarden_agent::identity::claim_identity(&client, &cli).await {
        Ok(agent) => agent,
        Err(err) => {
            error!(error = %err, "startup validation failed");
            return Err(Box::new(err));
        }
    };
    info!(agent_id = %agent.id, name = %agent.name, "agent identity claimed");

    let upload_dir = std::path::PathBuf::from(&cli.upload_dir);
    if let Err(err) = hashwarden_agent::scan::scan_local_area(&upload_dir).await {
        error!(error = %err, "initial local area scan failed");
    }

    let state = Arc::new(AgentRuntimeState::new(agent.id, agent.agent_key.clone()));

    let heartbeat = tokio::spawn(hashwarden_agent::loops::heartbeat::run(
        client.clone(),
        state.clone(),
        Duration::from_secs(1),
    ));
    let file_watcher = tokio::spawn(hashwarden_agent::loops::file_watcher::run(
        client.clone(),
        state.clone(),
        upload_dir.clone(),
        Duration::from_secs(300),
    ));
    let poll = tokio::spawn(hashwarden_agent::loops::poll::run(
        client.clone(),
        state.clone(),
        std::path::PathBuf::from(&cli.cracker_binary),
        upload_dir.clone(),
        Duration::from_secs(10),
    ));
    let status_watcher = tokio::spawn(hashwarden_agent::loops::status_watcher::run(
        client.clone(),
        state.clone(),
        Duration::from_secs(5),
    ));

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, entering graceful shutdown sequence");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received, entering graceful shutdown sequence");
        }
    }

    state.request_shutdown();
    if let Err(err) = client.shutdown_agent(state.agent_id).await {
        error!(error = %err, "failed to restore resting port during shutdown");
    }

    heartbeat.abort();
    file_watcher.abort();
    poll.abort();
    status_watcher.abort();

    info!("shutdown sequence concluded");
    Ok(())
}
