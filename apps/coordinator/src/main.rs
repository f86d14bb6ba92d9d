// [apps/coordinator/src/main.rs]
/*!
 * APARATO: COORDINATOR ENTRY POINT
 * RESPONSABILIDAD: ARRANQUE DEL PROCESO: CONFIGURACION, ESTADO, BARRIDO
 * DE LIVENESS Y SERVIDOR HTTP (§6, §7 AMBIENT).
 */

use clap::Parser;
use hashwarden_coordinator::prelude::*;
use hashwarden_coordinator::config::Command;
use hashwarden_coordinator::services::liveness;
use hashwarden_shared_telemetry::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("hashwarden_coordinator");

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(async move {
        let state = AppState::new(cli.catalog_root.clone(), cli.auth_token.clone());

        match cli.command.unwrap_or(Command::Serve) {
            Command::IssueKey { name } => {
                let (id, key) = state.registry.issue_key(name)?;
                println!("agent_id={id}\nagent_key={key}");
                return Ok(());
            }
            Command::Serve => {}
        }

        let sweep_interval = std::time::Duration::from_secs(cli.liveness_sweep_interval_seconds);
        tokio::spawn(liveness::run(state.clone(), sweep_interval));

        let router = build(state);
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
        info!(port = cli.port, "coordinator listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
