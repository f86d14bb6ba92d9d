// [apps/agent/src/loops/status_watcher.rs]
/*!
 * APARATO: SUB-JOB STATUS WATCHER
 * RESPONSABILIDAD: VIGILAR EL ESTADO DEL SUB-JOB EN EJECUCION Y
 * TERMINAR EL PROCESO DEL CRACKER SI EL COORDINADOR LO PAUSA O LO
 * CANCELA (§4.7 "Sub-job status watcher").
 */

use std::sync::Arc;
use std::time::Duration;

use hashwarden_domain_models::SubJobStatus;
use hashwarden_infra_agent_client::CoordinatorClient;
use tracing::{info, warn};

use crate::state::AgentRuntimeState;

/// Envia una senal POSIX al pid del cracker invocando el `kill(1)` del
/// sistema, evitando anadir un enlace FFI directo solo para esto.
async fn send_signal(pid: u32, posix_signal: &str) {
    let status = tokio::process::Command::new("kill")
        .args([posix_signal, &pid.to_string()])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await;
    if let Err(err) = status {
        warn!(pid, signal = posix_signal, error = %err, "failed to signal cracker process");
    }
}

pub async fn run(client: Arc<CoordinatorClient>, state: Arc<AgentRuntimeState>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    while !state.is_shutting_down() {
        ticker.tick().await;

        let current = state.current.lock().await.clone();
        let Some(current) = current else {
            continue;
        };
        let Some(pid) = current.process_id else {
            continue;
        };

        match client.get_subjob(current.subjob.id).await {
            Ok(subjob) => match subjob.status {
                SubJobStatus::Paused => {
                    info!(subjob_id = %subjob.id, pid, "sub-job paused upstream, suspending cracker");
                    send_signal(pid, "-STOP").await;
                }
                SubJobStatus::Running => {
                    send_signal(pid, "-CONT").await;
                }
                SubJobStatus::Failed | SubJobStatus::Cancelled => {
                    info!(subjob_id = %subjob.id, pid, status = subjob.status.as_str(), "sub-job terminated upstream, killing cracker");
                    send_signal(pid, "-CONT").await;
                    send_signal(pid, "-KILL").await;
                }
                SubJobStatus::Pending | SubJobStatus::Completed => {}
            },
            Err(err) => warn!(error = %err, "status watcher failed to fetch sub-job"),
        }
    }
}
