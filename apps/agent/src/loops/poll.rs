// [apps/agent/src/loops/poll.rs]
/*!
 * APARATO: JOB POLL LOOP
 * RESPONSABILIDAD: SONDEAR UN SUB-JOB PENDIENTE CADA 10S MIENTRAS EL
 * AGENTE ESTA OCIOSO Y ENTREGARLO AL EJECUTOR (§4.7 "Job poll").
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hashwarden_domain_models::AgentStatus;
use hashwarden_infra_agent_client::CoordinatorClient;
use tracing::{info, warn};

use crate::loops::executor;
use crate::state::AgentRuntimeState;

pub async fn run(
    client: Arc<CoordinatorClient>,
    state: Arc<AgentRuntimeState>,
    cracker_binary: PathBuf,
    upload_dir: PathBuf,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    while !state.is_shutting_down() {
        ticker.tick().await;

        if !state.is_idle().await {
            continue;
        }

        match client.next_for_agent(state.agent_id).await {
            Ok(Some(subjob)) => {
                info!(subjob_id = %subjob.id, "claimed pending sub-job");
                if let Err(err) = client.set_status(state.agent_id, AgentStatus::Busy).await {
                    warn!(error = %err, "failed to mark agent busy");
                }
                executor::process(
                    client.clone(),
                    state.clone(),
                    cracker_binary.clone(),
                    upload_dir.clone(),
                    subjob,
                )
                .await;
                if let Err(err) = client.set_status(state.agent_id, AgentStatus::Online).await {
                    warn!(error = %err, "failed to mark agent idle again");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "job poll failed"),
        }
    }
}
