// [apps/agent/src/loops/heartbeat.rs]
/*!
 * APARATO: HEARTBEAT LOOP
 * RESPONSABILIDAD: BONIFICAR `last_seen` CADA SEGUNDO HASTA EL APAGADO
 * (§4.7 "Heartbeat").
 */

use std::sync::Arc;
use std::time::Duration;

use hashwarden_infra_agent_client::CoordinatorClient;
use tracing::warn;

use crate::state::AgentRuntimeState;

pub async fn run(client: Arc<CoordinatorClient>, state: Arc<AgentRuntimeState>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    while !state.is_shutting_down() {
        ticker.tick().await;
        if let Err(err) = client.heartbeat(&state.agent_key).await {
            warn!(error = %err, "heartbeat failed");
        }
    }
}
