// [apps/coordinator/src/services/liveness.rs]
/*!
 * APARATO: LIVENESS SWEEPER
 * RESPONSABILIDAD: DEGRADAR AGENTES ATRASADOS Y DIFUNDIR SU NUEVO
 * ESTADO (C1, §4.1 "Liveness sweep").
 */

use std::time::Duration;

use chrono::Utc;
use hashwarden_domain_models::RealTimeEvent;
use tracing::info;

use crate::state::AppState;

/// Tarea de fondo que recorre el registro cada `interval` y empuja un
/// evento `AgentStatus` por cada agente recien demovido a `offline`.
pub async fn run(state: AppState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let demoted = state.registry.sweep_stale(Utc::now());
        if demoted.is_empty() {
            continue;
        }
        info!(count = demoted.len(), "liveness sweep demoted stale agents");
        for agent in demoted {
            state.events.publish(RealTimeEvent::AgentStatus {
                agent_id: agent.id,
                status: agent.status,
                last_seen: agent.last_seen,
            });
        }
    }
}
