// [apps/coordinator/src/handlers/agents.rs]
/*!
 * APARATO: AGENT HANDLERS
 * RESPONSABILIDAD: SUPERFICIE HTTP DEL REGISTRO DE AGENTES (C1, §6).
 */

use axum::extract::{Path, State};
use axum::Json;
use hashwarden_domain_models::{
    Agent, ClaimAgentRequest, HeartbeatRequest, RealTimeEvent, SetAgentSpeedRequest,
    SetAgentStatusRequest, UpdateAgentDataRequest,
};
use uuid::Uuid;

use crate::error::CoordinatorError;
use crate::state::AppState;

fn publish_status(state: &AppState, agent: &Agent) {
    state.events.publish(RealTimeEvent::AgentStatus {
        agent_id: agent.id,
        status: agent.status,
        last_seen: agent.last_seen,
    });
}

/// `POST /agents`.
pub async fn claim(
    State(state): State<AppState>,
    Json(req): Json<ClaimAgentRequest>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state.registry.claim(
        &req.agent_key,
        req.name,
        req.ip_address,
        req.port,
        req.capabilities,
    )?;
    publish_status(&state, &agent);
    Ok(Json(agent))
}

/// `POST /agents/heartbeat`.
pub async fn heartbeat(
    State(state): State<AppState>,
    Json(req): Json<HeartbeatRequest>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state.registry.heartbeat(&req.agent_key)?;
    publish_status(&state, &agent);
    Ok(Json(agent))
}

/// `POST /agents/update-data`.
pub async fn update_data(
    State(state): State<AppState>,
    Json(req): Json<UpdateAgentDataRequest>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state
        .registry
        .update_data(&req.agent_key, req.ip_address, req.port, req.capabilities)?;
    Ok(Json(agent))
}

/// `PUT /agents/:id/status`.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetAgentStatusRequest>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state.registry.set_status(id, req.status)?;
    publish_status(&state, &agent);
    Ok(Json(agent))
}

/// `PUT /agents/:id/speed`.
pub async fn set_speed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetAgentSpeedRequest>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state.registry.set_speed(id, req.speed)?;
    state.events.publish(RealTimeEvent::AgentSpeed {
        agent_id: agent.id,
        speed: agent.speed,
    });
    Ok(Json(agent))
}

/// `GET /agents` — listado completo, usado por el dashboard y por las
/// pruebas de integracion (no forma parte de la tabla §6 original pero
/// es la contraparte natural de `list()`, §4.1).
pub async fn list(State(state): State<AppState>) -> Json<Vec<Agent>> {
    Json(state.registry.list())
}

/// `POST /agents/:id/shutdown` — restaura el puerto en reposo y marca el
/// agente como `offline` (§4.7 "Shutdown sequence"); no hay fila en la
/// tabla §6 original para esto, pero sin una ruta HTTP el agente no
/// tiene forma de pedirle al registro que deshaga el puerto operativo
/// antes de salir.
pub async fn shutdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agent>, CoordinatorError> {
    let agent = state.registry.restore_original_port(id)?;
    publish_status(&state, &agent);
    Ok(Json(agent))
}
