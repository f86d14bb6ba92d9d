// [libs/domain/models/src/wire.rs]
/*!
 * APARATO: HTTP WIRE CONTRACTS
 * RESPONSABILIDAD: CUERPOS DE PETICION/RESPUESTA DE LA SUPERFICIE HTTP (§6)
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

use crate::agent::AgentStatus;

/// `POST /agents` — reclama o registra un agente contra una clave ya emitida.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAgentRequest {
    pub agent_key: String,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<u16>,
    pub capabilities: Option<String>,
}

/// `POST /agents/heartbeat`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    pub agent_key: String,
}

/// `POST /agents/update-data`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAgentDataRequest {
    pub agent_key: String,
    pub ip_address: Option<String>,
    pub port: Option<u16>,
    pub capabilities: Option<String>,
}

/// `PUT /agents/:id/status`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAgentStatusRequest {
    pub status: AgentStatus,
}

/// `PUT /agents/:id/speed`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAgentSpeedRequest {
    #[typeshare(serialized_as = "number")]
    pub speed: u64,
}

/// `POST /jobs/auto` — divide contra todos los agentes en linea.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoSplitRequest {
    pub hash_file_id: Uuid,
    pub wordlist_id: Uuid,
    pub name: Option<String>,
    pub hash_type: Option<i32>,
    pub attack_mode: Option<i32>,
    pub rules: Option<String>,
}

/// `PUT /jobs/:id/progress` — tick de progreso minimo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRequest {
    #[typeshare(serialized_as = "number")]
    pub progress: u8,
    #[typeshare(serialized_as = "number")]
    pub speed: u64,
    pub eta: Option<String>,
}

/// `PUT /jobs/:id/data` — tick enriquecido; el agente es explicito porque un
/// sub-job solo puede ser actualizado por el agente que lo posee (§4.6).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDataRequest {
    pub agent_id: Uuid,
    #[typeshare(serialized_as = "number")]
    pub progress: u8,
    #[typeshare(serialized_as = "number")]
    pub speed: u64,
    pub eta: Option<String>,
    pub attack_mode: Option<i32>,
    pub rules: Option<String>,
    #[typeshare(serialized_as = "number")]
    pub total_words: Option<u64>,
}

/// `POST /jobs/:id/complete`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub result: String,
}

/// `POST /jobs/:id/fail`
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailRequest {
    pub reason: String,
}

/// Forma que toma un diccionario al ser consumido por un agente (§4.3): ya
/// sea un archivo materializado que se descarga por id, o una carga inline
/// quando no existe un id de catalogo (trabajos ad-hoc).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordlistPayload {
    Materialized { wordlist_id: Uuid },
    Inline { words: Vec<String> },
}
