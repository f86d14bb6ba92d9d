// [libs/domain/models/src/agent.rs]
/*!
 * APARATO: AGENT IDENTITY MODEL
 * RESPONSABILIDAD: REPRESENTACION DE UN NODO TRABAJADOR EN EL REGISTRO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

/// Estado operativo de un agente tal como lo observa el coordinador.
#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Offline,
    Online,
    Busy,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Offline => "offline",
            AgentStatus::Online => "online",
            AgentStatus::Busy => "busy",
            AgentStatus::Error => "error",
        }
    }
}

/// Identidad de un agente, tal como la mantiene el Registro (C1).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    /// Clave de 64 caracteres hexadecimales, inmutable tras emision.
    pub agent_key: String,
    pub ip_address: Option<String>,
    pub port: u16,
    /// Puerto original en disco, restaurado en el shutdown (§4.7).
    pub original_port: u16,
    /// Cadena libre: "CPU", "GPU", "RTX 4090", etc.
    pub capabilities: String,
    /// Hashes por segundo, medidos o estimados.
    pub speed: u64,
    pub status: AgentStatus,
    pub last_seen: DateTime<Utc>,
}

impl Agent {
    pub fn is_stale(&self, now: DateTime<Utc>, liveness_window: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_seen) > liveness_window
    }
}
