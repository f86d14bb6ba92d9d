// [libs/domain/models/src/events.rs]
/*!
 * APARATO: EVENT BUS PAYLOADS
 * RESPONSABILIDAD: LOS CUATRO EVENTOS DE DIFUSION DEL PROGRESS & EVENT BUS (C6)
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

use crate::agent::AgentStatus;
use crate::subjob::SubJobStatus;

/// Evento de difusion (§4.6). Serializado en JSON sobre el upgrade de
/// WebSocket del coordinador; el tag `type` identifica la variante para
/// el consumidor TypeScript del dashboard.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealTimeEvent {
    JobProgress {
        sub_job_id: Uuid,
        #[typeshare(serialized_as = "number")]
        progress: u8,
        #[typeshare(serialized_as = "number")]
        speed: u64,
        eta: Option<String>,
        status: SubJobStatus,
    },
    JobStatus {
        sub_job_id: Uuid,
        status: SubJobStatus,
        result: Option<String>,
    },
    AgentStatus {
        agent_id: Uuid,
        status: AgentStatus,
        last_seen: DateTime<Utc>,
    },
    AgentSpeed {
        agent_id: Uuid,
        #[typeshare(serialized_as = "number")]
        speed: u64,
    },
}
