// [libs/domain/models/src/subjob.rs]
/*!
 * APARATO: SUB-JOB MODEL
 * RESPONSABILIDAD: UNIDAD DE EJECUCION; VENTANA [skip, skip+limit) SOBRE EL DICCIONARIO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

/// Estados de la maquina de estados de un sub-job (§4.5). Los tres ultimos
/// son terminales y de escritura unica.
#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubJobStatus {
    Pending,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl SubJobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubJobStatus::Completed | SubJobStatus::Failed | SubJobStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubJobStatus::Pending => "pending",
            SubJobStatus::Running => "running",
            SubJobStatus::Paused => "paused",
            SubJobStatus::Completed => "completed",
            SubJobStatus::Failed => "failed",
            SubJobStatus::Cancelled => "cancelled",
        }
    }
}

/// Unidad de ejecucion (§3). Hereda campos de la `Job` padre y anade la
/// ventana de asignacion y el estado de progreso propio.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubJob {
    pub id: Uuid,
    pub job_id: Uuid,
    /// Identificador del lote de creacion; todos los hermanos de un mismo
    /// split comparten este valor (§3 "Sibling set").
    pub batch_id: Uuid,
    pub name: String,
    pub hash_type: i32,
    pub attack_mode: i32,
    pub hash_file_id: Uuid,
    pub wordlist_id: Uuid,
    pub rules: Option<String>,

    pub agent_id: Uuid,
    /// Extremo inferior (inclusivo) de la ventana sobre el orden autoritativo.
    #[typeshare(serialized_as = "number")]
    pub skip: u64,
    /// Longitud de la ventana; `limit >= 1`.
    #[typeshare(serialized_as = "number")]
    pub limit: u64,

    pub status: SubJobStatus,
    #[typeshare(serialized_as = "number")]
    pub progress: u8,
    #[typeshare(serialized_as = "number")]
    pub speed: u64,
    /// Cadena de presentacion opaca (§9 nota b): puede ser RFC3339 absoluto
    /// o una duracion humana; se conserva sin reinterpretar.
    pub eta: Option<String>,
    /// Contrasena hallada o motivo de fallo legible.
    pub result: Option<String>,

    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SubJob {
    /// Rango medio-abierto `[skip, skip+limit)` asignado a este sub-job.
    pub fn window(&self) -> std::ops::Range<u64> {
        self.skip..(self.skip + self.limit)
    }

    pub fn contains_offset(&self, offset: u64) -> bool {
        self.window().contains(&offset)
    }
}

/// Reporte de progreso entrante desde un agente (§4.6, §9 nota a). Todos los
/// campos salvo `progress` y `speed` son opcionales; cualquier campo ajeno
/// que el agente envie y que este struct no conozca es ignorado por serde.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubJobUpdate {
    #[typeshare(serialized_as = "number")]
    pub progress: u8,
    #[typeshare(serialized_as = "number")]
    pub speed: u64,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub attack_mode: Option<i32>,
    #[serde(default)]
    pub rules: Option<String>,
    #[typeshare(serialized_as = "number")]
    #[serde(default)]
    pub total_words: Option<u64>,
}
