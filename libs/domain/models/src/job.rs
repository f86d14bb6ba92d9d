// [libs/domain/models/src/job.rs]
/*!
 * APARATO: JOB TEMPLATE MODEL
 * RESPONSABILIDAD: INTENCION DE USUARIO, PLANTILLA PARA LA DIVISION EN SUB-JOBS
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

/// Una `Job` no se ejecuta por si misma (§3); es la plantilla que el
/// Splitter (C4) consume para generar sus `SubJob` hijos.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub name: String,
    pub hash_type: i32,
    pub attack_mode: i32,
    pub hash_file_id: Uuid,
    pub wordlist_id: Uuid,
    pub rules: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        hash_type: i32,
        attack_mode: i32,
        hash_file_id: Uuid,
        wordlist_id: Uuid,
        rules: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            hash_type,
            attack_mode,
            hash_file_id,
            wordlist_id,
            rules,
            created_at: Utc::now(),
        }
    }
}
