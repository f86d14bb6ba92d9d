// [libs/domain/store/src/job_store.rs]
/*!
 * APARATO: JOB STORE (C2)
 * RESPONSABILIDAD: PERSISTENCIA DE SUB-JOBS, MAQUINA DE ESTADOS Y
 * COORDINACION STOP-ON-HIT ENTRE HERMANOS (§4.5).
 *
 * El motor de base de datos queda fuera de alcance (§1 Non-goals); esta
 * es una implementacion en memoria protegida por `Mutex` con indices
 * secundarios por agente y por lote de hermanos, suficiente para
 * satisfacer las invariantes transaccionales del §3 y el §5.
 */

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use hashwarden_domain_models::subjob::{SubJob, SubJobStatus};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobStoreError {
    #[error("NOT_FOUND: no sub-job with id {0}")]
    NotFound(Uuid),
    #[error("ILLEGAL_TRANSITION: cannot move sub-job {0} from {1} to {2}")]
    IllegalTransition(Uuid, &'static str, &'static str),
}

#[derive(Default)]
pub struct InMemoryJobStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    subjobs: HashMap<Uuid, SubJob>,
    by_agent: HashMap<Uuid, Vec<Uuid>>,
    by_batch: HashMap<Uuid, Vec<Uuid>>,
}

/// Resultado de una transicion: el sub-job actualizado mas, si la
/// transicion disparo el protocolo stop-on-hit (§4.5), los hermanos que
/// fueron cancelados en consecuencia.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub subjob: SubJob,
    pub cancelled_siblings: Vec<SubJob>,
}

fn legal_predecessors(target: SubJobStatus) -> &'static [SubJobStatus] {
    use SubJobStatus::*;
    match target {
        Running => &[Pending, Paused],
        Paused => &[Running],
        Completed | Failed | Cancelled => &[Pending, Running, Paused],
        Pending => &[],
    }
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persiste un lote de sub-jobs atomicamente (§4.4 paso 7): si alguno
    /// fallase la validacion, ninguno queda visible.
    pub fn create_subjobs(&self, batch: Vec<SubJob>) -> Result<(), JobStoreError> {
        let mut guard = self.inner.lock().expect("job store lock poisoned");
        for subjob in &batch {
            guard.subjobs.insert(subjob.id, subjob.clone());
            guard.by_agent.entry(subjob.agent_id).or_default().push(subjob.id);
            guard.by_batch.entry(subjob.batch_id).or_default().push(subjob.id);
        }
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<SubJob> {
        self.inner
            .lock()
            .expect("job store lock poisoned")
            .subjobs
            .get(&id)
            .cloned()
    }

    pub fn list(&self) -> Vec<SubJob> {
        self.inner
            .lock()
            .expect("job store lock poisoned")
            .subjobs
            .values()
            .cloned()
            .collect()
    }

    pub fn siblings_of(&self, id: Uuid) -> Vec<SubJob> {
        let guard = self.inner.lock().expect("job store lock poisoned");
        let Some(subjob) = guard.subjobs.get(&id) else {
            return Vec::new();
        };
        let batch_id = subjob.batch_id;
        guard
            .by_batch
            .get(&batch_id)
            .into_iter()
            .flatten()
            .filter_map(|sid| guard.subjobs.get(sid).cloned())
            .collect()
    }

    /// Sub-job `pending` mas antiguo asignado a `agent_id` cuyo lote de
    /// hermanos no haya observado ya un `completed` con contrasena (§4.5).
    pub fn next_for_agent(&self, agent_id: Uuid) -> Option<SubJob> {
        let guard = self.inner.lock().expect("job store lock poisoned");
        let ids = guard.by_agent.get(&agent_id)?;
        ids.iter()
            .filter_map(|id| guard.subjobs.get(id))
            .filter(|sj| sj.status == SubJobStatus::Pending)
            .filter(|sj| {
                let siblings_hit = guard
                    .by_batch
                    .get(&sj.batch_id)
                    .into_iter()
                    .flatten()
                    .filter_map(|sid| guard.subjobs.get(sid))
                    .any(|sibling| {
                        sibling.status == SubJobStatus::Completed
                            && sibling.result.is_some()
                    });
                !siblings_hit
            })
            .min_by_key(|sj| sj.created_at)
            .cloned()
    }

    /// Tick de progreso (§4.6): coerce `progress` a `[0,100]` y nunca lo
    /// hace retroceder (invariante 2, "monotone progress").
    pub fn update_progress(
        &self,
        id: Uuid,
        progress: u8,
        speed: u64,
        eta: Option<String>,
    ) -> Result<SubJob, JobStoreError> {
        let mut guard = self.inner.lock().expect("job store lock poisoned");
        let subjob = guard.subjobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;
        let coerced = progress.min(100);
        subjob.progress = subjob.progress.max(coerced);
        subjob.speed = speed;
        if eta.is_some() {
            subjob.eta = eta;
        }
        Ok(subjob.clone())
    }

    /// Compare-and-set guardado por predecesores legales (§4.5, §5). Si el
    /// sub-job ya esta en un estado terminal la llamada es un no-op que
    /// devuelve el estado actual sin error (idempotencia bajo reintento).
    pub fn transition(
        &self,
        id: Uuid,
        new_status: SubJobStatus,
        result: Option<String>,
    ) -> Result<TransitionOutcome, JobStoreError> {
        let mut guard = self.inner.lock().expect("job store lock poisoned");
        let subjob = guard.subjobs.get(&id).ok_or(JobStoreError::NotFound(id))?.clone();

        if subjob.status.is_terminal() {
            // Primer escritor gana; reintentos con el mismo valor son
            // no-ops, reintentos en conflicto pierden en silencio.
            return Ok(TransitionOutcome {
                subjob,
                cancelled_siblings: Vec::new(),
            });
        }

        let allowed = legal_predecessors(new_status).contains(&subjob.status);
        if !allowed {
            return Err(JobStoreError::IllegalTransition(
                id,
                subjob.status.as_str(),
                new_status.as_str(),
            ));
        }

        let now = Utc::now();
        {
            let stored = guard.subjobs.get_mut(&id).unwrap();
            stored.status = new_status;
            stored.result = result.clone();
            match new_status {
                SubJobStatus::Running if stored.started_at.is_none() => {
                    stored.started_at = Some(now);
                }
                _ => {}
            }
            if new_status.is_terminal() {
                stored.completed_at = Some(now);
            }
        }
        let updated = guard.subjobs.get(&id).unwrap().clone();

        // Stop-on-hit (§4.5): completar con una contrasena verificada
        // cancela a los hermanos activos.
        let mut cancelled = Vec::new();
        if new_status == SubJobStatus::Completed && updated.result.is_some() {
            let sibling_ids: Vec<Uuid> = guard
                .by_batch
                .get(&updated.batch_id)
                .cloned()
                .unwrap_or_default();
            for sibling_id in sibling_ids {
                if sibling_id == id {
                    continue;
                }
                if let Some(sibling) = guard.subjobs.get_mut(&sibling_id) {
                    if matches!(
                        sibling.status,
                        SubJobStatus::Pending | SubJobStatus::Running | SubJobStatus::Paused
                    ) {
                        sibling.status = SubJobStatus::Cancelled;
                        sibling.result = Some("Password found by another agent".to_string());
                        sibling.completed_at = Some(now);
                        cancelled.push(sibling.clone());
                    }
                }
            }
        }

        Ok(TransitionOutcome {
            subjob: updated,
            cancelled_siblings: cancelled,
        })
    }
}
