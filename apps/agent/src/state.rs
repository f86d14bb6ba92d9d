// [apps/agent/src/state.rs]
/*!
 * APARATO: AGENT RUNTIME STATE
 * RESPONSABILIDAD: ESTADO COMPARTIDO ENTRE LOS CINCO BUCLES
 * COOPERATIVOS DEL AGENTE (§4.7 AMBIENT, §5 "Agents are parallel
 * processes... sharing a small struct under a mutex").
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashwarden_domain_models::SubJob;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Sub-job en ejecucion y el identificador del proceso del cracker que
/// lo atiende, para que el vigilante de estado pueda enviarle una senal.
#[derive(Debug, Clone)]
pub struct CurrentSubJob {
    pub subjob: SubJob,
    pub process_id: Option<u32>,
}

pub struct AgentRuntimeState {
    pub agent_id: Uuid,
    pub agent_key: String,
    pub current: Mutex<Option<CurrentSubJob>>,
    pub shutting_down: Arc<AtomicBool>,
}

impl AgentRuntimeState {
    pub fn new(agent_id: Uuid, agent_key: String) -> Self {
        Self {
            agent_id,
            agent_key,
            current: Mutex::new(None),
            shutting_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
    }

    pub async fn is_idle(&self) -> bool {
        self.current.lock().await.is_none()
    }
}
