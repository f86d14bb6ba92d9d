// [libs/domain/store/src/registry.rs]
/*!
 * APARATO: AGENT REGISTRY (C1)
 * RESPONSABILIDAD: IDENTIDAD, EMISION DE CLAVES, LIVENESS Y CAMPOS DE
 * CAPACIDAD/VELOCIDAD DE CADA AGENTE.
 *
 * Mapa protegido por `RwLock` con indices secundarios por clave y por
 * nombre (§4.1 AMBIENT). Las operaciones mutantes devuelven errores
 * tipados en vez de entrar en panico; el barrido de liveness es una
 * funcion pura sobre una marca de tiempo dada, para que el llamador
 * (el daemon periodico en `apps/coordinator`) decida cuando invocarla.
 */

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use hashwarden_domain_models::agent::{Agent, AgentStatus};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("NAME_IN_USE: agent name '{0}' is already registered")]
    NameInUse(String),
    #[error("UNKNOWN_KEY: no agent is bound to this agent key")]
    UnknownKey,
    #[error("NAME_CONFLICT: key is already bound to agent '{0}'")]
    NameConflict(String),
    #[error("ADDRESS_CONFLICT: address {0} already in use by another online agent")]
    AddressConflict(String),
    #[error("NOT_FOUND: no agent with id {0}")]
    NotFound(Uuid),
}

struct RegistryInner {
    by_id: HashMap<Uuid, Agent>,
    by_key: HashMap<String, Uuid>,
    by_name: HashMap<String, Uuid>,
}

pub struct AgentRegistry {
    inner: RwLock<RegistryInner>,
    pub liveness_window: Duration,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new(Duration::seconds(90))
    }
}

impl AgentRegistry {
    pub fn new(liveness_window: Duration) -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                by_id: HashMap::new(),
                by_key: HashMap::new(),
                by_name: HashMap::new(),
            }),
            liveness_window,
        }
    }

    /// Genera una nueva identidad y su clave de 64 caracteres hexadecimales.
    pub fn issue_key(&self, name: impl Into<String>) -> Result<(Uuid, String), RegistryError> {
        let name = name.into();
        let mut guard = self.inner.write().expect("registry lock poisoned");
        if guard.by_name.contains_key(&name) {
            return Err(RegistryError::NameInUse(name));
        }

        let id = Uuid::new_v4();
        let agent_key = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );

        let agent = Agent {
            id,
            name: name.clone(),
            agent_key: agent_key.clone(),
            ip_address: None,
            port: 0,
            original_port: 0,
            capabilities: String::new(),
            speed: 0,
            status: AgentStatus::Offline,
            last_seen: Utc::now(),
        };

        guard.by_name.insert(name, id);
        guard.by_key.insert(agent_key.clone(), id);
        guard.by_id.insert(id, agent);

        Ok((id, agent_key))
    }

    /// Reclama o actualiza el registro de un agente a partir de su clave
    /// (§4.1). Rechaza si la clave es desconocida, si se intenta rebautizar
    /// a un nombre distinto, o si la direccion ya esta en uso por otro
    /// agente en linea.
    pub fn claim(
        &self,
        agent_key: &str,
        name: Option<String>,
        ip_address: Option<String>,
        port: Option<u16>,
        capabilities: Option<String>,
    ) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let id = *guard
            .by_key
            .get(agent_key)
            .ok_or(RegistryError::UnknownKey)?;

        if let Some(requested_name) = &name {
            let current_name = guard.by_id.get(&id).unwrap().name.clone();
            if requested_name != &current_name {
                return Err(RegistryError::NameConflict(current_name));
            }
        }

        if let Some(addr) = &ip_address {
            let conflict = guard.by_id.values().any(|other| {
                other.id != id
                    && other.status != AgentStatus::Offline
                    && other.ip_address.as_deref() == Some(addr.as_str())
            });
            if conflict {
                return Err(RegistryError::AddressConflict(addr.clone()));
            }
        }

        let agent = guard.by_id.get_mut(&id).unwrap();
        if let Some(addr) = ip_address {
            agent.ip_address = Some(addr);
        }
        if let Some(port) = port {
            // El puerto que ya estaba en el registro es el puerto "en
            // reposo" (§3); se conserva en `original_port` antes de
            // sobreescribirlo con el puerto operativo de esta sesion.
            agent.original_port = agent.port;
            agent.port = port;
        }
        if let Some(caps) = capabilities {
            agent.capabilities = caps;
        }
        agent.status = AgentStatus::Online;
        agent.last_seen = Utc::now();

        Ok(agent.clone())
    }

    /// Bonifica `last_seen`; promueve de `offline` a `online` (nunca a
    /// `busy`, que solo la Asignacion decide). Idempotente.
    pub fn heartbeat(&self, agent_key: &str) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let id = *guard
            .by_key
            .get(agent_key)
            .ok_or(RegistryError::UnknownKey)?;
        let agent = guard.by_id.get_mut(&id).unwrap();
        agent.last_seen = Utc::now();
        if agent.status == AgentStatus::Offline {
            agent.status = AgentStatus::Online;
        }
        Ok(agent.clone())
    }

    pub fn set_status(&self, id: Uuid, status: AgentStatus) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let agent = guard.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        agent.status = status;
        Ok(agent.clone())
    }

    pub fn set_speed(&self, id: Uuid, speed: u64) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let agent = guard.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        agent.speed = speed;
        Ok(agent.clone())
    }

    /// Actualiza direccion/puerto/capacidades sin tocar el estado de
    /// liveness (`PUT /agents/update-data`).
    pub fn update_data(
        &self,
        agent_key: &str,
        ip_address: Option<String>,
        port: Option<u16>,
        capabilities: Option<String>,
    ) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let id = *guard
            .by_key
            .get(agent_key)
            .ok_or(RegistryError::UnknownKey)?;
        let agent = guard.by_id.get_mut(&id).unwrap();
        if let Some(addr) = ip_address {
            agent.ip_address = Some(addr);
        }
        if let Some(port) = port {
            agent.port = port;
        }
        if let Some(caps) = capabilities {
            agent.capabilities = caps;
        }
        Ok(agent.clone())
    }

    /// Restaura el puerto original al apagar un agente (§4.7), preservando
    /// capacidades y velocidad.
    pub fn restore_original_port(&self, id: Uuid) -> Result<Agent, RegistryError> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let agent = guard.by_id.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        agent.port = agent.original_port;
        agent.status = AgentStatus::Offline;
        Ok(agent.clone())
    }

    pub fn get(&self, id: Uuid) -> Option<Agent> {
        self.inner
            .read()
            .expect("registry lock poisoned")
            .by_id
            .get(&id)
            .cloned()
    }

    pub fn get_by_key(&self, agent_key: &str) -> Option<Agent> {
        let guard = self.inner.read().expect("registry lock poisoned");
        guard
            .by_key
            .get(agent_key)
            .and_then(|id| guard.by_id.get(id))
            .cloned()
    }

    pub fn list(&self) -> Vec<Agent> {
        self.inner
            .read()
            .expect("registry lock poisoned")
            .by_id
            .values()
            .cloned()
            .collect()
    }

    /// Subconjunto con `status in {online, busy}` y `last_seen` dentro de
    /// la ventana de liveness.
    pub fn online(&self, now: DateTime<Utc>) -> Vec<Agent> {
        self.inner
            .read()
            .expect("registry lock poisoned")
            .by_id
            .values()
            .filter(|agent| {
                matches!(agent.status, AgentStatus::Online | AgentStatus::Busy)
                    && !agent.is_stale(now, self.liveness_window)
            })
            .cloned()
            .collect()
    }

    /// Barrido de liveness (§4.1): degrada a `offline` los agentes cuyo
    /// `last_seen` supera la ventana. Devuelve los agentes que cambiaron,
    /// para que el llamador los difunda por el bus de eventos.
    pub fn sweep_stale(&self, now: DateTime<Utc>) -> Vec<Agent> {
        let mut guard = self.inner.write().expect("registry lock poisoned");
        let mut demoted = Vec::new();
        for agent in guard.by_id.values_mut() {
            if matches!(agent.status, AgentStatus::Online | AgentStatus::Busy)
                && agent.is_stale(now, self.liveness_window)
            {
                agent.status = AgentStatus::Offline;
                demoted.push(agent.clone());
            }
        }
        demoted
    }
}
