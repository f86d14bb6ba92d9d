// [apps/coordinator/src/state.rs]
/*!
 * APARATO: APPLICATION STATE
 * RESPONSABILIDAD: INYECCION DE DEPENDENCIAS COMPARTIDAS ENTRE HANDLERS
 * (REGISTRO, ALMACEN DE JOBS, CATALOGO Y BUS DE EVENTOS, §9 "Global
 * package state... becomes an explicit dependency injected at startup").
 */

use std::sync::Arc;

use hashwarden_domain_store::catalog::FileCatalog;
use hashwarden_domain_store::job_store::InMemoryJobStore;
use hashwarden_domain_store::registry::AgentRegistry;

use crate::events::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
    pub jobs: Arc<InMemoryJobStore>,
    pub catalog: Arc<FileCatalog>,
    pub events: Arc<EventBus>,
    /// Token compartido entre el middleware de autenticacion y las pruebas
    /// que construyen un estado en memoria sin pasar por `Config`.
    pub auth_token: Arc<str>,
}

impl AppState {
    pub fn new(catalog_root: impl Into<std::path::PathBuf>, auth_token: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(AgentRegistry::default()),
            jobs: Arc::new(InMemoryJobStore::new()),
            catalog: Arc::new(FileCatalog::new(catalog_root)),
            events: Arc::new(EventBus::new(1024)),
            auth_token: Arc::from(auth_token.into()),
        }
    }
}
