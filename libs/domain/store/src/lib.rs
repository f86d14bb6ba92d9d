// INICIO DEL ARCHIVO [libs/domain/store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN STORE BARREL (V1.0)
 * CLASIFICACION: DOMAIN STORE (ESTRATO L2)
 * RESPONSABILIDAD: REGISTRO DE AGENTES (C1), ALMACEN DE SUB-JOBS (C2)
 * Y CATALOGO DE ARCHIVOS (C3)
 *
 * El motor de base de datos durable queda fuera de alcance (§1); las
 * tres estructuras de este crate son indices en memoria protegidos por
 * locks, pensados para vivir detras de un `Arc` compartido en el
 * estado de la aplicacion coordinadora.
 * =================================================================
 */

pub mod catalog;
pub mod job_store;
pub mod registry;

pub use catalog::{CatalogError, FileCatalog};
pub use job_store::{InMemoryJobStore, JobStoreError, TransitionOutcome};
pub use registry::{AgentRegistry, RegistryError};
// FIN DEL ARCHIVO [libs/domain/store/src/lib.rs]
