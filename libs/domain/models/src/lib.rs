// INICIO DEL ARCHIVO [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS BARREL (V1.0)
 * CLASIFICACION: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATOS SOBERANOS COMPARTIDOS ENTRE COORDINADOR Y AGENTE
 *
 * Cada tipo con #[typeshare] tiene un espejo en el cliente TypeScript
 * del dashboard; mantener los nombres de campo estables entre Rust y
 * el contrato generado.
 * =================================================================
 */

pub mod agent;
pub mod catalog;
pub mod events;
pub mod job;
pub mod subjob;
pub mod wire;

#[cfg(test)]
mod tests_serialization;

pub use agent::{Agent, AgentStatus};
pub use catalog::{FileKind, HashFile, Wordlist};
pub use events::RealTimeEvent;
pub use job::Job;
pub use subjob::{SubJob, SubJobStatus, SubJobUpdate};
pub use wire::*;
// FIN DEL ARCHIVO [libs/domain/models/src/lib.rs]
