// [libs/infra/agent-client/src/lib.rs]
/*!
 * APARATO: AGENT CLIENT BARREL
 * RESPONSABILIDAD: EXPORTACION PUBLICA DEL CLIENTE HTTP DEL AGENTE
 */

pub mod client;
pub mod errors;

pub use client::CoordinatorClient;
pub use errors::ClientError;
