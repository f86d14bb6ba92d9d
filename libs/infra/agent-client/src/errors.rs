// [libs/infra/agent-client/src/errors.rs]
/*!
 * APARATO: AGENT CLIENT ERRORS
 * RESPONSABILIDAD: TAXONOMIA DE FALLOS DE RED/IO HACIA EL COORDINADOR (§7)
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("NETWORK: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("DECODE: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("UNAUTHORIZED: coordinator rejected the agent key or bearer token")]
    Unauthorized,

    #[error("REJECTED: coordinator returned status {0}: {1}")]
    Rejected(u16, String),
}
