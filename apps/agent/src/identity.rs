// [apps/agent/src/identity.rs]
/*!
 * APARATO: STARTUP IDENTITY VALIDATION
 * RESPONSABILIDAD: SECUENCIA DE ARRANQUE DEL AGENTE (§4.7 pasos 1-5):
 * LEER LA CLAVE, RECLAMARLA CONTRA EL REGISTRO, VALIDAR LA DIRECCION
 * LOCAL Y DETECTAR CAPACIDADES.
 */

use hashwarden_domain_models::Agent;
use hashwarden_infra_agent_client::{ClientError, CoordinatorClient};
use thiserror::Error;
use tracing::info;

use crate::capability::{detect_capabilities, is_local_address};
use crate::config::Cli;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("FATAL: --ip {0} is not a local address of this machine")]
    AddressMismatch(String),
    #[error("FATAL: coordinator rejected claim: {0}")]
    Rejected(#[from] ClientError),
}

/// Ejecuta los pasos 2-5 del arranque y devuelve el registro ya
/// reclamado. El paso 1 (clave ausente) ya fue resuelto por `clap`
/// marcando `--agent-key`/`AGENT_KEY` como requerido.
pub async fn claim_identity(client: &CoordinatorClient, cli: &Cli) -> Result<Agent, StartupError> {
    if let Some(ip) = &cli.ip {
        if !is_local_address(ip) {
            return Err(StartupError::AddressMismatch(ip.clone()));
        }
    }

    let capabilities = if cli.capabilities.eq_ignore_ascii_case("auto") {
        detect_capabilities()
    } else {
        cli.capabilities.clone()
    };

    let agent = client
        .claim_agent(
            &cli.agent_key,
            cli.name.clone(),
            cli.ip.clone(),
            Some(cli.port),
            Some(capabilities),
        )
        .await?;

    info!(agent_id = %agent.id, port = cli.port, "identity claimed, original_port preserved for shutdown");
    Ok(agent)
}
