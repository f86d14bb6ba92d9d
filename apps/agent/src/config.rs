// [apps/agent/src/config.rs]
/*!
 * APARATO: AGENT CONFIG
 * RESPONSABILIDAD: SUPERFICIE DE LINEA DE COMANDOS DEL AGENTE (§6
 * "Agent CLI").
 *
 * `--auth-token` es una adicion ambiental: la tabla §6 original no
 * contempla autenticacion alguna, pero la superficie HTTP del
 * coordinador exige un portador (§6 AMBIENT) y el agente necesita
 * algun modo de obtenerlo.
 */

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "agent", about = "Agente de crackeo distribuido")]
pub struct Cli {
    /// URL base del coordinador.
    #[arg(long, env = "COORDINATOR_URL")]
    pub server: String,

    /// Nombre deseado; debe coincidir con el nombre ya emitido para esta clave.
    #[arg(long)]
    pub name: Option<String>,

    /// Direccion IP local a anunciar; se valida contra las interfaces de red
    /// de esta maquina (§4.7 paso 3).
    #[arg(long)]
    pub ip: Option<String>,

    /// Puerto operativo de esta sesion (§4.7 paso 5).
    #[arg(long, default_value_t = 8081)]
    pub port: u16,

    /// Capacidades declaradas; `auto` dispara la deteccion automatica (§4.7 paso 4).
    #[arg(long, default_value = "auto")]
    pub capabilities: String,

    /// Clave de 64 caracteres emitida por el operador. Ausente ⇒ fallo fatal (§6).
    #[arg(long, env = "AGENT_KEY")]
    pub agent_key: String,

    /// Directorio local de trabajo: `{wordlists,hash-files,temp}` (§6 "On-disk layout").
    #[arg(long, default_value = "./uploads")]
    pub upload_dir: String,

    /// Token portador exigido por el guardian de autenticacion del coordinador.
    #[arg(long, env = "COORDINATOR_AUTH_TOKEN")]
    pub auth_token: String,

    /// Ruta al binario del cracker externo.
    #[arg(long, env = "CRACKER_BINARY", default_value = "hashcat")]
    pub cracker_binary: String,
}
