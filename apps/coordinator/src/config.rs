// [apps/coordinator/src/config.rs]
/*!
 * APARATO: COORDINATOR CONFIG
 * RESPONSABILIDAD: SUPERFICIE DE LINEA DE COMANDOS Y VARIABLES DE
 * ENTORNO DEL COORDINADOR (§7 AMBIENT — config).
 *
 * `serve` es el comando por defecto que levanta la API; `issue-key`
 * cubre el paso operativo de emitir la clave de un agente (§3 "key
 * created by operator"), ausente de la tabla de rutas §6 porque ese
 * paso no viaja por HTTP en la distribucion original.
 */

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "coordinator", about = "Coordinador de cracking distribuido")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Puerto de escucha HTTP.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Token portador exigido por el guardian de autenticacion (§6).
    #[arg(long, env = "COORDINATOR_AUTH_TOKEN")]
    pub auth_token: String,

    /// Directorio raiz donde viven los archivos de catalogo (§4.3).
    #[arg(long, env = "CATALOG_ROOT", default_value = "./data")]
    pub catalog_root: String,

    /// Ventana de liveness en segundos antes de degradar a `offline` (§4.1).
    #[arg(long, env = "LIVENESS_WINDOW_SECONDS", default_value_t = 90)]
    pub liveness_window_seconds: i64,

    /// Intervalo del barrido periodico de liveness, en segundos.
    #[arg(long, env = "LIVENESS_SWEEP_INTERVAL_SECONDS", default_value_t = 10)]
    pub liveness_sweep_interval_seconds: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Levanta la API HTTP (comportamiento por defecto si se omite el subcomando).
    Serve,
    /// Emite una clave de agente nueva e imprime su par id/clave.
    IssueKey {
        #[arg(long)]
        name: String,
    },
}
