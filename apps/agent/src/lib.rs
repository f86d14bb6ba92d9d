// [apps/agent/src/lib.rs]
/*!
 * APARATO: AGENT LIBRARY ROOT
 * RESPONSABILIDAD: ARBOL DE MODULOS DEL AGENTE (C7) Y PRELUDIO DE
 * ARRANQUE PARA `main.rs` Y LAS PRUEBAS DE INTEGRACION.
 */

pub mod capability;
pub mod config;
pub mod identity;
pub mod loops;
pub mod scan;
pub mod state;

pub mod prelude {
    pub use crate::config::Cli;
    pub use crate::state::{AgentRuntimeState, CurrentSubJob};
}
