// [apps/coordinator/src/lib.rs]
/*!
 * APARATO: COORDINATOR LIBRARY ROOT
 * RESPONSABILIDAD: ARBOL DE MODULOS DEL COORDINADOR Y PRELUDIO DE
 * ARRANQUE PARA `main.rs` Y PARA LAS PRUEBAS DE INTEGRACION.
 */

pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::config::{Cli, Command};
    pub use crate::routes::build;
    pub use crate::state::AppState;
}
