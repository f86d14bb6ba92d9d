// [libs/infra/cracker/src/lib.rs]
/*!
 * APARATO: CRACKER DRIVER BARREL (C8)
 * RESPONSABILIDAD: INVOCAR EL CRACKER EXTERNO, PARSEAR SU SALIDA EN
 * STREAMING Y VERIFICAR LA CONTRASENA REPORTADA CONTRA LA VENTANA
 * ASIGNADA AL AGENTE (§4.8).
 *
 * El binario externo mismo es una caja negra fuera de alcance (§1); esta
 * crate especifica unicamente como se lo invoca y como se interpreta su
 * salida. `tokio::process::Command` con stdout en pipe, leido linea a
 * linea sobre un `BufReader` para observar los avisos de progreso a
 * medida que el proceso los emite (§4.8 AMBIENT).
 */

pub mod driver;
pub mod parser;
pub mod request;
pub mod verify;

pub use driver::{run_crack, CrackOutcome, CrackerError};
pub use parser::{parse_line, StatusTick};
pub use request::CrackRequest;
pub use verify::verify_plaintext_in_window;
