// [libs/infra/cracker/src/verify.rs]
/*!
 * APARATO: LOCAL VERIFIER
 * RESPONSABILIDAD: CONFIRMAR QUE LA CONTRASENA REPORTADA POR EL CRACKER
 * REALMENTE CAE DENTRO DE LA VENTANA [skip, skip+limit) ASIGNADA A ESTE
 * AGENTE (§4.8 "Local verification", invariante "Verifier soundness").
 *
 * Sin esto, un cracker que mintiera sobre su propio offset (o un bug de
 * splitting corriente arriba) podria hacer que el coordinador acepte un
 * hallazgo que en realidad pertenece a otro sub-job.
 */

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Recorre las lineas `[skip, skip+limit)` del wordlist materializado y
/// confirma que alguna coincide exactamente con `plaintext`.
pub async fn verify_plaintext_in_window(
    wordlist_path: &Path,
    skip: u64,
    limit: u64,
    plaintext: &str,
) -> io::Result<bool> {
    let file = File::open(wordlist_path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut index: u64 = 0;
    let end = skip.saturating_add(limit);
    while let Some(line) = lines.next_line().await? {
        if index >= end {
            break;
        }
        if index >= skip && line == plaintext {
            return Ok(true);
        }
        index += 1;
    }
    Ok(false)
}
