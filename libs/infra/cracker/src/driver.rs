// [libs/infra/cracker/src/driver.rs]
/*!
 * APARATO: CRACKER PROCESS DRIVER (C8)
 * RESPONSABILIDAD: VALIDAR ENTRADAS, INVOCAR EL BINARIO EXTERNO Y
 * CLASIFICAR SU SALIDA SEGUN EL CODIGO DE SALIDA (§4.8).
 */

use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::parser::{merge, parse_line, StatusTick};
use crate::request::{remapped_hash_type, CrackRequest};

#[derive(Debug, Error)]
pub enum CrackerError {
    #[error("VALIDATION: {0}")]
    Validation(String),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Resultado de una ejecucion completa del cracker (§4.8 "Exit-code
/// handling"). `Found` todavia no esta verificado contra la ventana del
/// agente; eso es responsabilidad del llamador via `verify_plaintext_in_window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackOutcome {
    Found(String),
    NoHit,
    Fatal(String),
}

/// Extensiones de archivo de hash que llevan numero magico (§4.8
/// "Validation before spawn"). El valor es el prefijo de bytes esperado.
const MAGIC_NUMBERS: &[(&str, &[u8])] = &[("hccapx", &[0x48, 0x43, 0x50, 0x58])];

async fn validate_inputs(request: &CrackRequest) -> Result<(), CrackerError> {
    for (label, path) in [("hash file", &request.hash_file), ("wordlist", &request.wordlist)] {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            CrackerError::Validation(format!("{label} {} is not accessible: {e}", path.display()))
        })?;
        if metadata.len() == 0 {
            return Err(CrackerError::Validation(format!(
                "{label} {} is empty",
                path.display()
            )));
        }
    }

    if let Some(extension) = request.hash_file.extension().and_then(|e| e.to_str()) {
        if let Some((_, magic)) = MAGIC_NUMBERS.iter().find(|(ext, _)| *ext == extension) {
            let mut file = tokio::fs::File::open(&request.hash_file).await?;
            let mut header = vec![0u8; magic.len()];
            file.read_exact(&mut header).await.map_err(|_| {
                CrackerError::Validation(format!(
                    "{} is shorter than its magic-number header",
                    request.hash_file.display()
                ))
            })?;
            if header != *magic {
                return Err(CrackerError::Validation(format!(
                    "{} failed the {extension} magic-number check",
                    request.hash_file.display()
                )));
            }
        }
    }

    Ok(())
}

/// Lanza el cracker y devuelve el desenlace clasificado segun su exit
/// code. `on_tick` se invoca con cada observacion nueva a medida que el
/// proceso emite lineas de estado, para que el llamador reenvie progreso
/// al bus de eventos sin esperar a que el proceso termine. `on_spawn` se
/// invoca una sola vez con el pid del proceso hijo apenas arranca, para
/// que el llamador pueda enviarle senales externamente (pausa/cancelacion,
/// §4.7 "Sub-job status watcher").
pub async fn run_crack<F, S>(
    request: &CrackRequest,
    mut on_tick: F,
    mut on_spawn: S,
) -> Result<CrackOutcome, CrackerError>
where
    F: FnMut(&StatusTick) + Send,
    S: FnMut(u32) + Send,
{
    validate_inputs(request).await?;

    if let Some(new_hash_type) = remapped_hash_type(request.hash_type) {
        info!(
            "hash_type {} has a modern equivalent; trying {} first",
            request.hash_type, new_hash_type
        );
        match spawn_and_stream(request, new_hash_type, &mut on_tick, &mut on_spawn).await? {
            (0, _) => Ok(read_outfile_as_found(&request.outfile).await?),
            (1, _) => Ok(CrackOutcome::NoHit),
            (_, _) => {
                warn!(
                    "cracker rejected remapped hash_type {}; retrying with original {}",
                    new_hash_type, request.hash_type
                );
                match spawn_and_stream(request, request.hash_type, &mut on_tick, &mut on_spawn).await? {
                    (0, _) => Ok(read_outfile_as_found(&request.outfile).await?),
                    (1, _) => Ok(CrackOutcome::NoHit),
                    (code, _) => Ok(CrackOutcome::Fatal(format!(
                        "cracker exited {code} on both remapped {new_hash_type} and original {}",
                        request.hash_type
                    ))),
                }
            }
        }
    } else {
        match spawn_and_stream(request, request.hash_type, &mut on_tick, &mut on_spawn).await? {
            (0, _) => Ok(read_outfile_as_found(&request.outfile).await?),
            (1, _) => Ok(CrackOutcome::NoHit),
            (code, _) => Ok(CrackOutcome::Fatal(format!("cracker exited with code {code}"))),
        }
    }
}

async fn spawn_and_stream<F, S>(
    request: &CrackRequest,
    hash_type: i32,
    on_tick: &mut F,
    on_spawn: &mut S,
) -> Result<(i32, StatusTick), CrackerError>
where
    F: FnMut(&StatusTick) + Send,
    S: FnMut(u32) + Send,
{
    let mut command = Command::new(&request.binary);
    command
        .args(request.args_for(hash_type))
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    info!(binary = %request.binary.display(), hash_type, "spawning cracker");
    let mut child = command.spawn()?;
    if let Some(pid) = child.id() {
        on_spawn(pid);
    }
    let stdout = child.stdout.take().expect("piped stdout");
    let mut reader = BufReader::new(stdout).lines();

    let mut latest = StatusTick::default();
    while let Some(line) = reader.next_line().await? {
        debug!(%line, "cracker stdout");
        if let Some(tick) = parse_line(&line) {
            merge(&mut latest, tick);
            on_tick(&latest);
        }
    }

    let status = child.wait().await?;
    let code = status.code().unwrap_or(-1);
    Ok((code, latest))
}

async fn read_outfile_as_found(outfile: &Path) -> Result<CrackOutcome, CrackerError> {
    let contents = tokio::fs::read_to_string(outfile).await?;
    let plaintext = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| CrackerError::Validation("exit 0 but outfile had no plaintext line".to_string()))?;
    Ok(CrackOutcome::Found(plaintext.to_string()))
}
