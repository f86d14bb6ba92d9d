// [apps/agent/src/loops/executor.rs]
/*!
 * APARATO: SUB-JOB EXECUTOR
 * RESPONSABILIDAD: RESOLVER ENTRADAS, INVOCAR EL CRACKER EXTERNO Y
 * REPORTAR EL DESENLACE AL COORDINADOR (§4.7 "Executor", §4.8).
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashwarden_domain_models::{JobDataRequest, SubJob};
use hashwarden_infra_agent_client::{ClientError, CoordinatorClient};
use hashwarden_infra_cracker::{run_crack, CrackOutcome, CrackRequest, CrackerError};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::state::{AgentRuntimeState, CurrentSubJob};

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("download failed: {0}")]
    Download(#[from] ClientError),
    #[error("cracker failed: {0}")]
    Cracker(#[from] CrackerError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Resuelve un archivo de entrada en el area local del agente, cacheado
/// por id bajo `<upload_dir>/<kind_dir>/<id>`; lo descarga del
/// coordinador solo si todavia no existe (§4.7 paso 6: resolver local
/// antes de pedir una descarga).
async fn resolve_cached<F, Fut>(
    upload_dir: &Path,
    kind_dir: &str,
    id: Uuid,
    download: F,
) -> Result<PathBuf, ExecutorError>
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: std::future::Future<Output = Result<(), ClientError>>,
{
    let dest = upload_dir.join(kind_dir).join(id.to_string());
    if tokio::fs::metadata(&dest).await.is_ok() {
        info!(path = %dest.display(), "resolved input locally");
        return Ok(dest);
    }
    info!(path = %dest.display(), "downloading input from coordinator");
    download(dest.clone()).await?;
    Ok(dest)
}

/// Procesa un unico sub-job de principio a fin: resuelve entradas,
/// invoca el cracker reenviando progreso en tiempo real, y reporta el
/// desenlace terminal (§4.7, §4.8).
pub async fn process(
    client: Arc<CoordinatorClient>,
    state: Arc<AgentRuntimeState>,
    cracker_binary: PathBuf,
    upload_dir: PathBuf,
    subjob: SubJob,
) {
    let id = subjob.id;
    *state.current.lock().await = Some(CurrentSubJob {
        subjob: subjob.clone(),
        process_id: None,
    });

    if let Err(err) = client.start_subjob(id).await {
        warn!(error = %err, "failed to mark sub-job started");
    }

    let outcome = run(&client, &state, &cracker_binary, &upload_dir, &subjob).await;

    match outcome {
        Ok(CrackOutcome::Found(plaintext)) => {
            info!(subjob_id = %id, "cracker found a match, reporting completion");
            if let Err(err) = client.complete(id, plaintext).await {
                error!(error = %err, "failed to report completion");
            }
        }
        Ok(CrackOutcome::NoHit) => {
            info!(subjob_id = %id, "cracker exhausted its window with no hit");
            if let Err(err) = client.fail(id, "exhausted".to_string()).await {
                error!(error = %err, "failed to report exhausted window");
            }
        }
        Ok(CrackOutcome::Fatal(reason)) => {
            warn!(subjob_id = %id, %reason, "cracker exited fatally");
            if let Err(err) = client.fail(id, reason).await {
                error!(error = %err, "failed to report fatal failure");
            }
        }
        Err(err) => {
            warn!(subjob_id = %id, error = %err, "executor failed before a classifiable cracker outcome");
            if let Err(report_err) = client.fail(id, err.to_string()).await {
                error!(error = %report_err, "failed to report executor failure");
            }
        }
    }

    let outfile = upload_dir.join("temp").join(format!("cracked-{id}.txt"));
    let _ = tokio::fs::remove_file(&outfile).await;
    *state.current.lock().await = None;
}

async fn run(
    client: &Arc<CoordinatorClient>,
    state: &Arc<AgentRuntimeState>,
    cracker_binary: &Path,
    upload_dir: &Path,
    subjob: &SubJob,
) -> Result<CrackOutcome, ExecutorError> {
    let agent_id = state.agent_id;
    let hash_file = resolve_cached(upload_dir, "hash-files", subjob.hash_file_id, |dest| {
        let client = client.clone();
        async move { client.download_hashfile(subjob.hash_file_id, &dest).await }
    })
    .await?;

    let wordlist = resolve_cached(upload_dir, "wordlists", subjob.wordlist_id, |dest| {
        let client = client.clone();
        async move { client.download_wordlist(subjob.wordlist_id, &dest).await }
    })
    .await?;

    let outfile = upload_dir.join("temp").join(format!("cracked-{}.txt", subjob.id));
    if let Some(parent) = outfile.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let request = CrackRequest {
        binary: cracker_binary.to_path_buf(),
        hash_file,
        wordlist,
        hash_type: subjob.hash_type,
        attack_mode: subjob.attack_mode,
        rules: subjob.rules.clone(),
        skip: subjob.skip,
        limit: subjob.limit,
        outfile,
    };

    let id = subjob.id;
    let tick_client = client.clone();
    let spawn_state = state.clone();
    let outcome = run_crack(
        &request,
        move |tick| {
            let client = tick_client.clone();
            let progress = tick.progress.unwrap_or(0);
            let speed = tick.speed_hs.unwrap_or(0);
            let eta = tick.eta.clone();
            let total_words = tick.total_words;
            tokio::spawn(async move {
                let result = client
                    .post_data(
                        id,
                        JobDataRequest {
                            agent_id,
                            progress,
                            speed,
                            eta,
                            attack_mode: None,
                            rules: None,
                            total_words,
                        },
                    )
                    .await;
                if let Err(err) = result {
                    warn!(error = %err, "failed to forward progress tick");
                }
            });
        },
        move |pid| {
            let state = spawn_state.clone();
            tokio::spawn(async move {
                if let Some(current) = state.current.lock().await.as_mut() {
                    current.process_id = Some(pid);
                }
            });
        },
    )
    .await?;

    Ok(outcome)
}
