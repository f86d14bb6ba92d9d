// [apps/coordinator/src/handlers/jobs.rs]
/*!
 * APARATO: JOB HANDLERS
 * RESPONSABILIDAD: SUPERFICIE HTTP DEL SPLITTER (C4) Y DE LA MAQUINA DE
 * ESTADOS DE SUB-JOBS (C5, §6).
 */

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use hashwarden_core_splitter::{split, SplitCandidate};
use hashwarden_domain_models::{
    AutoSplitRequest, CompleteRequest, FailRequest, Job, JobDataRequest, ProgressRequest,
    RealTimeEvent, SubJob, SubJobStatus,
};
use hashwarden_infra_cracker::verify_plaintext_in_window;
use uuid::Uuid;

use crate::error::CoordinatorError;
use crate::state::AppState;

fn publish_job_status(state: &AppState, subjob: &SubJob) {
    state.events.publish(RealTimeEvent::JobStatus {
        sub_job_id: subjob.id,
        status: subjob.status,
        result: subjob.result.clone(),
    });
}

fn publish_job_progress(state: &AppState, subjob: &SubJob) {
    state.events.publish(RealTimeEvent::JobProgress {
        sub_job_id: subjob.id,
        progress: subjob.progress,
        speed: subjob.speed,
        eta: subjob.eta.clone(),
        status: subjob.status,
    });
}

/// `POST /jobs/auto` — divide un diccionario entre todos los agentes en
/// linea (§4.4).
pub async fn auto_split(
    State(state): State<AppState>,
    Json(req): Json<AutoSplitRequest>,
) -> Result<Json<Vec<SubJob>>, CoordinatorError> {
    let hash_file = state
        .catalog
        .get_hash_file(req.hash_file_id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("hash file {}", req.hash_file_id)))?;
    let wordlist = state
        .catalog
        .get_wordlist(req.wordlist_id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("wordlist {}", req.wordlist_id)))?;

    let online_agents = state.registry.online(Utc::now());
    if online_agents.is_empty() {
        return Err(CoordinatorError::Validation(
            "no agents are online".to_string(),
        ));
    }

    let total_words = state.catalog.word_count(wordlist.id).await?;

    let candidates: Vec<SplitCandidate> = online_agents
        .iter()
        .map(|agent| SplitCandidate {
            agent_id: agent.id,
            name: agent.name.clone(),
            speed: agent.speed,
            capabilities: agent.capabilities.clone(),
        })
        .collect();

    let hash_type = req
        .hash_type
        .ok_or_else(|| CoordinatorError::Validation("hash_type is required".to_string()))?;
    let attack_mode = req.attack_mode.unwrap_or(0);
    let job_name = req.name.unwrap_or_else(|| hash_file.name.clone());

    let windows = split(total_words, &job_name, &candidates)?;

    let job = Job::new(
        job_name,
        hash_type,
        attack_mode,
        hash_file.id,
        wordlist.id,
        req.rules.clone(),
    );
    let batch_id = Uuid::new_v4();
    let now = Utc::now();

    let subjobs: Vec<SubJob> = windows
        .into_iter()
        .map(|window| SubJob {
            id: Uuid::new_v4(),
            job_id: job.id,
            batch_id,
            name: window.name,
            hash_type,
            attack_mode,
            hash_file_id: hash_file.id,
            wordlist_id: wordlist.id,
            rules: req.rules.clone(),
            agent_id: window.agent_id,
            skip: window.skip,
            limit: window.limit,
            status: SubJobStatus::Pending,
            progress: 0,
            speed: 0,
            eta: None,
            result: None,
            created_at: now,
            started_at: None,
            completed_at: None,
        })
        .collect();

    state.jobs.create_subjobs(subjobs.clone())?;
    Ok(Json(subjobs))
}

/// `GET /jobs/agent/:id` — ver `next_for_agent` (§4.5).
pub async fn next_for_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<Uuid>,
) -> Json<Option<SubJob>> {
    Json(state.jobs.next_for_agent(agent_id))
}

/// `GET /jobs/:id` — consultado por el vigilante de estado del agente
/// cada 5s (§4.7 "Sub-job status watcher"), ausente de la tabla §6
/// distilada pero necesario para que ese bucle funcione.
pub async fn get_subjob(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubJob>, CoordinatorError> {
    state
        .jobs
        .get(id)
        .map(Json)
        .ok_or_else(|| CoordinatorError::NotFound(format!("sub-job {id}")))
}

/// `POST /jobs/:id/start`.
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let outcome = state.jobs.transition(id, SubJobStatus::Running, None)?;
    publish_job_status(&state, &outcome.subjob);
    Ok(Json(outcome.subjob))
}

/// `PUT /jobs/:id/progress` — tick minimo, sin `agent_id` explicito
/// (§4.6, §9 nota a).
pub async fn progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let subjob = state
        .jobs
        .update_progress(id, req.progress, req.speed, req.eta)?;
    publish_job_progress(&state, &subjob);
    Ok(Json(subjob))
}

/// `PUT /jobs/:id/data` — tick enriquecido; valida que el agente
/// reportante sea el dueno del sub-job (§4.6).
pub async fn data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobDataRequest>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let current = state
        .jobs
        .get(id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("sub-job {id}")))?;
    if current.agent_id != req.agent_id {
        return Err(CoordinatorError::Forbidden(format!(
            "agent {} does not own sub-job {id}",
            req.agent_id
        )));
    }
    let subjob = state
        .jobs
        .update_progress(id, req.progress, req.speed, req.eta)?;
    publish_job_progress(&state, &subjob);
    Ok(Json(subjob))
}

/// `POST /jobs/:id/complete` — re-verifica el `plaintext` reportado
/// contra la ventana autoritativa antes de aceptarlo (§4.8 "Local
/// verification", invariante 5 "Verifier soundness").
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteRequest>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let subjob = state
        .jobs
        .get(id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("sub-job {id}")))?;
    let wordlist = state
        .catalog
        .get_wordlist(subjob.wordlist_id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("wordlist {}", subjob.wordlist_id)))?;
    let wordlist_path = state.catalog.resolve(&wordlist.path);

    let verified =
        verify_plaintext_in_window(&wordlist_path, subjob.skip, subjob.limit, &req.result).await?;

    let outcome = if verified {
        state.jobs.transition(id, SubJobStatus::Completed, Some(req.result))?
    } else {
        state.jobs.transition(
            id,
            SubJobStatus::Failed,
            Some("Password not found".to_string()),
        )?
    };

    publish_job_status(&state, &outcome.subjob);
    for sibling in &outcome.cancelled_siblings {
        publish_job_status(&state, sibling);
    }
    Ok(Json(outcome.subjob))
}

/// `POST /jobs/:id/fail`.
pub async fn fail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FailRequest>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let outcome = state.jobs.transition(id, SubJobStatus::Failed, Some(req.reason))?;
    publish_job_status(&state, &outcome.subjob);
    Ok(Json(outcome.subjob))
}

/// `POST /jobs/:id/pause`.
pub async fn pause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let outcome = state.jobs.transition(id, SubJobStatus::Paused, None)?;
    publish_job_status(&state, &outcome.subjob);
    Ok(Json(outcome.subjob))
}

/// `POST /jobs/:id/resume`.
pub async fn resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let outcome = state.jobs.transition(id, SubJobStatus::Running, None)?;
    publish_job_status(&state, &outcome.subjob);
    Ok(Json(outcome.subjob))
}

/// `POST /jobs/:id/stop`.
pub async fn stop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubJob>, CoordinatorError> {
    let outcome = state.jobs.transition(
        id,
        SubJobStatus::Cancelled,
        Some("Stopped by operator".to_string()),
    )?;
    publish_job_status(&state, &outcome.subjob);
    for sibling in &outcome.cancelled_siblings {
        publish_job_status(&state, sibling);
    }
    Ok(Json(outcome.subjob))
}
