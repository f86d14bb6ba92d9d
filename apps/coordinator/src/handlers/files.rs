// [apps/coordinator/src/handlers/files.rs]
/*!
 * APARATO: FILE HANDLERS
 * RESPONSABILIDAD: LISTADO Y DESCARGA EN STREAMING DE ARCHIVOS DE
 * CATALOGO (C3, §4.3, §6 "axum file streaming").
 *
 * A diferencia de una lectura completa en memoria, el cuerpo de la
 * respuesta se arma a partir de un `ReaderStream` sobre el archivo
 * abierto: el tamano del archivo nunca condiciona la memoria del
 * coordinador.
 */

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashwarden_domain_models::catalog::{HashFile, Wordlist};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::error::CoordinatorError;
use crate::state::AppState;

async fn stream_file(path: std::path::PathBuf, download_name: &str) -> Result<Response, CoordinatorError> {
    let file = File::open(&path).await?;
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);
    let disposition = format!("attachment; filename=\"{download_name}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `GET /hashfiles` — listado, contraparte natural de la descarga.
pub async fn list_hash_files(State(state): State<AppState>) -> Json<Vec<HashFile>> {
    Json(state.catalog.list_hash_files())
}

/// `GET /wordlists` — listado.
pub async fn list_wordlists(State(state): State<AppState>) -> Json<Vec<Wordlist>> {
    Json(state.catalog.list_wordlists())
}

/// `GET /hashfiles/:id/download` — ruta publica, fuera del guardian de
/// autenticacion (§6): un agente aun sin clave reclamada necesita poder
/// bajar el archivo de hashes antes de autenticarse contra el resto de
/// la API.
pub async fn download_hash_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CoordinatorError> {
    let entry = state
        .catalog
        .get_hash_file(id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("hash file {id}")))?;
    stream_file(state.catalog.resolve(&entry.path), &entry.name).await
}

/// `GET /wordlists/:id/download` — ruta publica (§6).
pub async fn download_wordlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CoordinatorError> {
    let entry = state
        .catalog
        .get_wordlist(id)
        .ok_or_else(|| CoordinatorError::NotFound(format!("wordlist {id}")))?;
    stream_file(state.catalog.resolve(&entry.path), &entry.name).await
}
