// [apps/coordinator/src/error.rs]
/*!
 * APARATO: COORDINATOR ERROR
 * RESPONSABILIDAD: TAXONOMIA DE ERRORES DEL COORDINADOR Y SU MAPEO A
 * CODIGOS HTTP (§7).
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashwarden_domain_store::catalog::CatalogError;
use hashwarden_domain_store::job_store::JobStoreError;
use hashwarden_domain_store::registry::RegistryError;
use hashwarden_core_splitter::SplitterError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("VALIDATION: {0}")]
    Validation(String),

    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    #[error("FORBIDDEN: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    JobStore(#[from] JobStoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Splitter(#[from] SplitterError),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for CoordinatorError {
    fn into_response(self) -> Response {
        let status = match &self {
            CoordinatorError::Validation(_) => StatusCode::BAD_REQUEST,
            CoordinatorError::NotFound(_) => StatusCode::NOT_FOUND,
            CoordinatorError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoordinatorError::Registry(err) => match err {
                RegistryError::UnknownKey => StatusCode::UNAUTHORIZED,
                RegistryError::NameInUse(_)
                | RegistryError::NameConflict(_)
                | RegistryError::AddressConflict(_) => StatusCode::CONFLICT,
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            },
            CoordinatorError::JobStore(err) => match err {
                JobStoreError::NotFound(_) => StatusCode::NOT_FOUND,
                JobStoreError::IllegalTransition(..) => StatusCode::CONFLICT,
            },
            CoordinatorError::Catalog(err) => match err {
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            CoordinatorError::Splitter(_) => StatusCode::BAD_REQUEST,
            CoordinatorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
