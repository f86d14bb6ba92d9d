// [apps/coordinator/src/middleware.rs]
/*!
 * APARATO: AUTH GUARD
 * RESPONSABILIDAD: EXIGIR UN BEARER TOKEN EN TODA RUTA SALVO LAS DE
 * DESCARGA Y `/healthz` (§6 AMBIENT).
 */

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

pub async fn auth_guard(
    State(expected_token): State<std::sync::Arc<str>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected_token.as_ref() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
