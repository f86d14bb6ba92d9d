// [apps/coordinator/src/routes.rs]
/*!
 * APARATO: ROUTER COMPOSITION
 * RESPONSABILIDAD: TABLA DE RUTAS HTTP DEL COORDINADOR (§6).
 *
 * El guardian de autenticacion se aplica unicamente al sub-router
 * `authenticated`; `public` queda fuera de el y se fusiona por encima,
 * en vez de comprobar excepciones de ruta dentro del guardian mismo.
 */

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{agents, events, files, jobs};
use crate::middleware::auth_guard;
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    let auth_token = state.auth_token.clone();

    let authenticated = Router::new()
        .route("/agents", post(agents::claim).get(agents::list))
        .route("/agents/heartbeat", post(agents::heartbeat))
        .route("/agents/update-data", post(agents::update_data))
        .route("/agents/:id/status", put(agents::set_status))
        .route("/agents/:id/speed", put(agents::set_speed))
        .route("/agents/:id/shutdown", post(agents::shutdown))
        .route("/hashfiles", get(files::list_hash_files))
        .route("/wordlists", get(files::list_wordlists))
        .route("/jobs/auto", post(jobs::auto_split))
        .route("/jobs/agent/:id", get(jobs::next_for_agent))
        .route("/jobs/:id", get(jobs::get_subjob))
        .route("/jobs/:id/start", post(jobs::start))
        .route("/jobs/:id/progress", put(jobs::progress))
        .route("/jobs/:id/data", put(jobs::data))
        .route("/jobs/:id/complete", post(jobs::complete))
        .route("/jobs/:id/fail", post(jobs::fail))
        .route("/jobs/:id/pause", post(jobs::pause))
        .route("/jobs/:id/resume", post(jobs::resume))
        .route("/jobs/:id/stop", post(jobs::stop))
        .route("/events", get(events::subscribe))
        .layer(middleware::from_fn_with_state(auth_token, auth_guard));

    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/hashfiles/:id/download", get(files::download_hash_file))
        .route("/wordlists/:id/download", get(files::download_wordlist));

    public
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
