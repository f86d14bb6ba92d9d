// [libs/shared/telemetry/src/lib.rs]
/*!
 * APARATO: TELEMETRY BOOTSTRAP
 * RESPONSABILIDAD: INICIALIZACION DE TRACING Y CAPTURA GLOBAL DE PANICOS
 * (§7 AMBIENT — logging), COMPARTIDA POR `apps/coordinator` Y `apps/agent`.
 *
 * Capa compacta y legible para desarrollo; capa JSON cuando
 * `ENVIRONMENT=production`. Ambas respetan `RUST_LOG` via
 * `EnvFilter::from_default_env`, con una directiva por defecto que
 * silencia el ruido de `tower_http`/`hyper`/`reqwest`.
 */

use std::panic;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa tracing para `service_name`. Instala ademas un hook de
/// panico que emite el panico via `tracing::error!` antes del hook por
/// defecto, para que una tarea desatada (`tokio::spawn`) no desaparezca
/// en silencio (§7 AMBIENT).
pub fn init_tracing(service_name: &str) {
    let default_directive = format!(
        "{service_name}={level},tower_http=warn,hyper=warn,reqwest=warn",
        level = if cfg!(debug_assertions) { "debug" } else { "info" }
    );
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    let is_production = std::env::var("ENVIRONMENT").as_deref() == Ok("production");

    if is_production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    }

    let service = service_name.to_string();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        tracing::error!(target: "panic", service = %service, location = %location, "{}", payload);
    }));
}
