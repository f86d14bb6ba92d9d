// [apps/agent/src/loops/file_watcher.rs]
/*!
 * APARATO: FILE WATCHER LOOP
 * RESPONSABILIDAD: RE-ESCANEAR EL AREA LOCAL CADA 5 MINUTOS Y
 * RE-ANUNCIAR CAPACIDADES SI CAMBIARON (§4.7 "File watcher").
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hashwarden_infra_agent_client::CoordinatorClient;
use tracing::{info, warn};

use crate::scan::scan_local_area;
use crate::state::AgentRuntimeState;

pub async fn run(
    client: Arc<CoordinatorClient>,
    state: Arc<AgentRuntimeState>,
    upload_dir: PathBuf,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    let mut last_count = match scan_local_area(&upload_dir).await {
        Ok(inventory) => inventory.len(),
        Err(err) => {
            warn!(error = %err, "initial local area scan failed");
            0
        }
    };

    while !state.is_shutting_down() {
        ticker.tick().await;
        match scan_local_area(&upload_dir).await {
            Ok(inventory) => {
                if inventory.len() != last_count {
                    info!(entries = inventory.len(), "local file area changed, re-advertising");
                    if let Err(err) = client.update_data(&state.agent_key, None, None, None).await {
                        warn!(error = %err, "re-advertisement after rescan failed");
                    }
                    last_count = inventory.len();
                }
            }
            Err(err) => warn!(error = %err, "local area rescan failed"),
        }
    }
}
