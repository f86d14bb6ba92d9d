// [apps/coordinator/src/events.rs]
/*!
 * APARATO: EVENT BUS (C6)
 * RESPONSABILIDAD: DIFUSION DE LOS CUATRO EVENTOS DE TIEMPO REAL A LOS
 * SUSCRIPTORES DEL WEBSOCKET (§4.6).
 *
 * `tokio::sync::broadcast` ya da semantica drop-oldest-on-lag de forma
 * nativa (`RecvError::Lagged(n)`); en vez de reimplementar un ring
 * buffer, el bus solo envuelve el canal y expone un contador de
 * desbordamiento por suscripcion derivado de ese `n` (§4.6 AMBIENT).
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashwarden_domain_models::RealTimeEvent;
use tokio::sync::broadcast;

pub struct EventBus {
    sender: broadcast::Sender<RealTimeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publica un evento; sin suscriptores activos esto es un no-op
    /// (ingresar nunca bloquea, §4.6 "does not block ingress").
    pub fn publish(&self, event: RealTimeEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
            lagged: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Una suscripcion individual con su propio contador de desbordamiento.
pub struct EventSubscription {
    receiver: broadcast::Receiver<RealTimeEvent>,
    lagged: Arc<AtomicU64>,
}

impl EventSubscription {
    /// Total de eventos descartados por retraso desde que se abrio esta
    /// suscripcion.
    pub fn overflow_count(&self) -> u64 {
        self.lagged.load(Ordering::Relaxed)
    }

    /// Siguiente evento en orden de llegada; `None` una vez que el bus se
    /// cierra (nunca ocurre mientras `EventBus` siga vivo).
    pub async fn next(&mut self) -> Option<RealTimeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    self.lagged.fetch_add(skipped, Ordering::Relaxed);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
