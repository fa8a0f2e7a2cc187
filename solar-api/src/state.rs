//! Shared application state for the API server.

use std::sync::Arc;

use solar::io::store::AssetStore;
use tokio::sync::broadcast;
use tracing::debug;

/// Events broadcast to SSE clients after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    AssetCreated { id: String },
    AssetUpdated { id: String },
    AssetDeleted { id: String },
}

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one store for this process.
    pub store: Arc<AssetStore>,
    /// Broadcast sender for change events.
    pub event_tx: Arc<broadcast::Sender<ChangeEvent>>,
}

impl AppState {
    pub fn new(store: AssetStore) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            store: Arc::new(store),
            event_tx: Arc::new(event_tx),
        }
    }

    /// Publish a change; having no subscribers is not an error.
    pub fn notify(&self, event: ChangeEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("no SSE subscribers for change event");
        }
    }
}
