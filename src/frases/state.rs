use std::sync::Arc;

use tracing::info;

use crate::auth::AccessGate;
use crate::config::Config;
use crate::error::Result;
use crate::queue::SubmissionQueue;
use crate::store::QuoteStore;

/// Everything the handlers need, assembled once at startup. The store is
/// immutable and the queue carries its own writer lock, so the state is
/// shared as a plain `Arc` with no further synchronization.
pub struct AppState {
    pub store: QuoteStore,
    pub queue: SubmissionQueue,
    pub gate: AccessGate,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Arc<Self>> {
        let store =
            QuoteStore::load(&config.dataset_path)?.with_search_cap(config.search_cap);
        info!(
            "loaded {} quotes from {}",
            store.len(),
            config.dataset_path.display()
        );

        let queue = SubmissionQueue::new(&config.queue_path);
        let gate = AccessGate::new(config.submit_tokens.clone())?;

        Ok(Arc::new(Self { store, queue, gate }))
    }
}
