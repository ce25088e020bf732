use std::sync::{Arc, Mutex, MutexGuard};

use orderdesk_orders::OrderEngine;

/// Shared handle to the order engine.
///
/// One mutex spans all three registries: a request runs against the engine
/// to completion before the next one touches it, which is what preserves
/// the stock invariant and id uniqueness under a multi-threaded host.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<OrderEngine>>,
}

impl AppState {
    pub fn new(engine: OrderEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// State a fresh process starts with (demo catalog + offers).
    pub fn seeded() -> Self {
        Self::new(OrderEngine::seeded())
    }

    pub fn engine(&self) -> MutexGuard<'_, OrderEngine> {
        // A panicking handler must not take the engine down for every
        // later request; the registries stay consistent because mutations
        // only land after all gates have passed.
        self.engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
