use std::sync::Arc;

use eventcal_core::recurrence::ExpandOptions;
use eventcal_core::store::EventStore;
use tokio::sync::RwLock;

pub type SharedStore = Arc<RwLock<dyn EventStore>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub expand_options: ExpandOptions,
}

impl AppState {
    pub fn new(store: impl EventStore + 'static, expand_options: ExpandOptions) -> Self {
        let store: SharedStore = Arc::new(RwLock::new(store));
        AppState {
            store,
            expand_options,
        }
    }
}
