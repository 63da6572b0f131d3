use std::sync::Arc;

use crate::{
    config::Config,
    repository::{InMemoryStore, TripRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub trips: Arc<dyn TripRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        trips: Arc<dyn TripRepository>,
    ) -> Self {
        Self {
            config,
            users,
            trips,
        }
    }

    /// State backed by a fresh [`InMemoryStore`] serving both repositories.
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(InMemoryStore::default());
        Self::new(config, store.clone(), store)
    }
}
