use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::AppError;
use crate::services::catalog::{CatalogProvider, StaticCatalog};
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::utils::clock::{Clock, SystemClock};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: GameConfig,
    catalog: Option<Arc<dyn CatalogProvider>>,
    clock: Arc<dyn Clock>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            catalog: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogProvider>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Without an explicit catalog, load `config.catalog_path` (or start
    /// empty when no path is configured).
    pub fn build(self) -> Result<AppState, AppError> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => match &self.config.catalog_path {
                Some(path) => Arc::new(StaticCatalog::from_json_file(path)?),
                None => Arc::new(StaticCatalog::empty()),
            },
        };

        let service = SessionService::new(catalog, self.clock, self.config);
        Ok(AppState::new(Arc::new(service)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
