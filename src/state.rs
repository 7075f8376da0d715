use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::{AppConfig, StoreBackend};
use crate::foods::services::FoodMatcher;
use crate::storage::{JsonFileStore, MemoryStore, TrackerStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn TrackerStore>,
    pub foods: FoodMatcher,
    /// Serializes load-modify-save of daily logs.
    pub ledger_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.store {
            StoreBackend::File => {
                Arc::new(JsonFileStore::new(&config.data_dir).await?) as Arc<dyn TrackerStore>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on exit");
                Arc::new(MemoryStore::default()) as Arc<dyn TrackerStore>
            }
        };

        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn TrackerStore>) -> Self {
        Self {
            config,
            store,
            foods: FoodMatcher::default(),
            ledger_lock: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: std::path::PathBuf::from("unused"),
            store: StoreBackend::Memory,
        });
        Self::from_parts(config, Arc::new(MemoryStore::default()))
    }
}
