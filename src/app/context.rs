use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, VintiqueError};
use crate::assistant::{DescriptionAssistant, Describer};
use crate::config::Config;
use crate::store::{InventoryStore, SqliteSlot};

pub struct AppContext {
    pub store: InventoryStore,
    pub assistant: Arc<dyn Describer + Send + Sync>,
    pub config: Config,
}

impl AppContext {
    /// Open the inventory at `db_path`, falling back to the configured or default location.
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path.or_else(|| config.storage.db_path.clone()) {
            Some(p) => p,
            None => Self::default_db_path()?,
        };
        tracing::debug!(path = %db_path.display(), "opening inventory database");

        let store = InventoryStore::open(Box::new(SqliteSlot::new(&db_path)?))?;
        let assistant: Arc<dyn Describer + Send + Sync> =
            Arc::new(DescriptionAssistant::new(&config.assistant));

        Ok(Self {
            store,
            assistant,
            config,
        })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = InventoryStore::open(Box::new(SqliteSlot::in_memory()?))?;
        let assistant: Arc<dyn Describer + Send + Sync> =
            Arc::new(DescriptionAssistant::new(&config.assistant));

        Ok(Self {
            store,
            assistant,
            config,
        })
    }

    pub fn currency(&self) -> &str {
        &self.config.display.currency_symbol
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| VintiqueError::Config("Could not find data directory".into()))?;
        let vintique_dir = data_dir.join("vintique");
        std::fs::create_dir_all(&vintique_dir)?;
        Ok(vintique_dir.join("vintique.db"))
    }
}
