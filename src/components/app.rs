use std::sync::Arc;

use config::ConfigError;
use thiserror::Error;

use super::{
    configuration::{Config, Storage, StorageBackend},
    database::{DBRepositories, DatabaseComponent},
    health::HealthComponent,
    identity::{IdentityComponent, IdentityProvider},
};
use crate::entities::{memory::InMemoryStore, StoreError};

#[derive(Error, Debug)]
pub enum ComponentsError {
    #[error("couldn't read the configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("couldn't start the store: {0}")]
    Store(#[from] StoreError),
}

pub struct AppComponents {
    pub config: Config,
    pub health: HealthComponent,
    pub identity: Arc<dyn IdentityProvider + Send + Sync>,
    pub db_repos: DBRepositories,
}

/// Replacements for the components built from the configuration.
#[derive(Default)]
pub struct CustomComponents {
    pub identity: Option<Arc<dyn IdentityProvider + Send + Sync>>,
    pub store: Option<Arc<InMemoryStore>>,
    pub db_repos: Option<DBRepositories>,
}

impl AppComponents {
    pub async fn new(
        custom_config: Option<Config>,
        custom_components: Option<CustomComponents>,
    ) -> Result<Self, ComponentsError> {
        let config = match custom_config {
            Some(config) => config,
            None => Config::new()?,
        };
        let custom = custom_components.unwrap_or_default();

        let mut health = HealthComponent::default();

        let identity: Arc<dyn IdentityProvider + Send + Sync> = match custom.identity {
            Some(identity) => identity,
            None => Arc::new(IdentityComponent::new(&config.identity)),
        };

        let db_repos = match (custom.db_repos, custom.store) {
            (Some(db_repos), _) => db_repos,
            (None, Some(store)) => {
                health.register_component(store.clone(), "store".to_string());
                DBRepositories::in_memory(store)
            }
            (None, None) => Self::init_store(&config, &mut health).await?,
        };

        Ok(Self {
            config,
            health,
            identity,
            db_repos,
        })
    }

    async fn init_store(
        config: &Config,
        health: &mut HealthComponent,
    ) -> Result<DBRepositories, StoreError> {
        match config.storage.backend {
            StorageBackend::Memory => {
                let store = Arc::new(Self::init_memory_store(&config.storage)?);
                health.register_component(store.clone(), "store".to_string());
                Ok(DBRepositories::in_memory(store))
            }
            StorageBackend::Postgres => {
                let mut db = DatabaseComponent::new(&config.db);
                if let Err(err) = db.run().await {
                    log::error!("Error on running the DB: {:?}", err);
                    return Err(err);
                }
                let db_repos = db.db_repos.clone().ok_or(StoreError::NotConnected)?;
                health.register_component(Arc::new(db), "database".to_string());
                Ok(db_repos)
            }
        }
    }

    fn init_memory_store(storage: &Storage) -> Result<InMemoryStore, StoreError> {
        match &storage.seed_path {
            Some(path) if !path.is_empty() => InMemoryStore::from_seed_file(path),
            _ => Ok(InMemoryStore::new()),
        }
    }
}
