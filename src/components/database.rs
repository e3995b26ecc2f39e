use std::{fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{configuration::Database as DatabaseConfig, health::Healthy};
use crate::entities::{
    friend_requests::{FriendRequestsRepository, FriendRequestsRepositoryImplementation},
    friends::{FriendsRepository, FriendsRepositoryImplementation},
    memory::InMemoryStore,
    profiles::{ProfilesRepository, ProfilesRepositoryImplementation},
    StoreError,
};

pub type DBConnection = PgPool;

/// The three collections the service reads and writes, behind their
/// repository traits so any backend can stand in.
#[derive(Clone)]
pub struct DBRepositories {
    pub profiles: Arc<dyn ProfilesRepositoryImplementation + Send + Sync>,
    pub friends: Arc<dyn FriendsRepositoryImplementation + Send + Sync>,
    pub friend_requests: Arc<dyn FriendRequestsRepositoryImplementation + Send + Sync>,
}

impl DBRepositories {
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            profiles: store.clone(),
            friends: store.clone(),
            friend_requests: store,
        }
    }
}

impl fmt::Debug for DBRepositories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DBRepositories").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct DatabaseComponent {
    db_host: String,
    db_user: String,
    db_password: String,
    db_name: String,
    db_connection: Arc<Option<DBConnection>>,
    pub db_repos: Option<DBRepositories>,
}

impl fmt::Debug for DatabaseComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseComponent")
            .field("db_host", &self.db_host)
            .field("db_name", &self.db_name)
            .field("is_connected", &self.is_connected())
            .finish()
    }
}

impl DatabaseComponent {
    pub fn new(db_config: &DatabaseConfig) -> Self {
        Self {
            db_host: db_config.host.clone(),
            db_user: db_config.user.clone(),
            db_password: db_config.password.clone(),
            db_name: db_config.name.clone(),
            db_connection: Arc::new(None),
            db_repos: None,
        }
    }

    pub async fn run(&mut self) -> Result<(), StoreError> {
        if self.db_connection.is_some() {
            log::debug!("DB Connection is already set.");
            return Ok(());
        }

        let url = format!(
            "postgres://{}:{}@{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_name
        );
        log::debug!("DB Host: {}, DB Name: {}", self.db_host, self.db_name);

        // Connection Pool
        let pool = PgPoolOptions::new()
            .min_connections(5)
            .max_connections(10)
            .connect(&url)
            .await?;

        log::debug!("Running Database migrations...");

        // Just runs the pending migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|err| StoreError::Unavailable(format!("migrations failed: {err}")))?;

        log::debug!("Migrations executed!");

        self.db_connection = Arc::new(Some(pool));
        self.db_repos = Some(DBRepositories {
            profiles: Arc::new(ProfilesRepository::new(self.db_connection.clone())),
            friends: Arc::new(FriendsRepository::new(self.db_connection.clone())),
            friend_requests: Arc::new(FriendRequestsRepository::new(self.db_connection.clone())),
        });

        Ok(())
    }

    pub fn get_connection(
        db_connection: &Arc<Option<DBConnection>>,
    ) -> Result<&DBConnection, StoreError> {
        db_connection.as_ref().as_ref().ok_or(StoreError::NotConnected)
    }

    pub fn is_connected(&self) -> bool {
        self.db_connection.is_some()
    }
}

#[async_trait]
impl Healthy for DatabaseComponent {
    async fn is_healthy(&self) -> bool {
        match self.db_connection.as_ref() {
            Some(pool) => sqlx::query("SELECT CURRENT_TIMESTAMP;")
                .fetch_optional(pool)
                .await
                .map_or(false, |row| row.is_some()),
            None => false,
        }
    }
}
