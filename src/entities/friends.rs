use std::{fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use super::{
    queries::{CREATE_FRIEND_EDGE_QUERY, USER_FRIEND_EDGES_QUERY},
    StoreError,
};
use crate::{
    components::database::{DBConnection, DatabaseComponent},
    domain::friend_edge::{build_pair_key, FriendEdge},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendsRepositoryImplementation {
    /// Every edge touching `user_id`, on either end.
    async fn get_user_friend_edges(&self, user_id: &str) -> Result<Vec<FriendEdge>, StoreError>;

    /// Stores the edge under its canonical pair key. Returns `false` when the
    /// pair was already stored, in any direction.
    async fn create_friendship(&self, user1_id: &str, user2_id: &str)
        -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct FriendsRepository {
    db_connection: Arc<Option<DBConnection>>,
}

impl FriendsRepository {
    pub fn new(db: Arc<Option<DBConnection>>) -> Self {
        Self { db_connection: db }
    }
}

impl fmt::Debug for FriendsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FriendsRepository")
            .field("db_connection has value", &self.db_connection.is_some())
            .finish()
    }
}

#[async_trait]
impl FriendsRepositoryImplementation for FriendsRepository {
    #[tracing::instrument(name = "Get user friend edges from DB")]
    async fn get_user_friend_edges(&self, user_id: &str) -> Result<Vec<FriendEdge>, StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        let rows = sqlx::query(USER_FRIEND_EDGES_QUERY)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|err| {
                log::error!("Couldn't fetch user {} friends, {}", user_id, err);
                err
            })?;

        rows.iter()
            .map(|row| -> Result<FriendEdge, StoreError> {
                Ok(FriendEdge {
                    user1_id: row.try_get("user1_id")?,
                    user2_id: row.try_get("user2_id")?,
                })
            })
            .collect()
    }

    #[tracing::instrument(name = "Create friendship in DB")]
    async fn create_friendship(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<bool, StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        let result = sqlx::query(CREATE_FRIEND_EDGE_QUERY)
            .bind(Uuid::new_v4())
            .bind(user1_id)
            .bind(user2_id)
            .bind(build_pair_key(user1_id, user2_id))
            .execute(pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
