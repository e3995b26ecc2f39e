use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::{
    map_unique_violation,
    queries::{CREATE_FRIEND_REQUEST_QUERY, PENDING_REQUESTS_BY_SENDER_QUERY},
    StoreError,
};
use crate::{
    components::database::{DBConnection, DatabaseComponent},
    domain::friend_request::{FriendRequest, FriendRequestStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRequestsRepositoryImplementation {
    async fn get_pending_requests_sent_by(
        &self,
        sender_id: &str,
    ) -> Result<Vec<FriendRequest>, StoreError>;

    /// Stores the request. At most one pending request may exist per
    /// (sender, receiver); a second one fails with `StoreError::Conflict`.
    async fn create_friend_request(&self, request: &FriendRequest) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct FriendRequestsRepository {
    db_connection: Arc<Option<DBConnection>>,
}

impl FriendRequestsRepository {
    pub fn new(db: Arc<Option<DBConnection>>) -> Self {
        Self { db_connection: db }
    }
}

impl fmt::Debug for FriendRequestsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FriendRequestsRepository")
            .field("db_connection has value", &self.db_connection.is_some())
            .finish()
    }
}

fn friend_request_from_row(row: &PgRow) -> Result<FriendRequest, StoreError> {
    let status: String = row.try_get("status")?;
    let status = FriendRequestStatus::parse(&status)
        .ok_or_else(|| StoreError::InvalidDocument(format!("unknown request status {status}")))?;
    let id: Uuid = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(FriendRequest {
        id,
        sender_id: row.try_get("sender_id")?,
        receiver_id: row.try_get("receiver_id")?,
        status,
        created_at,
    })
}

#[async_trait]
impl FriendRequestsRepositoryImplementation for FriendRequestsRepository {
    #[tracing::instrument(name = "Get pending friend requests from DB")]
    async fn get_pending_requests_sent_by(
        &self,
        sender_id: &str,
    ) -> Result<Vec<FriendRequest>, StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        let rows = sqlx::query(PENDING_REQUESTS_BY_SENDER_QUERY)
            .bind(sender_id)
            .fetch_all(pool)
            .await?;

        rows.iter().map(friend_request_from_row).collect()
    }

    #[tracing::instrument(name = "Create friend request in DB", skip(request), fields(request_id = %request.id))]
    async fn create_friend_request(&self, request: &FriendRequest) -> Result<(), StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        sqlx::query(CREATE_FRIEND_REQUEST_QUERY)
            .bind(request.id)
            .bind(&request.sender_id)
            .bind(&request.receiver_id)
            .bind(request.status.as_str())
            .bind(request.created_at)
            .execute(pool)
            .await
            .map_err(|err| {
                map_unique_violation(
                    err,
                    &format!(
                        "{} already has a pending request to {}",
                        request.sender_id, request.receiver_id
                    ),
                )
            })?;

        Ok(())
    }
}
