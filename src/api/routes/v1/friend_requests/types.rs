use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::friend_request::{FriendRequest, FriendRequestStatus};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFriendRequestBody {
    pub receiver_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<FriendRequest> for FriendRequestResponse {
    fn from(request: FriendRequest) -> Self {
        Self {
            id: request.id.to_string(),
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status,
            created_at: request.created_at,
        }
    }
}
