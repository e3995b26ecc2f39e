use thiserror::Error;

use super::friends_service::get_friend_ids;
use crate::{
    components::database::DBRepositories, domain::friend_request::FriendRequest,
    entities::StoreError,
};

#[derive(Error, Debug)]
pub enum SendFriendRequestError {
    #[error("receiver id is empty")]
    EmptyReceiver,
    #[error("cannot send a friend request to yourself")]
    SelfRequest,
    #[error("{0} is already a friend")]
    AlreadyFriends(String),
    #[error("a friend request to {0} is already pending")]
    AlreadyPending(String),
    #[error(transparent)]
    Store(StoreError),
}

/// Creates a pending request from `sender_id` to `receiver_id`, stamped now
/// with a server-assigned id. A request that's already pending is refused
/// instead of duplicated.
#[tracing::instrument(name = "Send friend request", skip(repos))]
pub async fn send_friend_request(
    repos: &DBRepositories,
    sender_id: &str,
    receiver_id: &str,
) -> Result<FriendRequest, SendFriendRequestError> {
    if receiver_id.is_empty() {
        return Err(SendFriendRequestError::EmptyReceiver);
    }
    if receiver_id == sender_id {
        return Err(SendFriendRequestError::SelfRequest);
    }

    let friend_ids = get_friend_ids(repos, sender_id)
        .await
        .map_err(SendFriendRequestError::Store)?;
    if friend_ids.iter().any(|friend_id| friend_id == receiver_id) {
        return Err(SendFriendRequestError::AlreadyFriends(
            receiver_id.to_string(),
        ));
    }

    let request = FriendRequest::pending(sender_id, receiver_id);
    match repos.friend_requests.create_friend_request(&request).await {
        Ok(()) => {
            log::info!("Friend request {} sent from {sender_id} to {receiver_id}", request.id);
            Ok(request)
        }
        Err(err) if err.is_conflict() => Err(SendFriendRequestError::AlreadyPending(
            receiver_id.to_string(),
        )),
        Err(err) => {
            log::error!("Error sending friend request: {err}");
            Err(SendFriendRequestError::Store(err))
        }
    }
}
