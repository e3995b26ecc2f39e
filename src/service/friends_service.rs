use std::collections::HashSet;

use futures_util::future::try_join_all;
use thiserror::Error;

use crate::{
    components::database::DBRepositories,
    domain::friends_list::{dedupe_friends, Friend},
    entities::StoreError,
};

#[derive(Error, Debug)]
pub enum AddFriendError {
    #[error("friend id is empty")]
    EmptyFriendId,
    #[error("cannot befriend yourself")]
    SelfFriendship,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ids at the far end of every edge touching `user_id`. Self-loops are skipped.
#[tracing::instrument(name = "Get friend ids", skip(repos))]
pub async fn get_friend_ids(
    repos: &DBRepositories,
    user_id: &str,
) -> Result<Vec<String>, StoreError> {
    let edges = repos.friends.get_user_friend_edges(user_id).await?;

    Ok(edges
        .iter()
        .filter_map(|edge| edge.counterpart(user_id))
        .filter(|friend_id| *friend_id != user_id)
        .map(str::to_string)
        .collect())
}

pub async fn get_friend_id_set(
    repos: &DBRepositories,
    user_id: &str,
) -> Result<HashSet<String>, StoreError> {
    Ok(get_friend_ids(repos, user_id).await?.into_iter().collect())
}

/// Loads the user's friends with their display names. Profiles are fetched
/// concurrently, one lookup per edge; a single failed lookup fails the whole
/// load. Duplicated edges collapse to one entry per friend.
#[tracing::instrument(name = "Load friends", skip(repos))]
pub async fn load_friends(repos: &DBRepositories, user_id: &str) -> Result<Vec<Friend>, StoreError> {
    let friend_ids = get_friend_ids(repos, user_id).await?;

    let friends = try_join_all(friend_ids.iter().map(|friend_id| async move {
        let profile = repos.profiles.get_profile(friend_id).await?;
        Ok::<Friend, StoreError>(Friend::from_profile(friend_id, profile))
    }))
    .await
    .map_err(|err| {
        log::error!("Load friends > Profile lookup failed for {user_id}'s friends: {err}");
        err
    })?;

    Ok(dedupe_friends(friends))
}

/// Stores the friendship under its canonical pair key. Returns whether a new
/// edge was written.
#[tracing::instrument(name = "Add friend", skip(repos))]
pub async fn add_friend(
    repos: &DBRepositories,
    user_id: &str,
    friend_id: &str,
) -> Result<bool, AddFriendError> {
    if friend_id.is_empty() {
        return Err(AddFriendError::EmptyFriendId);
    }
    if friend_id == user_id {
        return Err(AddFriendError::SelfFriendship);
    }

    let created = repos.friends.create_friendship(user_id, friend_id).await?;
    if created {
        log::info!("Friendship stored between {user_id} and {friend_id}");
    }
    Ok(created)
}
