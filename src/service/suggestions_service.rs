use std::collections::HashSet;

use super::friends_service::get_friend_id_set;
use crate::{
    components::database::DBRepositories,
    domain::{profile::Profile, suggestions::filter_suggestions},
    entities::StoreError,
};

/// Everything the suggestions panel needs, read in one pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SuggestionsSnapshot {
    /// Receivers of the user's outgoing pending requests.
    pub pending_receiver_ids: HashSet<String>,
    pub friend_ids: HashSet<String>,
    /// Profiles sharing a preference with the user, minus the user and their friends.
    pub suggestions: Vec<Profile>,
}

#[tracing::instrument(name = "Get pending receivers", skip(repos))]
pub async fn get_pending_receiver_ids(
    repos: &DBRepositories,
    user_id: &str,
) -> Result<HashSet<String>, StoreError> {
    let requests = repos
        .friend_requests
        .get_pending_requests_sent_by(user_id)
        .await?;

    Ok(requests
        .into_iter()
        .map(|request| request.receiver_id)
        .collect())
}

/// Reads pending requests, friends, the user's own preferences and finally the
/// profiles sharing at least one of them, in that order.
#[tracing::instrument(name = "Load friend suggestions", skip(repos))]
pub async fn load_suggestions(
    repos: &DBRepositories,
    user_id: &str,
) -> Result<SuggestionsSnapshot, StoreError> {
    let pending_receiver_ids = get_pending_receiver_ids(repos, user_id).await?;

    let friend_ids = get_friend_id_set(repos, user_id).await?;

    // A user without a profile document has no preferences to match on.
    let preferences = repos
        .profiles
        .get_profile(user_id)
        .await?
        .map(|profile| profile.preferences)
        .unwrap_or_default();

    let candidates = repos
        .profiles
        .get_profiles_with_any_preference(&preferences)
        .await?;

    let suggestions = filter_suggestions(user_id, candidates, &friend_ids);
    log::debug!(
        "Suggestions for {user_id}: {} profiles, {} pending requests",
        suggestions.len(),
        pending_receiver_ids.len()
    );

    Ok(SuggestionsSnapshot {
        pending_receiver_ids,
        friend_ids,
        suggestions,
    })
}
