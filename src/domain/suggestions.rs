// Set algebra behind the friend suggestions panel.
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::profile::Profile;

pub const NO_SUGGESTIONS_MESSAGE: &str =
    "No suggestions available at the moment. Make sure to add your preferences in the profile section!";

/// What the row of a suggested profile lets the user do.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum SuggestionAction {
    #[serde(rename = "add_friend")]
    AddFriend,
    #[serde(rename = "sending")]
    Sending,
    #[serde(rename = "pending")]
    Pending,
}

impl SuggestionAction {
    pub fn label(&self) -> &'static str {
        match *self {
            SuggestionAction::AddFriend => "Add Friend",
            SuggestionAction::Sending => "Sending...",
            SuggestionAction::Pending => "Pending",
        }
    }

    /// Only "Add Friend" can be clicked.
    pub fn is_enabled(&self) -> bool {
        *self == SuggestionAction::AddFriend
    }
}

/// Keeps the candidates that are neither the user nor one of their friends.
/// Candidates are deduplicated by id and returned in id order.
pub fn filter_suggestions(
    user_id: &str,
    candidates: Vec<Profile>,
    friend_ids: &HashSet<String>,
) -> Vec<Profile> {
    candidates
        .into_iter()
        .filter(|profile| profile.id != user_id && !friend_ids.contains(&profile.id))
        .map(|profile| (profile.id.clone(), profile))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// A pending request always wins over an in-flight one, so a row never goes
/// back to "Add Friend" once the request is stored.
pub fn action_for(
    profile_id: &str,
    pending: &HashSet<String>,
    sending: &HashSet<String>,
) -> SuggestionAction {
    if pending.contains(profile_id) {
        SuggestionAction::Pending
    } else if sending.contains(profile_id) {
        SuggestionAction::Sending
    } else {
        SuggestionAction::AddFriend
    }
}
