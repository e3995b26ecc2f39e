use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::profile::Profile;

pub const UNKNOWN_FRIEND_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
}

impl Friend {
    /// Builds the entry for `friend_id`; a missing profile or an empty name
    /// reads as "Unknown".
    pub fn from_profile(friend_id: &str, profile: Option<Profile>) -> Self {
        let name = profile
            .map(|profile| profile.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_FRIEND_NAME.to_string());

        Self {
            id: friend_id.to_string(),
            name,
        }
    }
}

/// Collapses entries sharing the same id. Each id keeps the position of its
/// first occurrence and the value of its last one.
pub fn dedupe_friends(friends: Vec<Friend>) -> Vec<Friend> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Friend> = Vec::with_capacity(friends.len());

    for friend in friends {
        match positions.get(&friend.id) {
            Some(&index) => unique[index] = friend,
            None => {
                positions.insert(friend.id.clone(), unique.len());
                unique.push(friend);
            }
        }
    }

    unique
}
