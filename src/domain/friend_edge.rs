use serde::{Deserialize, Serialize};

const PAIR_KEY_SEPARATOR: &str = "+";

/// A stored friendship relation: `user1_id` considers `user2_id` a friend.
/// The same pair may be stored in both directions by older writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEdge {
    pub user1_id: String,
    pub user2_id: String,
}

impl FriendEdge {
    pub fn new(user1_id: &str, user2_id: &str) -> Self {
        Self {
            user1_id: user1_id.to_string(),
            user2_id: user2_id.to_string(),
        }
    }

    /// Returns the far end of the edge as seen from `user_id`, or `None` when
    /// the edge doesn't touch that user.
    pub fn counterpart(&self, user_id: &str) -> Option<&str> {
        if self.user1_id == user_id {
            Some(&self.user2_id)
        } else if self.user2_id == user_id {
            Some(&self.user1_id)
        } else {
            None
        }
    }

    pub fn pair_key(&self) -> String {
        build_pair_key(&self.user1_id, &self.user2_id)
    }
}

/// Builds the canonical key of an unordered pair of users by sorting both ids
/// and joining them with a "+" separator. Both directions of the same
/// friendship share the key.
///
/// Ids are opaque and may contain the separator, so the lower id is prefixed
/// with its byte length: `("a+b", "c")` and `("a", "b+c")` get different keys.
pub fn build_pair_key(first_user: &str, second_user: &str) -> String {
    let mut users = [first_user, second_user];
    users.sort_unstable();
    let [low, high] = users;

    format!("{}:{low}{PAIR_KEY_SEPARATOR}{high}", low.len())
}
