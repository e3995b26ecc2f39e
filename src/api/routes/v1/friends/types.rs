use serde::{Deserialize, Serialize};

use crate::domain::{friends_list::Friend, navigation::Navigation, profile::name_initial};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FriendsResponse {
    pub friends: Vec<FriendResponse>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendResponse {
    pub id: String,
    pub name: String,
    pub initial: String,
    /// Where "Message" navigates to.
    pub chat: Navigation,
}

impl FriendsResponse {
    pub fn new(friends: Vec<Friend>) -> Self {
        let friends = friends.into_iter().map(|friend| FriendResponse {
            initial: name_initial(&friend.name),
            chat: Navigation::to_chat(&friend.id, &friend.name),
            id: friend.id,
            name: friend.name,
        });

        Self {
            friends: friends.collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddFriendBody {
    pub friend_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddFriendResponse {
    pub created: bool,
}
