use serde::{Deserialize, Serialize};

pub const CHAT_ROUTE_PREFIX: &str = "/chat/";

/// Transient state handed to the chat route alongside the navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub friend_name: String,
}

/// A client-side navigation. Producing one never touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub path: String,
    pub state: ChatState,
}

impl Navigation {
    pub fn to_chat(friend_id: &str, friend_name: &str) -> Self {
        Self {
            path: format!("{CHAT_ROUTE_PREFIX}{}", urlencoding::encode(friend_id)),
            state: ChatState {
                friend_name: friend_name.to_string(),
            },
        }
    }
}
