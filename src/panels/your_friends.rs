use std::sync::Arc;

use serde::Serialize;
use tokio::{sync::Mutex, task::JoinHandle};

use super::scope::PanelScope;
use crate::{
    components::database::DBRepositories,
    domain::{
        friends_list::Friend, navigation::Navigation, profile::name_initial, user_id::UserId,
    },
    service::friends_service::load_friends,
};

#[derive(Debug, Default, Clone)]
pub struct YourFriendsState {
    pub friends: Vec<Friend>,
    pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendCard {
    pub id: String,
    pub name: String,
    pub initial: String,
}

pub struct YourFriendsPanel {
    repos: DBRepositories,
    current_user: Option<UserId>,
    state: Arc<Mutex<YourFriendsState>>,
    scope: PanelScope,
}

impl YourFriendsPanel {
    pub fn new(repos: DBRepositories, current_user: Option<UserId>) -> Self {
        Self {
            repos,
            current_user,
            state: Arc::new(Mutex::new(YourFriendsState::default())),
            scope: PanelScope::new(),
        }
    }

    /// Starts loading the friends list. A previous load still in flight is
    /// aborted. Returns `None` when nobody is signed in.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        let user_id = self.current_user.clone()?;
        self.scope.abort_all();

        let repos = self.repos.clone();
        let state = self.state.clone();

        Some(self.scope.spawn(async move {
            match load_friends(&repos, user_id.as_str()).await {
                Ok(friends) => {
                    let mut state = state.lock().await;
                    state.friends = friends;
                    state.loaded = true;
                }
                Err(err) => {
                    log::error!("Your friends panel > Load failed for {user_id}: {err}");
                }
            }
        }))
    }

    pub fn state_handle(&self) -> Arc<Mutex<YourFriendsState>> {
        self.state.clone()
    }

    pub async fn cards(&self) -> Vec<FriendCard> {
        self.state
            .lock()
            .await
            .friends
            .iter()
            .map(|friend| FriendCard {
                id: friend.id.clone(),
                name: friend.name.clone(),
                initial: name_initial(&friend.name),
            })
            .collect()
    }

    /// Handles a click on "Message": the navigation to the friend's chat,
    /// carrying their name. No store call is made.
    pub async fn message(&self, friend_id: &str) -> Option<Navigation> {
        self.state
            .lock()
            .await
            .friends
            .iter()
            .find(|friend| friend.id == friend_id)
            .map(|friend| Navigation::to_chat(&friend.id, &friend.name))
    }
}
