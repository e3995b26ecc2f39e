use std::{collections::HashSet, sync::Arc};

use serde::Serialize;
use tokio::{sync::Mutex, task::JoinHandle};

use super::scope::PanelScope;
use crate::{
    components::database::DBRepositories,
    domain::{
        profile::{name_initial, Profile},
        suggestions::{action_for, SuggestionAction, NO_SUGGESTIONS_MESSAGE},
        user_id::UserId,
    },
    service::{
        friend_requests_service::{send_friend_request, SendFriendRequestError},
        suggestions_service::load_suggestions,
    },
};

#[derive(Debug, Default, Clone)]
pub struct SuggestionsState {
    pub suggestions: Vec<Profile>,
    pub pending_requests: HashSet<String>,
    /// Rows with a friend request in flight.
    pub sending_request: HashSet<String>,
    pub loaded: bool,
}

/// One rendered row of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionCard {
    pub id: String,
    pub name: String,
    pub initial: String,
    pub college_year: String,
    pub preferences: String,
    pub action: SuggestionAction,
    /// Button text for `action`.
    pub label: &'static str,
}

/// What a click on "Add Friend" ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    NotSignedIn,
    AlreadyInFlight,
    AlreadyPending,
    Failed,
}

pub struct SuggestionsPanel {
    repos: DBRepositories,
    current_user: Option<UserId>,
    state: Arc<Mutex<SuggestionsState>>,
    scope: PanelScope,
}

impl SuggestionsPanel {
    pub fn new(repos: DBRepositories, current_user: Option<UserId>) -> Self {
        Self {
            repos,
            current_user,
            state: Arc::new(Mutex::new(SuggestionsState::default())),
            scope: PanelScope::new(),
        }
    }

    /// Starts loading the panel. A previous load still in flight is aborted.
    /// Returns `None` when nobody is signed in.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        let user_id = self.current_user.clone()?;
        self.scope.abort_all();

        let repos = self.repos.clone();
        let state = self.state.clone();

        Some(self.scope.spawn(async move {
            match load_suggestions(&repos, user_id.as_str()).await {
                Ok(snapshot) => {
                    let mut state = state.lock().await;
                    state.pending_requests = snapshot.pending_receiver_ids;
                    state.suggestions = snapshot.suggestions;
                    state.loaded = true;
                }
                Err(err) => {
                    log::error!("Suggestions panel > Load failed for {user_id}: {err}");
                }
            }
        }))
    }

    /// Shared handle to the panel state, readable after the panel is gone.
    pub fn state_handle(&self) -> Arc<Mutex<SuggestionsState>> {
        self.state.clone()
    }

    pub async fn cards(&self) -> Vec<SuggestionCard> {
        let state = self.state.lock().await;

        state
            .suggestions
            .iter()
            .map(|profile| {
                let action =
                    action_for(&profile.id, &state.pending_requests, &state.sending_request);
                SuggestionCard {
                    id: profile.id.clone(),
                    name: profile.name.clone(),
                    initial: name_initial(&profile.name),
                    college_year: profile.college_year.clone(),
                    preferences: format!("Preferences: {}", profile.preferences.join(", ")),
                    action,
                    label: action.label(),
                }
            })
            .collect()
    }

    /// Message shown instead of the list when there is nothing to suggest.
    pub async fn empty_message(&self) -> Option<&'static str> {
        if self.state.lock().await.suggestions.is_empty() {
            Some(NO_SUGGESTIONS_MESSAGE)
        } else {
            None
        }
    }

    /// Handles a click on "Add Friend" for `receiver_id`. The row is flagged as
    /// sending while the write is in flight, so repeated clicks are ignored.
    /// Failures are logged and leave the row clickable again.
    pub async fn send_friend_request(&self, receiver_id: &str) -> SendOutcome {
        let user_id = match &self.current_user {
            Some(user_id) => user_id,
            None => return SendOutcome::NotSignedIn,
        };

        {
            let mut state = self.state.lock().await;
            if state.pending_requests.contains(receiver_id) {
                return SendOutcome::AlreadyPending;
            }
            if !state.sending_request.insert(receiver_id.to_string()) {
                return SendOutcome::AlreadyInFlight;
            }
        } // release the state while writing

        let result = send_friend_request(&self.repos, user_id.as_str(), receiver_id).await;

        let mut state = self.state.lock().await;
        state.sending_request.remove(receiver_id);

        match result {
            Ok(_) => {
                state.pending_requests.insert(receiver_id.to_string());
                SendOutcome::Sent
            }
            Err(SendFriendRequestError::AlreadyPending(_)) => {
                state.pending_requests.insert(receiver_id.to_string());
                SendOutcome::AlreadyPending
            }
            Err(err) => {
                log::error!("Error sending friend request: {err}");
                SendOutcome::Failed
            }
        }
    }
}
