use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        profile::name_initial,
        suggestions::{action_for, SuggestionAction, NO_SUGGESTIONS_MESSAGE},
    },
    service::suggestions_service::SuggestionsSnapshot,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionResponse>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionResponse {
    pub id: String,
    pub name: String,
    pub preferences: Vec<String>,
    pub college_year: String,
    pub initial: String,
    pub action: SuggestionAction,
}

impl SuggestionsResponse {
    pub fn new(snapshot: SuggestionsSnapshot) -> Self {
        // Nothing is in flight server side.
        let sending = HashSet::new();

        let suggestions: Vec<SuggestionResponse> = snapshot
            .suggestions
            .into_iter()
            .map(|profile| SuggestionResponse {
                action: action_for(&profile.id, &snapshot.pending_receiver_ids, &sending),
                initial: name_initial(&profile.name),
                id: profile.id,
                name: profile.name,
                preferences: profile.preferences,
                college_year: profile.college_year,
            })
            .collect();

        let empty_message = suggestions
            .is_empty()
            .then(|| NO_SUGGESTIONS_MESSAGE.to_string());

        Self {
            suggestions,
            empty_message,
        }
    }
}
