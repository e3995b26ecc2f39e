use serde::{Deserialize, Serialize};

/// A user's public-facing record, as stored in the `profiles` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub college_year: String,
}

impl Profile {
    pub fn shares_preference_with(&self, preferences: &[String]) -> bool {
        self.preferences.iter().any(|tag| preferences.contains(tag))
    }
}

/// First character of a display name, uppercased, used as avatar placeholder.
pub fn name_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
