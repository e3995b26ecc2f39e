// In-process backend implementing the same contract as the Postgres
// repositories. Used for local runs (optionally seeded from a JSON file) and tests.
use std::{
    collections::BTreeMap,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{
    friend_requests::FriendRequestsRepositoryImplementation,
    friends::FriendsRepositoryImplementation, profiles::ProfilesRepositoryImplementation,
    StoreError,
};
use crate::{
    components::health::Healthy,
    domain::{friend_edge::FriendEdge, friend_request::FriendRequest, profile::Profile},
};

/// Shape of a seed file: one array per collection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub friends: Vec<FriendEdge>,
    #[serde(default)]
    pub friend_requests: Vec<FriendRequest>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<BTreeMap<String, Profile>>,
    friends: RwLock<Vec<FriendEdge>>,
    friend_requests: RwLock<Vec<FriendRequest>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed edges are stored as given: legacy data may hold both directions
    /// of the same pair.
    pub fn from_seed(seed: SeedData) -> Self {
        let profiles = seed
            .profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();

        Self {
            profiles: RwLock::new(profiles),
            friends: RwLock::new(seed.friends),
            friend_requests: RwLock::new(seed.friend_requests),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            StoreError::Unavailable(format!("couldn't read seed file {}: {err}", path.display()))
        })?;
        let seed: SeedData = serde_json::from_str(&content)
            .map_err(|err| StoreError::InvalidDocument(err.to_string()))?;

        log::info!(
            "Loaded seed {}: {} profiles, {} friend edges, {} friend requests",
            path.display(),
            seed.profiles.len(),
            seed.friends.len(),
            seed.friend_requests.len()
        );

        Ok(Self::from_seed(seed))
    }

    /// Appends an edge without the pair-key check, the way an external writer would.
    pub async fn insert_raw_friend_edge(&self, user1_id: &str, user2_id: &str) {
        self.friends
            .write()
            .await
            .push(FriendEdge::new(user1_id, user2_id));
    }

    pub async fn friend_requests(&self) -> Vec<FriendRequest> {
        self.friend_requests.read().await.clone()
    }

    /// Makes every call fail with `StoreError::Unavailable` until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProfilesRepositoryImplementation for InMemoryStore {
    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>, StoreError> {
        self.check_available()?;
        Ok(self.profiles.read().await.get(profile_id).cloned())
    }

    async fn get_profiles_with_any_preference(
        &self,
        preferences: &[String],
    ) -> Result<Vec<Profile>, StoreError> {
        self.check_available()?;
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .filter(|profile| profile.shares_preference_with(preferences))
            .cloned()
            .collect())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.check_available()?;
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl FriendsRepositoryImplementation for InMemoryStore {
    async fn get_user_friend_edges(&self, user_id: &str) -> Result<Vec<FriendEdge>, StoreError> {
        self.check_available()?;
        Ok(self
            .friends
            .read()
            .await
            .iter()
            .filter(|edge| edge.counterpart(user_id).is_some())
            .cloned()
            .collect())
    }

    async fn create_friendship(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        let edge = FriendEdge::new(user1_id, user2_id);
        let pair_key = edge.pair_key();

        let mut friends = self.friends.write().await;
        if friends.iter().any(|stored| stored.pair_key() == pair_key) {
            return Ok(false);
        }
        friends.push(edge);
        Ok(true)
    }
}

#[async_trait]
impl FriendRequestsRepositoryImplementation for InMemoryStore {
    async fn get_pending_requests_sent_by(
        &self,
        sender_id: &str,
    ) -> Result<Vec<FriendRequest>, StoreError> {
        self.check_available()?;
        Ok(self
            .friend_requests
            .read()
            .await
            .iter()
            .filter(|request| request.sender_id == sender_id && request.is_pending())
            .cloned()
            .collect())
    }

    async fn create_friend_request(&self, request: &FriendRequest) -> Result<(), StoreError> {
        self.check_available()?;
        let mut requests = self.friend_requests.write().await;

        let already_pending = request.is_pending()
            && requests.iter().any(|stored| {
                stored.is_pending()
                    && stored.sender_id == request.sender_id
                    && stored.receiver_id == request.receiver_id
            });
        if already_pending {
            return Err(StoreError::Conflict(format!(
                "{} already has a pending request to {}",
                request.sender_id, request.receiver_id
            )));
        }

        requests.push(request.clone());
        Ok(())
    }
}

#[async_trait]
impl Healthy for InMemoryStore {
    async fn is_healthy(&self) -> bool {
        self.check_available().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn profile(id: &str, preferences: &[&str]) -> Profile {
        Profile {
            id: id.to_string(),
            name: id.to_uppercase(),
            preferences: preferences.iter().map(|p| p.to_string()).collect(),
            college_year: "Freshman".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_array_contains_any() {
        let store = InMemoryStore::from_seed(SeedData {
            profiles: vec![
                profile("a", &["chess"]),
                profile("b", &["painting"]),
                profile("c", &["hiking", "chess"]),
            ],
            ..Default::default()
        });

        let found = store
            .get_profiles_with_any_preference(&["hiking".to_string(), "chess".to_string()])
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(store
            .get_profiles_with_any_preference(&[])
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn test_create_friendship_uses_pair_key() {
        let store = InMemoryStore::new();

        assert!(store.create_friendship("alice", "bob").await.unwrap());
        assert!(!store.create_friendship("bob", "alice").await.unwrap());
        assert!(!store.create_friendship("alice", "bob").await.unwrap());

        assert_eq!(store.get_user_friend_edges("bob").await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_pairs_with_separator_in_ids_are_distinct() {
        let store = InMemoryStore::new();

        assert!(store.create_friendship("a+b", "c").await.unwrap());
        assert!(store.create_friendship("a", "b+c").await.unwrap());
        assert!(!store.create_friendship("b+c", "a").await.unwrap());

        let edges = store.get_user_friend_edges("a").await.unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].counterpart("a"), Some("b+c"));
    }

    #[actix_web::test]
    async fn test_raw_edges_keep_both_directions() {
        let store = InMemoryStore::new();
        store.insert_raw_friend_edge("alice", "bob").await;
        store.insert_raw_friend_edge("bob", "alice").await;

        assert_eq!(store.get_user_friend_edges("alice").await.unwrap().len(), 2);
        assert!(store.get_user_friend_edges("carol").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_second_pending_request_conflicts() {
        let store = InMemoryStore::new();

        store
            .create_friend_request(&FriendRequest::pending("alice", "bob"))
            .await
            .unwrap();
        let second = store
            .create_friend_request(&FriendRequest::pending("alice", "bob"))
            .await;

        assert!(second.unwrap_err().is_conflict());
        store
            .create_friend_request(&FriendRequest::pending("bob", "alice"))
            .await
            .unwrap();
        assert_eq!(store.friend_requests().await.len(), 2);
    }

    #[actix_web::test]
    async fn test_unavailable_store_fails_and_is_unhealthy() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        assert!(store.get_profile("a").await.is_err());
        assert!(!store.is_healthy().await);

        store.set_unavailable(false);
        assert!(store.get_profile("a").await.unwrap().is_none());
        assert!(store.is_healthy().await);
    }

    #[actix_web::test]
    async fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "profiles": [{{"id": "a", "name": "Alice", "preferences": ["chess"], "collegeYear": "Junior"}}],
                "friends": [{{"user1Id": "a", "user2Id": "b"}}, {{"user1Id": "b", "user2Id": "a"}}]
            }}"#
        )
        .unwrap();

        let store = InMemoryStore::from_seed_file(file.path()).unwrap();

        let alice = store.get_profile("a").await.unwrap().unwrap();
        assert_eq!(alice.college_year, "Junior");
        assert_eq!(store.get_user_friend_edges("a").await.unwrap().len(), 2);
        assert!(store.friend_requests().await.is_empty());
    }

    #[test]
    fn test_from_missing_seed_file() {
        let result = InMemoryStore::from_seed_file("/definitely/not/here.json");

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
