mod common;
pub use common::*;

use actix_web::test;
use common::{auth_header, get_app, get_configuration, profile, seeded_store, ALICE};
use friends_service::{
    api::routes::v1::suggestions::types::SuggestionsResponse,
    domain::{
        friend_request::FriendRequest,
        suggestions::{SuggestionAction, NO_SUGGESTIONS_MESSAGE},
    },
    entities::{
        friend_requests::FriendRequestsRepositoryImplementation,
        profiles::ProfilesRepositoryImplementation,
    },
};

#[actix_web::test]
async fn test_suggests_profiles_sharing_preferences() {
    let app = test::init_service(get_app(get_configuration(), seeded_store()).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(auth_header())
        .to_request();
    let response: SuggestionsResponse = test::call_and_read_body_json(&app, req).await;

    // a is already a friend, b shares nothing
    assert_eq!(response.suggestions.len(), 1);
    let suggestion = &response.suggestions[0];
    assert_eq!(suggestion.id, "c");
    assert_eq!(suggestion.initial, "C");
    assert_eq!(suggestion.action, SuggestionAction::AddFriend);
    assert!(response.empty_message.is_none());
}

#[actix_web::test]
async fn test_pending_request_shows_pending() {
    let store = seeded_store();
    store
        .create_friend_request(&FriendRequest::pending(ALICE, "c"))
        .await
        .unwrap();
    let app = test::init_service(get_app(get_configuration(), store).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(auth_header())
        .to_request();
    let response: SuggestionsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.suggestions[0].action, SuggestionAction::Pending);
}

#[actix_web::test]
async fn test_no_preferences_gives_empty_message() {
    let store = seeded_store();
    store
        .upsert_profile(&profile(ALICE, "Alice", &[]))
        .await
        .unwrap();
    let app = test::init_service(get_app(get_configuration(), store).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(auth_header())
        .to_request();
    let response: SuggestionsResponse = test::call_and_read_body_json(&app, req).await;

    assert!(response.suggestions.is_empty());
    assert_eq!(response.empty_message.as_deref(), Some(NO_SUGGESTIONS_MESSAGE));
}

#[actix_web::test]
async fn test_suggestions_need_a_token() {
    let app = test::init_service(get_app(get_configuration(), seeded_store()).await).await;

    let req = test::TestRequest::get().uri("/v1/suggestions").to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(("authorization", "Bearer unknown"))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn test_store_offline_is_an_internal_error() {
    let store = seeded_store();
    store.set_unavailable(true);
    let app = test::init_service(get_app(get_configuration(), store).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(auth_header())
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 500);
}

#[actix_web::test]
async fn test_suggestions_are_overlap_minus_self_and_friends() {
    use friends_service::{
        domain::friend_edge::FriendEdge,
        entities::memory::{InMemoryStore, SeedData},
    };
    use std::sync::Arc;

    let store = Arc::new(InMemoryStore::from_seed(SeedData {
        profiles: vec![
            profile(ALICE, "Alice", &["hiking", "chess"]),
            profile("d", "Dana", &["hiking"]),
            profile("e", "Eli", &["chess"]),
            profile("f", "Fay", &["chess", "painting"]),
            profile("g", "Gus", &["painting"]),
            profile("h", "Hal", &[]),
            profile("i", "Ivo", &["hiking"]),
        ],
        // Stored with alice on the receiving side.
        friends: vec![FriendEdge::new("d", ALICE), FriendEdge::new("i", ALICE)],
        friend_requests: vec![FriendRequest::pending(ALICE, "e")],
    }));
    let app = test::init_service(get_app(get_configuration(), store).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/suggestions")
        .insert_header(auth_header())
        .to_request();
    let response: SuggestionsResponse = test::call_and_read_body_json(&app, req).await;

    let suggestions: Vec<(&str, SuggestionAction)> = response
        .suggestions
        .iter()
        .map(|s| (s.id.as_str(), s.action))
        .collect();
    assert_eq!(
        suggestions,
        vec![
            ("e", SuggestionAction::Pending),
            ("f", SuggestionAction::AddFriend)
        ]
    );
}
