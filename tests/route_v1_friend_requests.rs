mod common;
pub use common::*;

use std::sync::Arc;

use actix_web::test;
use common::{auth_header, get_app, get_configuration, seeded_store, ALICE};
use friends_service::{
    api::routes::v1::friend_requests::types::{CreateFriendRequestBody, FriendRequestResponse},
    domain::friend_request::FriendRequestStatus,
    entities::memory::InMemoryStore,
};

fn body(receiver_id: &str) -> CreateFriendRequestBody {
    CreateFriendRequestBody {
        receiver_id: receiver_id.to_string(),
    }
}

#[actix_web::test]
async fn test_send_friend_request_once() {
    let store: Arc<InMemoryStore> = seeded_store();
    let app = test::init_service(get_app(get_configuration(), store.clone()).await).await;

    let req = test::TestRequest::post()
        .uri("/v1/friend-requests")
        .insert_header(auth_header())
        .set_json(body("c"))
        .to_request();
    let response = test::call_service(&app, req).await;
    assert_eq!(response.status(), 201);

    let created: FriendRequestResponse = test::read_body_json(response).await;
    assert_eq!(created.sender_id, ALICE);
    assert_eq!(created.receiver_id, "c");
    assert_eq!(created.status, FriendRequestStatus::Pending);

    let req = test::TestRequest::post()
        .uri("/v1/friend-requests")
        .insert_header(auth_header())
        .set_json(body("c"))
        .to_request();
    let response = test::call_service(&app, req).await;
    assert_eq!(response.status(), 409);

    let stored = store.friend_requests().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].receiver_id, "c");
}

#[actix_web::test]
async fn test_request_to_a_friend_is_a_conflict() {
    let app = test::init_service(get_app(get_configuration(), seeded_store()).await).await;

    let req = test::TestRequest::post()
        .uri("/v1/friend-requests")
        .insert_header(auth_header())
        .set_json(body("a"))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 409);
}

#[actix_web::test]
async fn test_request_to_self_is_rejected() {
    let app = test::init_service(get_app(get_configuration(), seeded_store()).await).await;

    let req = test::TestRequest::post()
        .uri("/v1/friend-requests")
        .insert_header(auth_header())
        .set_json(body(ALICE))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_store_offline_is_an_internal_error() {
    let store = seeded_store();
    store.set_unavailable(true);
    let app = test::init_service(get_app(get_configuration(), store).await).await;

    let req = test::TestRequest::post()
        .uri("/v1/friend-requests")
        .insert_header(auth_header())
        .set_json(body("c"))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 500);
}
