mod common;
pub use common::*;

use std::collections::HashMap;

use actix_web::test;
use friends_service::{
    components::{
        configuration::Identity,
        identity::{IdentityComponent, IdentityProvider, WhoAmIResponse, WHO_AM_I_URI},
    },
    domain::{error::CommonError, user_id::UserId},
};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn identity(url: String) -> IdentityComponent {
    IdentityComponent::new(&Identity {
        url,
        static_tokens: HashMap::new(),
    })
}

async fn create_identity_mock_server(token: &str, user_id: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WHO_AM_I_URI))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(WhoAmIResponse {
            user_id: user_id.to_string(),
        }))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(WHO_AM_I_URI))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    server
}

#[actix_web::test]
async fn should_resolve_token_through_the_provider() {
    let server = create_identity_mock_server("a-token", "alice").await;
    let identity = identity(server.uri());

    let user_id = identity.who_am_i("a-token").await.unwrap();

    assert_eq!(user_id, UserId::from("alice"));
}

#[actix_web::test]
async fn should_reject_tokens_the_provider_refuses() {
    let server = create_identity_mock_server("a-token", "alice").await;
    let identity = identity(server.uri());

    let err = identity.who_am_i("other-token").await.unwrap_err();

    assert_eq!(err, CommonError::Unauthorized("".to_owned()));
}

#[actix_web::test]
async fn should_fail_when_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WHO_AM_I_URI))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let identity = identity(server.uri());

    let err = identity.who_am_i("a-token").await.unwrap_err();

    assert_eq!(err, CommonError::Unknown("".to_owned()));
}

#[actix_web::test]
async fn should_authenticate_requests_through_the_provider() {
    let server = create_identity_mock_server("remote-token", ALICE).await;
    let mut config = get_configuration();
    config.identity.url = server.uri();

    let app = test::init_service(get_app(config, seeded_store()).await).await;

    let req = test::TestRequest::get()
        .uri("/v1/friends")
        .insert_header(("authorization", "Bearer remote-token"))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert!(response.status().is_success());
}
