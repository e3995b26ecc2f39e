use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceFactory, web::Data, App};
use friends_service::{
    api::app::get_app_router,
    components::{
        app::{AppComponents, CustomComponents},
        configuration::Config,
    },
    domain::{friend_edge::FriendEdge, profile::Profile},
    entities::memory::{InMemoryStore, SeedData},
};

pub const ALICE_TOKEN: &str = "alice-token";
pub const ALICE: &str = "alice";

pub fn get_configuration() -> Config {
    let mut config = Config::from_defaults().expect("Couldn't read the configuration");
    config
        .identity
        .static_tokens
        .insert(ALICE_TOKEN.to_string(), ALICE.to_string());
    config
}

pub fn profile(id: &str, name: &str, preferences: &[&str]) -> Profile {
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        preferences: preferences.iter().map(|p| p.to_string()).collect(),
        college_year: "2nd year".to_string(),
    }
}

/// Alice likes hiking and chess and is already friends with `a`.
pub fn seeded_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::from_seed(SeedData {
        profiles: vec![
            profile(ALICE, "Alice", &["hiking", "chess"]),
            profile("a", "Ana", &["chess"]),
            profile("b", "Bruno", &["painting"]),
            profile("c", "carla", &["hiking", "chess"]),
        ],
        friends: vec![FriendEdge::new(ALICE, "a")],
        friend_requests: vec![],
    }))
}

pub async fn get_app(
    config: Config,
    store: Arc<InMemoryStore>,
) -> App<
    impl ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let components = CustomComponents {
        store: Some(store),
        ..Default::default()
    };
    let app_components = AppComponents::new(Some(config), Some(components))
        .await
        .expect("Couldn't build the app components");
    let app_data = Data::new(app_components);
    let http_metrics_collector =
        Data::new(dcl_http_prom_metrics::HttpMetricsCollectorBuilder::default().build());
    get_app_router(&app_data, &http_metrics_collector)
}

pub fn auth_header() -> (&'static str, String) {
    ("authorization", format!("Bearer {ALICE_TOKEN}"))
}
