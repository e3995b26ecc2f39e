use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory};
use actix_web::middleware;
use actix_web::{web::Data, App, HttpServer};
use dcl_http_prom_metrics::HttpMetricsCollector;
use tracing_actix_web::TracingLogger;

use crate::components::app::{AppComponents, ComponentsError, CustomComponents};
use crate::components::configuration::Config;
use crate::components::tracing::init_telemetry;

use super::middlewares::check_auth::CheckAuthToken;
use super::middlewares::metrics_token::CheckMetricsToken;
use super::routes::health::handlers::{health, live, startup};
use super::routes::v1::friend_requests::create::create_friend_request;
use super::routes::v1::friends::create::create_friend;
use super::routes::v1::friends::get::get_friends;
use super::routes::v1::suggestions::get::get_suggestions;

pub fn run_service(data: Data<AppComponents>) -> Result<Server, std::io::Error> {
    init_telemetry();

    log::debug!("App Config: {:?}", data.config);

    let server_host = data.config.server.host.clone();
    let server_port = data.config.server.port;

    let http_metrics_collector =
        Data::new(dcl_http_prom_metrics::HttpMetricsCollectorBuilder::default().build());

    let server = HttpServer::new(move || get_app_router(&data, &http_metrics_collector))
        .bind((server_host, server_port))?
        .run();

    log::info!("Friends service listening on port {server_port}");

    Ok(server)
}

pub async fn get_app_data(
    custom_config: Option<Config>,
    custom_components: Option<CustomComponents>,
) -> Result<Data<AppComponents>, ComponentsError> {
    let app_data = AppComponents::new(custom_config, custom_components).await?;
    Ok(Data::new(app_data))
}

const ROUTES_NEED_AUTH_TOKEN: [&str; 3] =
    ["/v1/suggestions", "/v1/friends", "/v1/friend-requests"];

pub fn get_app_router(
    data: &Data<AppComponents>,
    http_metrics_collector: &Data<HttpMetricsCollector>,
) -> App<
    impl ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let protected_routes = ROUTES_NEED_AUTH_TOKEN
        .iter()
        .map(|s| String::from(*s))
        .collect::<Vec<String>>();

    App::new()
        .app_data(data.clone())
        .app_data(http_metrics_collector.clone())
        .wrap(CheckAuthToken::new(protected_routes))
        .wrap(dcl_http_prom_metrics::metrics())
        .wrap(CheckMetricsToken::new(
            data.config.wkc_metrics_bearer_token.clone(),
        ))
        .wrap(middleware::NormalizePath::trim())
        .wrap(TracingLogger::default())
        .service(live)
        .service(health)
        .service(startup)
        .service(get_suggestions)
        .service(create_friend_request)
        .service(get_friends)
        .service(create_friend)
}
