use friends_service::{
    api::app::{get_app_data, run_service},
    components::{app::ComponentsError, tracing::init_telemetry},
};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Components(#[from] ComponentsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    init_telemetry();

    let app_data = get_app_data(None, None).await?;

    run_service(app_data)?.await?;

    Ok(())
}
