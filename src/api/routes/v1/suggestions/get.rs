use actix_web::{get, web::Data, HttpRequest, HttpResponse};

use super::{super::logged_in_user, super::unknown_store_error, types::SuggestionsResponse};
use crate::{
    components::app::AppComponents, domain::error::CommonError,
    service::suggestions_service::load_suggestions,
};

#[get("/v1/suggestions")]
pub async fn get_suggestions(
    req: HttpRequest,
    app_data: Data<AppComponents>,
) -> Result<HttpResponse, CommonError> {
    let user_id = logged_in_user(&req)?;

    let snapshot = load_suggestions(&app_data.db_repos, user_id.as_str())
        .await
        .map_err(|err| unknown_store_error("Get suggestions", err))?;

    Ok(HttpResponse::Ok().json(SuggestionsResponse::new(snapshot)))
}
