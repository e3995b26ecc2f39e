use actix_web::{get, web::Data, HttpRequest, HttpResponse};

use super::{super::logged_in_user, super::unknown_store_error, types::FriendsResponse};
use crate::{
    components::app::AppComponents, domain::error::CommonError,
    service::friends_service::load_friends,
};

#[get("/v1/friends")]
pub async fn get_friends(
    req: HttpRequest,
    app_data: Data<AppComponents>,
) -> Result<HttpResponse, CommonError> {
    let user_id = logged_in_user(&req)?;

    let friends = load_friends(&app_data.db_repos, user_id.as_str())
        .await
        .map_err(|err| unknown_store_error("Get friends", err))?;

    Ok(HttpResponse::Ok().json(FriendsResponse::new(friends)))
}
