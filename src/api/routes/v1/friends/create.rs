use actix_web::{
    post,
    web::{Data, Json},
    HttpRequest, HttpResponse,
};

use super::{
    super::logged_in_user,
    types::{AddFriendBody, AddFriendResponse},
};
use crate::{
    components::app::AppComponents, domain::error::CommonError,
    service::friends_service::add_friend,
};

/// Stores a friendship between the signed-in user and `friend_id`. Storing an
/// existing pair again, in either direction, is a no-op answering `created: false`.
#[post("/v1/friends")]
pub async fn create_friend(
    req: HttpRequest,
    body: Json<AddFriendBody>,
    app_data: Data<AppComponents>,
) -> Result<HttpResponse, CommonError> {
    let user_id = logged_in_user(&req)?;

    let created = add_friend(&app_data.db_repos, user_id.as_str(), &body.friend_id).await?;

    Ok(HttpResponse::Ok().json(AddFriendResponse { created }))
}
