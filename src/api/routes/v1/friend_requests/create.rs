use actix_web::{
    post,
    web::{Data, Json},
    HttpRequest, HttpResponse,
};

use super::{
    super::logged_in_user,
    errors::FriendRequestsError,
    types::{CreateFriendRequestBody, FriendRequestResponse},
};
use crate::{
    components::app::AppComponents, service::friend_requests_service::send_friend_request,
};

#[post("/v1/friend-requests")]
pub async fn create_friend_request(
    req: HttpRequest,
    body: Json<CreateFriendRequestBody>,
    app_data: Data<AppComponents>,
) -> Result<HttpResponse, FriendRequestsError> {
    let user_id = logged_in_user(&req)?;

    let request =
        send_friend_request(&app_data.db_repos, user_id.as_str(), &body.receiver_id).await?;

    Ok(HttpResponse::Created().json(FriendRequestResponse::from(request)))
}
