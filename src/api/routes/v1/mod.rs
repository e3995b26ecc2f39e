pub mod friend_requests;
pub mod friends;
pub mod suggestions;

use actix_web::{HttpMessage, HttpRequest};

use crate::{
    domain::{error::CommonError, user_id::UserId},
    entities::StoreError,
};

/// The user resolved by the auth middleware for this request.
pub(crate) fn logged_in_user(req: &HttpRequest) -> Result<UserId, CommonError> {
    req.extensions()
        .get::<UserId>()
        .cloned()
        .ok_or_else(|| CommonError::Unauthorized("Missing signed-in user".to_owned()))
}

pub(crate) fn unknown_store_error(context: &str, err: StoreError) -> CommonError {
    log::error!("{context} > Store error: {err}");
    CommonError::Unknown("".to_owned())
}
