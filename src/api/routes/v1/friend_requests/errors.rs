use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    domain::error::{CommonError, ErrorResponse},
    service::friend_requests_service::SendFriendRequestError,
};

#[derive(Error, Debug, PartialEq)]
pub enum FriendRequestsError {
    #[error("{0}")]
    CommonError(CommonError),
    #[error("A friend request to {0} is already pending")]
    AlreadyPending(String),
    #[error("{0} is already a friend")]
    AlreadyFriends(String),
}

impl FriendRequestsError {
    pub fn name(&self) -> String {
        match self {
            Self::AlreadyPending(_) => "AlreadyPending".to_string(),
            Self::AlreadyFriends(_) => "AlreadyFriends".to_string(),
            Self::CommonError(base) => base.name(),
        }
    }
}

impl ResponseError for FriendRequestsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyPending(_) | Self::AlreadyFriends(_) => StatusCode::CONFLICT,
            Self::CommonError(base) => base.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = ErrorResponse {
            code: status_code.as_u16(),
            message: self.to_string(),
            error: self.name(),
        };
        HttpResponse::build(status_code).json(error_response)
    }
}

impl From<CommonError> for FriendRequestsError {
    fn from(err: CommonError) -> Self {
        Self::CommonError(err)
    }
}

impl From<SendFriendRequestError> for FriendRequestsError {
    fn from(err: SendFriendRequestError) -> Self {
        match err {
            SendFriendRequestError::EmptyReceiver | SendFriendRequestError::SelfRequest => {
                Self::CommonError(CommonError::BadRequest(err.to_string()))
            }
            SendFriendRequestError::AlreadyFriends(receiver_id) => {
                Self::AlreadyFriends(receiver_id)
            }
            SendFriendRequestError::AlreadyPending(receiver_id) => {
                Self::AlreadyPending(receiver_id)
            }
            SendFriendRequestError::Store(err) => {
                log::error!("Send friend request > Store error: {err}");
                Self::CommonError(CommonError::Unknown("".to_owned()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StoreError;

    #[test]
    fn test_duplicates_are_conflicts() {
        let pending: FriendRequestsError =
            SendFriendRequestError::AlreadyPending("0xb".to_string()).into();
        let friends: FriendRequestsError =
            SendFriendRequestError::AlreadyFriends("0xb".to_string()).into();

        assert_eq!(pending.status_code(), StatusCode::CONFLICT);
        assert_eq!(pending.name(), "AlreadyPending");
        assert_eq!(friends.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_receivers_are_bad_requests() {
        let err: FriendRequestsError = SendFriendRequestError::SelfRequest.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: FriendRequestsError = SendFriendRequestError::EmptyReceiver.into();
        assert_eq!(err.name(), "BadRequest");
    }

    #[test]
    fn test_store_failures_are_internal_errors() {
        let err: FriendRequestsError =
            SendFriendRequestError::Store(StoreError::Unavailable("down".to_string())).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
