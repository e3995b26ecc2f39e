use crate::{domain::error::CommonError, service::friends_service::AddFriendError};

impl From<AddFriendError> for CommonError {
    fn from(err: AddFriendError) -> Self {
        match err {
            AddFriendError::EmptyFriendId | AddFriendError::SelfFriendship => {
                CommonError::BadRequest(err.to_string())
            }
            AddFriendError::Store(err) => {
                log::error!("Add friend > Store error: {err}");
                CommonError::Unknown("".to_owned())
            }
        }
    }
}
