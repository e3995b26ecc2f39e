// Contains files that define objects representing business logic concepts used across the service.
pub mod error;
pub mod friend_edge;
pub mod friend_request;
pub mod friends_list;
pub mod navigation;
pub mod profile;
pub mod suggestions;
pub mod user_id;
