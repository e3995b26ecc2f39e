// Fetch orchestration shared by the HTTP routes and the panels.
pub mod friend_requests_service;
pub mod friends_service;
pub mod suggestions_service;
