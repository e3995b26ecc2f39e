pub mod check_auth;
pub mod metrics_token;
