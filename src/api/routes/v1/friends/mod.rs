pub mod create;
pub mod errors;
pub mod get;
pub mod types;
