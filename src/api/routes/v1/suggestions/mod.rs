pub mod get;
pub mod types;
