pub mod create;
pub mod errors;
pub mod types;
