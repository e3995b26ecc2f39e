pub mod app;
pub mod configuration;
pub mod database;
pub mod health;
pub mod identity;
pub mod tracing;
