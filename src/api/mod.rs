pub mod app;
pub mod error;
pub mod middlewares;
pub mod routes;
