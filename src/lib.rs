pub mod api;
pub mod components;
pub mod domain;
pub mod entities;
pub mod panels;
pub mod service;
