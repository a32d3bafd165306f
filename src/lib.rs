pub mod api;
pub mod client;
pub mod models;
pub mod service;
pub mod settings;
pub mod store;
