// src/core/mod.rs
//! Core infrastructure: configuration, the local store and the HTTP client

pub mod config_manager;
pub mod database;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use service_client::{HttpStatusError, ServiceClient};
