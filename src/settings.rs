//! Boot configuration, read once from the environment.

use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Listen address, `TODO_BIND`.
    pub bind_addr: String,
    /// redb file path, `TODO_DB`.
    pub db_path: String,
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings {
            bind_addr: env::var("TODO_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_path: env::var("TODO_DB").unwrap_or_else(|_| "tasks.redb".to_string()),
        }
    }
}
