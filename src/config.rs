//! Client configuration: the gateway base URL and the local home directory
//! where the session credential is persisted. Values come from the
//! environment with local-development defaults; CLI flags may override both.

use std::path::{Path, PathBuf};

pub const API_BASE_ENV: &str = "SHOPFRONT_API_BASE";
pub const HOME_ENV: &str = "SHOPFRONT_HOME";

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_HOME: &str = ".shopfront";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API gateway, e.g. `http://localhost:8080`.
    pub api_base: String,
    /// Directory holding client-side state (currently just the session file).
    pub home: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let home = std::env::var(HOME_ENV).unwrap_or_else(|_| DEFAULT_HOME.to_string());
        Self { api_base, home: PathBuf::from(home) }
    }

    pub fn with_overrides(mut self, api_base: Option<String>, home: Option<String>) -> Self {
        if let Some(b) = api_base { self.api_base = b; }
        if let Some(h) = home { self.home = PathBuf::from(h); }
        self
    }

    /// Path of the single key-value entry persisting the credential.
    pub fn session_file(&self) -> PathBuf {
        Path::new(&self.home).join("session")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_string(), home: PathBuf::from(DEFAULT_HOME) }
    }
}
