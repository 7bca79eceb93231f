//! Endpoint configuration.

use serde::{Deserialize, Serialize};

/// Environment variable naming the service base URL.
pub const BACKEND_URL_ENV: &str = "SHADER_BACKEND_URL";

/// Base URL baked in at compile time, falling back to a local development server.
pub const DEFAULT_BACKEND_URL: &str = match option_env!("SHADER_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Path of the generation endpoint below the base URL.
pub const GENERATE_SHADER_PATH: &str = "/generate-shader";

/// Where to send shader generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: GENERATE_SHADER_PATH.to_string(),
        }
    }

    /// Read the base URL from `SHADER_BACKEND_URL`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// The full endpoint URL.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}
