// Config module
// Backend connection settings read from config.toml

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root URL of the roadtrip REST backend, without trailing slash
    pub api_base_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Roadtrip shown on the planning grid
    pub roadtrip_id: String,
    /// Per-request timeout; the client default applies when absent
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            roadtrip_id: String::new(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base_url.starts_with("http://")
            || self.api_base_url.starts_with("https://"))
        {
            return Err(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be positive".to_string());
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
