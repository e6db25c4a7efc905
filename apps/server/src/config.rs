// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

/// Rule sets bundled with the crate.
pub const DEFAULT_RULES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/rules.json");

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// JSON file holding the building rule sets of every jurisdiction.
    pub rules_path: String,
    /// Maximum request body size in MB.
    pub max_body_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Emit logs as JSON lines instead of pretty text.
    pub log_json: bool,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            rules_path: std::env::var("RULES_PATH").unwrap_or_else(|_| DEFAULT_RULES_PATH.into()),
            max_body_size_mb: std::env::var("MAX_BODY_SIZE_MB")
                .unwrap_or_else(|_| "16".into())
                .parse()
                .unwrap_or(16),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .unwrap_or(60),
            log_json: std::env::var("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| {
                    // Default: allow common development origins
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
