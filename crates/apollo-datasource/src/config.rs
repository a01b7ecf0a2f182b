//! Backend endpoint configuration.

use std::time::Duration;

/// Default JSON store endpoint.
pub const DEFAULT_JSON_DB_URL: &str = "http://localhost:3000";

/// Default SPARQL endpoint.
pub const DEFAULT_SPARQL_URL: &str = "http://localhost:8890/sparql";

/// Default request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration for the backend clients.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the JSON store.
    pub json_db_url: String,
    /// URL of the SPARQL query endpoint.
    pub sparql_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            json_db_url: DEFAULT_JSON_DB_URL.to_string(),
            sparql_url: DEFAULT_SPARQL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Create from environment variables, falling back to defaults.
    ///
    /// Reads `JSON_DB_URL`, `SPARQL_URL`, and `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let json_db_url =
            std::env::var("JSON_DB_URL").unwrap_or_else(|_| DEFAULT_JSON_DB_URL.to_string());
        let sparql_url =
            std::env::var("SPARQL_URL").unwrap_or_else(|_| DEFAULT_SPARQL_URL.to_string());
        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            json_db_url,
            sparql_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
