use std::env;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Where the agents find flight-service.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub server_url: String,
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AgentConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server_url: env::var("MCP_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            request_timeout: Duration::from_secs(
                env::var("MCP_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}
