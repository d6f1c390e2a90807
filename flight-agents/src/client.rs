//! HTTP plumbing shared by the agents.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::models::HealthStatus;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::Duration;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Percent-encode one path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON client for flight-service. Requests carry W3C trace context.
#[derive(Clone)]
pub struct McpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl McpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout: AgentConfig::default().request_timeout,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.server_url.clone()).with_timeout(config.request_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AgentError> {
        let request = self.client.traced_get(&self.url(path));
        self.execute("GET", path, request).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AgentError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.traced_get(&self.url(path)).query(query);
        self.execute("GET", path, request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.client.traced_post(&self.url(path)).json(body);
        self.execute("POST", path, request).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.client.traced_put(&self.url(path)).json(body);
        self.execute("PUT", path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AgentError> {
        let request = self.client.traced_delete(&self.url(path));
        self.execute("DELETE", path, request).await
    }

    /// Probe `GET /health` with a short timeout.
    pub async fn health(&self) -> Result<HealthStatus, AgentError> {
        let request = self
            .client
            .traced_get(&self.url("/health"))
            .timeout(HEALTH_TIMEOUT);
        let response = request.send().await.map_err(AgentError::Transport)?;
        decode(response).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: TracedRequest,
    ) -> Result<T, AgentError> {
        tracing::debug!(method, path, "Calling flight-service");

        let response = request.timeout(self.timeout).send().await.map_err(|e| {
            tracing::error!("Failed to send {} request to {}: {}", method, path, e);
            AgentError::Transport(e)
        })?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AgentError> {
    let status = response.status();
    let body = response.bytes().await.map_err(AgentError::Transport)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
        tracing::debug!(status = status.as_u16(), %message, "flight-service error");
        return Err(AgentError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| AgentError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_encodes_reserved_characters() {
        assert_eq!(segment("PEK"), "PEK");
        assert_eq!(segment("Zhang San"), "Zhang%20San");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(segment("张三"), "%E5%BC%A0%E4%B8%89");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = McpClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/stats"), "http://localhost:8000/stats");
    }
}
