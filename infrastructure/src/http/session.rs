//! reqwest-backed sessions

use async_trait::async_trait;
use multillm_application::{Endpoint, GatewayError, ModelSession, SessionFactory};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("multillm/", env!("CARGO_PKG_VERSION"));

/// Builds a fresh connection pool for every batch of calls
#[derive(Debug, Clone, Default)]
pub struct ReqwestSessionFactory {
    request_timeout: Option<Duration>,
}

impl ReqwestSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every single request, independent of the whole-run timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl SessionFactory for ReqwestSessionFactory {
    fn open(&self) -> Result<Box<dyn ModelSession>, GatewayError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Box::new(ReqwestSession { client }))
    }
}

/// One pooled HTTP client; dropping it closes idle connections
pub struct ReqwestSession {
    client: reqwest::Client,
}

#[async_trait]
impl ModelSession for ReqwestSession {
    async fn post_json(&self, endpoint: &Endpoint, body: &Value) -> Result<String, GatewayError> {
        let mut request = self.client.post(&endpoint.url).json(body);
        for (name, value) in &endpoint.headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(send_error)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to read response body: {}", e)))?;
        debug!("HTTP {} ({} bytes)", status.as_u16(), text.len());

        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

fn send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}
