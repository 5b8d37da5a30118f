//! Model client port
//!
//! Defines how the comparison engine talks to answer-generating services.
//! A [`ModelClient`] knows how to phrase a request for its service and where
//! the answer lives in the reply; the network itself is reached through a
//! [`ModelSession`] that the caller opens per batch from a [`SessionFactory`].

use async_trait::async_trait;
use multillm_domain::TextField;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while talking to a model service
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Where and how to POST a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A scoped network session (connection pool) shared by one batch of calls
///
/// Dropping the session releases its resources, so a batch that fails part
/// way through still cleans up.
#[async_trait]
pub trait ModelSession: Send + Sync {
    /// POST a JSON body and return the raw response body
    async fn post_json(&self, endpoint: &Endpoint, body: &Value) -> Result<String, GatewayError>;
}

/// Opens a [`ModelSession`] at the start of each batch
pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn ModelSession>, GatewayError>;
}

/// One configured answer-generating or judging service
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Unique name of this model in the registry
    fn name(&self) -> &str;

    /// Where the answer text lives in a decoded response body
    fn text_field(&self) -> &TextField;

    /// Build the request body for a prompt
    fn make_query(&self, prompt: &str) -> Value;

    /// Send a request built by [`make_query`](Self::make_query) and return the raw body
    async fn ask(&self, session: &dyn ModelSession, query: &Value) -> Result<String, GatewayError>;
}

/// Shared handle to a model client
pub type SharedModelClient = Arc<dyn ModelClient>;
