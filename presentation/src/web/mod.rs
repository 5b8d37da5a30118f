//! Web front end
//!
//! A thin HTTP layer over [`RunComparisonUseCase`]:
//!
//! - `POST /prompt` runs the default protocol and returns the last trail line
//! - `POST /compare` runs a chosen protocol and returns the whole run
//! - `GET /protocols` lists what `/compare` accepts

mod handlers;

use axum::Router;
use axum::routing::{get, post};
use multillm_application::RunComparisonUseCase;
use multillm_domain::Protocol;
use std::sync::Arc;
use tracing::info;

/// Shared state for every request
#[derive(Clone)]
pub struct WebState {
    use_case: Arc<RunComparisonUseCase>,
    default_protocol: Protocol,
    protocols: Vec<Protocol>,
}

impl WebState {
    pub fn new(use_case: Arc<RunComparisonUseCase>, default_protocol: Protocol) -> Self {
        Self {
            use_case,
            protocols: vec![default_protocol.clone()],
            default_protocol,
        }
    }

    /// Protocols a `/compare` caller may pick; anything else runs as `none`
    pub fn with_protocols(mut self, protocols: Vec<Protocol>) -> Self {
        self.protocols = protocols;
        self
    }

    fn selectable(&self, requested: Option<&str>) -> Protocol {
        match requested {
            None => self.default_protocol.clone(),
            Some(name) => {
                let protocol = Protocol::from(name);
                if self.protocols.contains(&protocol) {
                    protocol
                } else {
                    Protocol::None
                }
            }
        }
    }
}

/// Configure all routes
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/prompt", post(handlers::post_prompt))
        .route("/compare", post(handlers::post_compare))
        .route("/protocols", get(handlers::get_protocols))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(bind: &str, state: WebState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Web front end listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
