//! Request handlers

use super::WebState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use multillm_application::CompareError;
use multillm_domain::{Prompt, Protocol};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

const INVALID_REQUEST: &str = "Invalid request: 'prompt' field is required.";

#[derive(Debug, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ProtocolInfo {
    pub name: String,
    pub description: &'static str,
    pub default: bool,
}

/// Parse the body leniently so a malformed body gets the same 400 as a missing field
fn parse_prompt(body: &Bytes) -> Result<(Prompt, Option<String>), Response> {
    let request: CompareRequest = serde_json::from_slice(body).unwrap_or_default();
    let prompt = request
        .prompt
        .and_then(|text| Prompt::try_new(text).ok())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST.to_string()))?;
    Ok((prompt, request.protocol))
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn run_failed(e: CompareError) -> Response {
    error!("Web comparison failed: {}", e);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error processing the prompt: {}", e),
    )
}

/// `POST /prompt`: run the default protocol, answer with the last trail line
pub async fn post_prompt(State(state): State<WebState>, body: Bytes) -> Response {
    let (prompt, _) = match parse_prompt(&body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    debug!("POST /prompt with {}", state.default_protocol);

    match state.use_case.run(&prompt, &state.default_protocol).await {
        Ok(run) => Json(PromptResponse {
            response: run.last_line().unwrap_or_default().to_string(),
        })
        .into_response(),
        Err(e) => run_failed(e),
    }
}

/// `POST /compare`: run the requested protocol, answer with the whole run
pub async fn post_compare(State(state): State<WebState>, body: Bytes) -> Response {
    let (prompt, requested) = match parse_prompt(&body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    let protocol = state.selectable(requested.as_deref());
    debug!("POST /compare with {}", protocol);

    match state.use_case.run(&prompt, &protocol).await {
        Ok(run) => Json(run).into_response(),
        Err(e) => run_failed(e),
    }
}

/// `GET /protocols`
pub async fn get_protocols(State(state): State<WebState>) -> impl IntoResponse {
    let protocols: Vec<ProtocolInfo> = state
        .protocols
        .iter()
        .map(|p: &Protocol| ProtocolInfo {
            name: p.to_string(),
            description: p.description(),
            default: *p == state.default_protocol,
        })
        .collect();
    Json(protocols)
}
