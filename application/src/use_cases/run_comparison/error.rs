//! Errors of the comparison use case

use crate::ports::model_client::GatewayError;
use multillm_domain::DomainError;
use std::time::Duration;
use thiserror::Error;

/// Fatal failures of a comparison run
///
/// Recoverable conditions (an answer that cannot be found in a response,
/// too few answers to compare, an unknown protocol) never surface here;
/// they end the run without a decision and are explained in the trail.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("No models enabled")]
    NoModels,

    #[error("No judge models configured")]
    NoJudges,

    #[error("Couldn't find a comparison model to use for {first} <-> {second}")]
    NoEligibleJudge { first: String, second: String },

    #[error("Model {model} failed: {source}")]
    Transport {
        model: String,
        #[source]
        source: GatewayError,
    },

    #[error("Response from {model} is not valid JSON: {source}")]
    Decode {
        model: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Comparison timed out after {0:?}")]
    Timeout(Duration),
}

impl CompareError {
    /// Name of the model whose call caused the failure, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            CompareError::Transport { model, .. } | CompareError::Decode { model, .. } => {
                Some(model)
            }
            _ => None,
        }
    }
}
