//! Response extractor: locate the answer text inside raw response bodies

use super::RunContext;
use super::error::CompareError;
use crate::ports::model_client::SharedModelClient;
use multillm_domain::{Candidate, CandidateSet, TextField};
use serde_json::Value;
use tracing::debug;

pub(crate) const NO_TEXT_FOUND: &str = "No response text found!";

/// Decode a raw body as JSON
pub(crate) fn decode(model: &str, raw: &str) -> Result<Value, CompareError> {
    serde_json::from_str(raw).map_err(|source| CompareError::Decode {
        model: model.to_string(),
        source,
    })
}

/// Apply a selector to a raw body; `Ok(None)` when no usable text is there
pub(crate) fn extract_text(
    model: &str,
    field: &TextField,
    raw: &str,
) -> Result<Option<String>, CompareError> {
    let body = decode(model, raw)?;
    Ok(field
        .find_text(&body)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string))
}

/// Turn raw bodies into candidates, one per model and in the same order
pub(crate) fn extract_candidates(
    ctx: &RunContext<'_>,
    models: &[SharedModelClient],
    responses: &[String],
) -> Result<CandidateSet, CompareError> {
    models
        .iter()
        .zip(responses)
        .map(|(model, raw)| extract_one(ctx, model, raw))
        .collect()
}

pub(crate) fn extract_one(
    ctx: &RunContext<'_>,
    model: &SharedModelClient,
    raw: &str,
) -> Result<Candidate, CompareError> {
    ctx.detail(format!("model {}", model.name()));
    match extract_text(model.name(), model.text_field(), raw)? {
        Some(text) => {
            ctx.detail(text.clone());
            Ok(Candidate::new(model.name(), text))
        }
        None => {
            debug!("No text under {} in response from {}", model.text_field(), model.name());
            ctx.detail(NO_TEXT_FOUND);
            Ok(Candidate::missing(model.name()))
        }
    }
}
