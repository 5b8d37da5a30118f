//! Judge adjudicator: ask a judge model whether two answers agree

use super::RunContext;
use super::error::CompareError;
use super::extract::decode;
use crate::ports::model_client::{ModelSession, SharedModelClient};
use crate::ports::progress::Stage;
use multillm_domain::{ComparisonPair, ComparisonTemplate, verdict};
use tracing::{debug, warn};

/// Send one comparison to `judge` and turn its reply into a verdict
///
/// A reply without judge text (or with only whitespace) is a negative verdict, not an error. Transport
/// and decode failures abort the run.
pub(crate) async fn adjudicate(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    judge: &SharedModelClient,
    pair: &ComparisonPair,
) -> Result<bool, CompareError> {
    let comparison = ComparisonTemplate::make_comparison(pair);
    let query = judge.make_query(&comparison);
    debug!("Judge {} compares {}", judge.name(), pair.title());

    let raw = judge.ask(session, &query).await.map_err(|source| {
        ctx.progress
            .on_call_complete(&Stage::Adjudicate, judge.name(), false);
        CompareError::Transport {
            model: judge.name().to_string(),
            source,
        }
    })?;
    ctx.progress
        .on_call_complete(&Stage::Adjudicate, judge.name(), true);

    let body = decode(judge.name(), &raw)?;
    match judge
        .text_field()
        .find_text(&body)
        .filter(|text| !text.trim().is_empty())
    {
        Some(text) => {
            ctx.detail(format!("comparison using {} result:\n{}", judge.name(), text));
            Ok(verdict(Some(text)))
        }
        None => {
            warn!("Judge {} returned no text for {}", judge.name(), pair.title());
            ctx.detail(format!("comparison using {} failed!", judge.name()));
            Ok(false)
        }
    }
}

/// Adjudicate a single pair as its own progress stage
pub(crate) async fn adjudicate_one(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    judge: &SharedModelClient,
    pair: &ComparisonPair,
) -> Result<bool, CompareError> {
    ctx.progress.on_stage_start(&Stage::Adjudicate, 1);
    let agreed = adjudicate(ctx, session, judge, pair).await?;
    ctx.progress.on_stage_complete(&Stage::Adjudicate);
    Ok(agreed)
}
