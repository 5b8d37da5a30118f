//! Fixed-position comparison strategies
//!
//! Each strategy works on the non-blank answers in schedule order and labels
//! them Alice, Bob and Eve. The judge for step `n` is the `n`-th configured
//! judge, wrapping around a short judge list.
//!
//! The caller checks [`Protocol::min_candidates`] before any strategy runs;
//! a strategy that still finds too few answers decides nothing.
//!
//! [`Protocol::min_candidates`]: multillm_domain::Protocol::min_candidates

use super::RunContext;
use super::adjudicate::{adjudicate, adjudicate_one};
use super::dispatch::dispatch;
use super::error::CompareError;
use super::extract::extract_one;
use crate::ports::model_client::{ModelSession, SharedModelClient};
use crate::ports::progress::Stage;
use futures::future::try_join_all;
use multillm_domain::{Candidate, CandidateSet, ComparisonPair, ComparisonTemplate, Label};
use tracing::{info, warn};

pub(crate) const NOT_ENOUGH_RESPONSES: &str = "Not enough responses to compare!";
pub(crate) const CONSENSUS: &str = "**consensus**";

/// Judge for a fixed step; warns when it is also one of the compared models
fn fixed_judge<'a>(
    ctx: &RunContext<'a>,
    position: usize,
    a: &Candidate,
    b: &Candidate,
) -> Result<&'a SharedModelClient, CompareError> {
    let judge = ctx.config.judge_at(position).ok_or(CompareError::NoJudges)?;
    if judge.name() == a.model || judge.name() == b.model {
        warn!(
            "Judge {} is comparing its own answer ({} vs {})",
            judge.name(),
            a.model,
            b.model
        );
    }
    Ok(judge)
}

fn make_pair(
    ctx: &RunContext<'_>,
    (label_a, a): (Label, &Candidate),
    (label_b, b): (Label, &Candidate),
) -> ComparisonPair {
    ComparisonPair::new(ctx.prompt, label_a, &a.text, label_b, &b.text)
}

/// One sequential comparison step; returns the verdict and the judge's name
async fn step<'a>(
    ctx: &RunContext<'a>,
    session: &dyn ModelSession,
    position: usize,
    heading: &str,
    a: (Label, &Candidate),
    b: (Label, &Candidate),
) -> Result<(bool, &'a str), CompareError> {
    let judge = fixed_judge(ctx, position, a.1, b.1)?;
    let pair = make_pair(ctx, a, b);
    ctx.detail(ComparisonTemplate::make_comparison(&pair));
    ctx.detail(format!("{} using {}", heading, judge.name()));
    let agreed = adjudicate_one(ctx, session, judge, &pair).await?;
    Ok((agreed, judge.name()))
}

/// `1-way`: Alice vs Bob
pub(crate) async fn one_way(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &CandidateSet,
) -> Result<Option<String>, CompareError> {
    let texts = candidates.non_blank();
    let [alice, bob, ..] = texts[..] else {
        return Ok(None);
    };

    let (agreed, judge) = step(
        ctx,
        session,
        0,
        "Compare",
        (Label::alice(), alice),
        (Label::bob(), bob),
    )
    .await?;
    if agreed {
        ctx.detail(format!("comparison {} succeeds, can use {}", judge, alice.model));
        return Ok(Some(alice.text.clone()));
    }
    Ok(None)
}

/// `2-way` (Alice vs Bob, then Alice vs Eve) and `3-way` (then Bob vs Eve)
pub(crate) async fn two_or_three_way(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &CandidateSet,
    two_way_only: bool,
) -> Result<Option<String>, CompareError> {
    let texts = candidates.non_blank();
    let [alice, bob, eve, ..] = texts[..] else {
        return Ok(None);
    };

    let (agreed, judge) = step(
        ctx,
        session,
        0,
        "Compare",
        (Label::alice(), alice),
        (Label::bob(), bob),
    )
    .await?;
    if agreed {
        ctx.detail(format!("comparison {} succeeds, can use {}", judge, alice.model));
        return Ok(Some(alice.text.clone()));
    }

    let (agreed, judge) = step(
        ctx,
        session,
        1,
        "Compare",
        (Label::alice(), alice),
        (Label::eve(), eve),
    )
    .await?;
    if agreed {
        ctx.detail(format!("comparison {} succeeds, can use {}", judge, alice.model));
        return Ok(Some(alice.text.clone()));
    }

    if two_way_only {
        return Ok(None);
    }

    let (agreed, judge) = step(
        ctx,
        session,
        2,
        "Compare",
        (Label::bob(), bob),
        (Label::eve(), eve),
    )
    .await?;
    if agreed {
        ctx.detail(format!("comparison {} succeeds, can use {}", judge, bob.model));
        return Ok(Some(bob.text.clone()));
    }
    Ok(None)
}

/// `2-1`: Alice vs Bob, and only on disagreement ask a third model
///
/// The follow-up answer is appended to `candidates` so the run reports it.
pub(crate) async fn two_then_third(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &mut CandidateSet,
) -> Result<Option<String>, CompareError> {
    let texts = candidates.non_blank();
    let [alice, bob, ..] = texts[..] else {
        return Ok(None);
    };
    let (alice, bob) = (alice.clone(), bob.clone());

    let (agreed, _) = step(
        ctx,
        session,
        0,
        "Compare first two responses",
        (Label::alice(), &alice),
        (Label::bob(), &bob),
    )
    .await?;
    if agreed {
        ctx.record(format!("first two models agree, can use {}", alice.model));
        return Ok(Some(alice.text));
    }

    let Some(eve) = query_third(ctx, session, candidates).await? else {
        ctx.record("3rd model failed to answer!");
        return Ok(None);
    };

    let (agreed, _) = step(
        ctx,
        session,
        1,
        "Compare first and third",
        (Label::alice(), &alice),
        (Label::eve(), &eve),
    )
    .await?;
    if agreed {
        ctx.record(format!("first and third agree, can use {}", alice.model));
        return Ok(Some(alice.text));
    }

    let (agreed, _) = step(
        ctx,
        session,
        2,
        "Compare second and third",
        (Label::bob(), &bob),
        (Label::eve(), &eve),
    )
    .await?;
    if agreed {
        ctx.record(format!("second and third agree, can use {}", bob.model));
        return Ok(Some(bob.text));
    }

    ctx.record("none agree");
    Ok(None)
}

/// Query the first enabled model not asked yet; `None` when there is no such
/// model or its answer is blank
async fn query_third(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &mut CandidateSet,
) -> Result<Option<Candidate>, CompareError> {
    let Some(model) = ctx.config.models.get(candidates.len()) else {
        return Ok(None);
    };

    ctx.record(format!("Query next model {}", model.name()));
    let raw = dispatch(ctx, session, std::slice::from_ref(model), Stage::FollowUp)
        .await?
        .pop()
        .unwrap_or_default();
    let candidate = extract_one(ctx, model, &raw)?;
    candidates.push(candidate.clone());

    Ok((!candidate.is_blank()).then_some(candidate))
}

/// `3-all`: all three pairs at once
pub(crate) async fn three_all(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &CandidateSet,
) -> Result<Option<String>, CompareError> {
    let texts = candidates.non_blank();
    let [alice, bob, eve, ..] = texts[..] else {
        return Ok(None);
    };

    let steps = [
        (0, (Label::alice(), alice), (Label::bob(), bob)),
        (1, (Label::alice(), alice), (Label::eve(), eve)),
        (2, (Label::bob(), bob), (Label::eve(), eve)),
    ];

    let mut pairs = Vec::with_capacity(steps.len());
    for (position, a, b) in steps {
        let judge = fixed_judge(ctx, position, a.1, b.1)?;
        let pair = make_pair(ctx, a, b);
        ctx.detail(pair.title());
        ctx.detail(ComparisonTemplate::make_comparison(&pair));
        pairs.push((judge, pair));
    }

    ctx.progress.on_stage_start(&Stage::Adjudicate, pairs.len());
    let verdicts = try_join_all(
        pairs
            .iter()
            .map(|(judge, pair)| adjudicate(ctx, session, judge, pair)),
    )
    .await?;
    ctx.progress.on_stage_complete(&Stage::Adjudicate);

    for ((_, pair), agreed) in pairs.iter().zip(&verdicts) {
        let outcome = if *agreed { "agree" } else { "disagree" };
        ctx.detail(format!("{} {}", pair.title(), outcome));
    }

    if verdicts.iter().all(|agreed| *agreed) {
        info!("All three answers agree");
        ctx.record(CONSENSUS);
    }

    let winner = match verdicts.as_slice() {
        [true, _, _] | [_, true, _] => Some(alice.text.clone()),
        [_, _, true] => Some(bob.text.clone()),
        _ => None,
    };
    Ok(winner)
}
