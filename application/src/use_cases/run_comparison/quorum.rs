//! `n-way`: judge every pair of answers and look for a quorum
//!
//! Every unordered pair of models that produced an answer is judged by the
//! first configured judge that is neither of the two. Blank answers take no
//! part. Agreements become edges of an
//! [`AgreementGraph`]; the best-connected model leads the quorum and its
//! answer wins on consensus or a strict majority.

use super::RunContext;
use super::adjudicate::adjudicate;
use super::error::CompareError;
use super::strategies::CONSENSUS;
use crate::ports::model_client::{ModelSession, SharedModelClient};
use crate::ports::progress::Stage;
use futures::future::try_join_all;
use multillm_domain::{
    AgreementGraph, CandidateSet, ComparisonPair, ComparisonTemplate, Label, QuorumOutcome,
    QuorumResolution, all_pairs,
};
use tracing::info;

pub(crate) async fn n_way(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    candidates: &CandidateSet,
) -> Result<Option<String>, CompareError> {
    let answered = candidates.non_blank();
    if answered.len() < 2 {
        return Ok(None);
    }

    let names: Vec<String> = answered.iter().map(|c| c.model.clone()).collect();
    let pairs = all_pairs(names.len());

    let mut comparisons: Vec<(&SharedModelClient, ComparisonPair)> = Vec::with_capacity(pairs.len());
    for &(i, j) in &pairs {
        let (first, second) = (&names[i], &names[j]);
        ctx.detail(format!("{} <-> {}", first, second));

        let judge = ctx.config.judge_excluding(first, second).ok_or_else(|| {
            CompareError::NoEligibleJudge {
                first: first.clone(),
                second: second.clone(),
            }
        })?;

        let pair = ComparisonPair::new(
            ctx.prompt,
            Label::john(first),
            &answered[i].text,
            Label::jane(second),
            &answered[j].text,
        );
        ctx.detail(ComparisonTemplate::make_comparison(&pair));
        ctx.detail(format!("comparison model selected: {}", judge.name()));
        comparisons.push((judge, pair));
    }

    info!("Judging {} pair(s) of {} answers", comparisons.len(), names.len());
    ctx.progress
        .on_stage_start(&Stage::Adjudicate, comparisons.len());
    let verdicts = try_join_all(
        comparisons
            .iter()
            .map(|(judge, pair)| adjudicate(ctx, session, judge, pair)),
    )
    .await?;
    ctx.progress.on_stage_complete(&Stage::Adjudicate);

    let mut graph = AgreementGraph::new(names.clone());
    for (&(i, j), agreed) in pairs.iter().zip(&verdicts) {
        ctx.detail(format!(
            "comparison {} <--> {} result {}",
            names[i], names[j], agreed
        ));
        if *agreed {
            graph.add_agreement(i, j);
        }
    }

    let resolution = QuorumResolution::resolve(&graph);
    let Some(leader) = resolution.leader else {
        ctx.detail("No quorum found. All disagree.");
        return Ok(None);
    };

    ctx.detail(format!(
        "quorum {} of {}",
        names[leader], resolution.quorum_size
    ));
    ctx.detail(names[leader].clone());
    for &member in &resolution.members {
        ctx.detail(names[member].clone());
    }

    match resolution.outcome {
        QuorumOutcome::Consensus => ctx.detail(CONSENSUS),
        QuorumOutcome::Majority => ctx.detail("**quorum majority achieved**"),
        QuorumOutcome::TwoAgree => ctx.detail("two agree"),
        QuorumOutcome::Minority | QuorumOutcome::NoAgreement => {}
    }
    info!("Quorum outcome: {}", resolution.outcome);

    Ok(resolution
        .winner()
        .and_then(|winner| answered.get(winner))
        .map(|candidate| candidate.text.clone()))
}
