//! Run Comparison use case
//!
//! Asks several models the same prompt, then uses judge models to decide
//! whether some of the answers agree. A run goes through three steps:
//!
//! 1. **Dispatch**: the prompt goes to the first enabled models (how many
//!    depends on the protocol), all at once
//! 2. **Extract**: each response body is decoded and the answer text is
//!    pulled out with the model's selector
//! 3. **Strategy**: the protocol decides which pairs of answers are judged
//!    and which answer, if any, wins
//!
//! Everything the run does is written to an [`AuditTrail`] that the caller
//! gets back together with the winning answer.

mod adjudicate;
mod dispatch;
pub mod error;
mod extract;
mod quorum;
mod strategies;

pub use error::CompareError;

use crate::config::CompareConfig;
use crate::ports::model_client::{ModelSession, SessionFactory};
use crate::ports::progress::{NoProgress, ProgressNotifier, Stage};
use chrono::{DateTime, Utc};
use multillm_domain::{AuditTrail, CandidateSet, Prompt, Protocol};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub protocol: Protocol,
    pub prompt: String,
    /// Answers in schedule order, including any follow-up answer
    pub candidates: CandidateSet,
    /// Every line the run logged, in order
    pub trail: Vec<String>,
    /// The agreed-upon answer; `None` when no decision was reached
    pub winner: Option<String>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl ComparisonRun {
    pub fn passed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Last trail line, which is the winning answer on a successful run
    pub fn last_line(&self) -> Option<&str> {
        self.trail.last().map(String::as_str)
    }
}

/// Per-run state shared by the dispatcher, the extractor and the strategies
pub(crate) struct RunContext<'a> {
    pub(crate) prompt: &'a str,
    pub(crate) config: &'a CompareConfig,
    pub(crate) progress: &'a dyn ProgressNotifier,
    sessions: &'a dyn SessionFactory,
    trail: AuditTrail,
}

impl<'a> RunContext<'a> {
    /// Append a line to the trail regardless of verbosity
    pub(crate) fn record(&self, line: impl Into<String>) {
        let line = line.into();
        self.progress.on_trail_line(&line);
        self.trail.record(line);
    }

    /// Append a line only on verbose runs
    pub(crate) fn detail(&self, line: impl Into<String>) {
        if self.trail.is_verbose() {
            self.record(line);
        }
    }

    /// Open the session for one batch of calls; it is released on drop
    pub(crate) fn open_session(&self) -> Result<Box<dyn ModelSession>, CompareError> {
        Ok(self.sessions.open()?)
    }
}

/// Use case for running a multi-model comparison
pub struct RunComparisonUseCase {
    config: CompareConfig,
    sessions: Arc<dyn SessionFactory>,
}

impl RunComparisonUseCase {
    pub fn new(config: CompareConfig, sessions: Arc<dyn SessionFactory>) -> Self {
        Self { config, sessions }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Run with default (no-op) progress
    pub async fn run(
        &self,
        prompt: &Prompt,
        protocol: &Protocol,
    ) -> Result<ComparisonRun, CompareError> {
        self.run_with_progress(prompt, protocol, &NoProgress).await
    }

    /// Run with progress callbacks, bounded by the configured timeout
    pub async fn run_with_progress(
        &self,
        prompt: &Prompt,
        protocol: &Protocol,
        progress: &dyn ProgressNotifier,
    ) -> Result<ComparisonRun, CompareError> {
        match self.config.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, self.execute(prompt, protocol, progress))
                .await
                .map_err(|_| {
                    warn!("Comparison exceeded {:?}", limit);
                    CompareError::Timeout(limit)
                })?,
            None => self.execute(prompt, protocol, progress).await,
        }
    }

    async fn execute(
        &self,
        prompt: &Prompt,
        protocol: &Protocol,
        progress: &dyn ProgressNotifier,
    ) -> Result<ComparisonRun, CompareError> {
        if self.config.models.is_empty() {
            return Err(CompareError::NoModels);
        }
        if protocol.adjudicates() && self.config.judges.is_empty() {
            return Err(CompareError::NoJudges);
        }

        let started_at = Utc::now();
        let clock = Instant::now();
        let ctx = RunContext {
            prompt: prompt.content(),
            config: &self.config,
            progress,
            sessions: self.sessions.as_ref(),
            trail: AuditTrail::new(self.config.behavior.verbose),
        };

        let cap = protocol
            .fan_out_cap()
            .unwrap_or(self.config.models.len())
            .min(self.config.models.len());
        let models = &self.config.models[..cap];
        info!("Running {} comparison over {} model(s)", protocol, models.len());

        let mut candidates = {
            let session = ctx.open_session()?;
            let responses = dispatch::dispatch(&ctx, session.as_ref(), models, Stage::Query).await?;
            extract::extract_candidates(&ctx, models, &responses)?
        };

        let decided = self.decide(&ctx, protocol, &mut candidates).await?;
        if let Some(winner) = &decided {
            ctx.record("PASS compared response");
            ctx.record(winner.clone());
        } else if protocol.adjudicates() {
            ctx.record("FAIL comparison");
        }

        let elapsed_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Comparison finished in {} ms: {}",
            elapsed_ms,
            if decided.is_some() { "PASS" } else { "no decision" }
        );

        Ok(ComparisonRun {
            protocol: protocol.clone(),
            prompt: prompt.content().to_string(),
            candidates,
            trail: ctx.trail.into_lines(),
            winner: decided,
            started_at,
            elapsed_ms,
        })
    }

    /// Run the protocol's strategy over the extracted answers
    async fn decide(
        &self,
        ctx: &RunContext<'_>,
        protocol: &Protocol,
        candidates: &mut CandidateSet,
    ) -> Result<Option<String>, CompareError> {
        if let Protocol::Unknown(name) = protocol {
            warn!("Unknown protocol {}", name);
            ctx.record(format!("unknown compare action {}", name));
            return Ok(None);
        }
        if *protocol == Protocol::None {
            return Ok(None);
        }

        if candidates.non_blank().len() < protocol.min_candidates() {
            info!(
                "{} needs {} answers, got {}",
                protocol,
                protocol.min_candidates(),
                candidates.non_blank().len()
            );
            ctx.record(strategies::NOT_ENOUGH_RESPONSES);
            return Ok(None);
        }

        let session = ctx.open_session()?;
        let session = session.as_ref();
        match protocol {
            Protocol::OneWay => strategies::one_way(ctx, session, candidates).await,
            Protocol::TwoWay => strategies::two_or_three_way(ctx, session, candidates, true).await,
            Protocol::ThreeWay => {
                strategies::two_or_three_way(ctx, session, candidates, false).await
            }
            Protocol::TwoThenThird => strategies::two_then_third(ctx, session, candidates).await,
            Protocol::ThreeAll => strategies::three_all(ctx, session, candidates).await,
            Protocol::NWay => quorum::n_way(ctx, session, candidates).await,
            Protocol::None | Protocol::Unknown(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::strategies::{CONSENSUS, NOT_ENOUGH_RESPONSES};
    use super::*;
    use crate::config::BehaviorConfig;
    use crate::ports::model_client::{Endpoint, GatewayError, ModelClient, SharedModelClient};
    use async_trait::async_trait;
    use multillm_domain::TextField;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PROMPT: &str = "What is the capital of France?";

    fn body(text: &str) -> String {
        json!({ "text": text }).to_string()
    }

    fn text_field() -> TextField {
        TextField::Key("text".to_string())
    }

    // ==================== Mock Clients ====================

    /// Answers with scripted bodies, in order
    struct ScriptedModel {
        name: String,
        field: TextField,
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn new(name: &str, replies: Vec<Result<String, GatewayError>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                field: text_field(),
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn answering(name: &str, text: &str) -> Arc<Self> {
            Self::new(name, vec![Ok(body(text))])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedModel {
        fn name(&self) -> &str {
            &self.name
        }

        fn text_field(&self) -> &TextField {
            &self.field
        }

        fn make_query(&self, prompt: &str) -> Value {
            json!({ "prompt": prompt })
        }

        async fn ask(
            &self,
            _session: &dyn ModelSession,
            _query: &Value,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("script exhausted".to_string())))
        }
    }

    /// Says YES when the comparison mentions both answers of an agreeing pair
    struct RuleJudge {
        name: String,
        field: TextField,
        agreeing: Vec<(&'static str, &'static str)>,
        seen: Mutex<Vec<String>>,
    }

    impl RuleJudge {
        fn new(name: &str, agreeing: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                field: text_field(),
                agreeing: agreeing.to_vec(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn saw(&self, needle: &str) -> bool {
            self.seen.lock().unwrap().iter().any(|c| c.contains(needle))
        }
    }

    #[async_trait]
    impl ModelClient for RuleJudge {
        fn name(&self) -> &str {
            &self.name
        }

        fn text_field(&self) -> &TextField {
            &self.field
        }

        fn make_query(&self, prompt: &str) -> Value {
            json!({ "prompt": prompt })
        }

        async fn ask(
            &self,
            _session: &dyn ModelSession,
            query: &Value,
        ) -> Result<String, GatewayError> {
            let comparison = query["prompt"].as_str().unwrap_or_default().to_string();
            let agreed = self
                .agreeing
                .iter()
                .any(|(a, b)| comparison.contains(a) && comparison.contains(b));
            self.seen.lock().unwrap().push(comparison);
            Ok(body(if agreed { "YES" } else { "NO" }))
        }
    }

    /// Never answers in time
    struct SlowModel {
        field: TextField,
    }

    #[async_trait]
    impl ModelClient for SlowModel {
        fn name(&self) -> &str {
            "slow"
        }

        fn text_field(&self) -> &TextField {
            &self.field
        }

        fn make_query(&self, prompt: &str) -> Value {
            json!({ "prompt": prompt })
        }

        async fn ask(
            &self,
            _session: &dyn ModelSession,
            _query: &Value,
        ) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(body("late"))
        }
    }

    // ==================== Mock Sessions ====================

    #[derive(Default)]
    struct CountingSessions {
        opened: AtomicUsize,
        live: Arc<AtomicUsize>,
    }

    struct CountingSession {
        live: Arc<AtomicUsize>,
    }

    impl Drop for CountingSession {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ModelSession for CountingSession {
        async fn post_json(&self, _endpoint: &Endpoint, _body: &Value) -> Result<String, GatewayError> {
            Err(GatewayError::Other("mock session".to_string()))
        }
    }

    impl SessionFactory for CountingSessions {
        fn open(&self) -> Result<Box<dyn ModelSession>, GatewayError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingSession {
                live: Arc::clone(&self.live),
            }))
        }
    }

    // ==================== Mock Progress ====================

    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<String>>,
        stages: Mutex<Vec<(Stage, usize)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: &Stage, total_calls: usize) {
            self.stages.lock().unwrap().push((*stage, total_calls));
        }

        fn on_call_complete(&self, _stage: &Stage, _model: &str, _success: bool) {}

        fn on_stage_complete(&self, _stage: &Stage) {}

        fn on_trail_line(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    // ==================== Helpers ====================

    fn shared<T: ModelClient + 'static>(client: &Arc<T>) -> SharedModelClient {
        client.clone()
    }

    fn use_case(
        models: Vec<SharedModelClient>,
        judges: Vec<SharedModelClient>,
    ) -> (RunComparisonUseCase, Arc<CountingSessions>) {
        let sessions = Arc::new(CountingSessions::default());
        let config = CompareConfig::new(models, judges)
            .with_behavior(BehaviorConfig::default().with_verbose(true));
        (RunComparisonUseCase::new(config, sessions.clone()), sessions)
    }

    fn answering(names_and_texts: &[(&str, &str)]) -> Vec<Arc<ScriptedModel>> {
        names_and_texts
            .iter()
            .map(|(name, text)| ScriptedModel::answering(name, text))
            .collect()
    }

    fn all_shared(models: &[Arc<ScriptedModel>]) -> Vec<SharedModelClient> {
        models.iter().map(shared).collect()
    }

    async fn run(
        models: &[Arc<ScriptedModel>],
        judge: &Arc<RuleJudge>,
        protocol: &str,
    ) -> ComparisonRun {
        let (use_case, sessions) = use_case(all_shared(models), vec![shared(judge)]);
        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::from(protocol))
            .await
            .unwrap();
        assert_eq!(sessions.live.load(Ordering::SeqCst), 0);
        run
    }

    fn has_line(run: &ComparisonRun, line: &str) -> bool {
        run.trail.iter().any(|l| l == line)
    }

    // ==================== Extraction ====================

    #[tokio::test]
    async fn test_one_candidate_per_queried_model() {
        let models = vec![
            ScriptedModel::answering("m1", "alpha"),
            ScriptedModel::new("m2", vec![Ok(r#"{"other":1}"#.to_string())]),
            ScriptedModel::answering("m3", "   "),
        ];
        let (use_case, _) = use_case(all_shared(&models), vec![]);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::None)
            .await
            .unwrap();

        assert_eq!(run.candidates.len(), 3);
        assert_eq!(run.candidates.texts(), vec!["alpha", "", ""]);
        assert_eq!(
            run.trail.iter().filter(|l| *l == "No response text found!").count(),
            2
        );
        assert!(!has_line(&run, "FAIL comparison"));
        assert!(run.winner.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_response_is_fatal() {
        let models = vec![
            ScriptedModel::answering("m1", "alpha"),
            ScriptedModel::new("m2", vec![Ok("<html>bad gateway</html>".to_string())]),
        ];
        let judge = RuleJudge::new("judge", &[]);
        let (use_case, _) = use_case(all_shared(&models), vec![shared(&judge)]);

        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::OneWay)
            .await
            .unwrap_err();

        assert!(matches!(err, CompareError::Decode { ref model, .. } if model == "m2"));
        assert_eq!(judge.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_and_releases_session() {
        let models = vec![
            ScriptedModel::answering("m1", "alpha"),
            ScriptedModel::new(
                "m2",
                vec![Err(GatewayError::ConnectionError("refused".to_string()))],
            ),
            ScriptedModel::answering("m3", "alpha"),
        ];
        let judge = RuleJudge::new("judge", &[("alpha", "alpha")]);
        let (use_case, sessions) = use_case(all_shared(&models), vec![shared(&judge)]);

        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::ThreeWay)
            .await
            .unwrap_err();

        assert_eq!(err.model(), Some("m2"));
        assert!(matches!(err, CompareError::Transport { .. }));
        assert_eq!(sessions.opened.load(Ordering::SeqCst), 1);
        assert_eq!(sessions.live.load(Ordering::SeqCst), 0);
        assert_eq!(judge.calls(), 0);
    }

    // ==================== 1-way ====================

    #[tokio::test]
    async fn test_one_way_agreement_returns_first_answer() {
        let models = answering(&[("m1", "foo"), ("m2", "bar"), ("m3", "baz")]);
        let judge = RuleJudge::new("judge", &[("foo", "bar")]);

        let run = run(&models, &judge, "1-way").await;

        assert_eq!(run.winner.as_deref(), Some("foo"));
        assert_eq!(run.last_line(), Some("foo"));
        assert!(has_line(&run, "PASS compared response"));
        assert!(has_line(&run, "comparison judge succeeds, can use m1"));
        assert_eq!(models[2].calls(), 0);
        assert_eq!(run.candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_one_way_disagreement_fails() {
        let models = answering(&[("m1", "foo"), ("m2", "bar")]);
        let judge = RuleJudge::new("judge", &[]);

        let run = run(&models, &judge, "1-way").await;

        assert!(run.winner.is_none());
        assert_eq!(run.last_line(), Some("FAIL comparison"));
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_judge_without_text_counts_as_disagreement() {
        let models = answering(&[("m1", "foo"), ("m2", "foo")]);
        let judge = ScriptedModel::new("judge", vec![Ok(r#"{"error":"busy"}"#.to_string())]);
        let (use_case, _) = use_case(all_shared(&models), vec![shared(&judge)]);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::OneWay)
            .await
            .unwrap();

        assert!(has_line(&run, "comparison using judge failed!"));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    #[tokio::test]
    async fn test_judge_with_blank_text_counts_as_failure() {
        let models = answering(&[("m1", "foo"), ("m2", "foo")]);
        let judge = ScriptedModel::new("judge", vec![Ok(body("   "))]);
        let (use_case, _) = use_case(all_shared(&models), vec![shared(&judge)]);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::OneWay)
            .await
            .unwrap();

        assert!(has_line(&run, "comparison using judge failed!"));
        assert!(!run.trail.iter().any(|l| l.starts_with("comparison using judge result:")));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    // ==================== 2-way / 3-way ====================

    #[tokio::test]
    async fn test_two_way_falls_back_to_alice_and_eve() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("alpha", "charlie")]);

        let run = run(&models, &judge, "2-way").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert_eq!(judge.calls(), 2);
        assert!(judge.saw("Eve answered"));
    }

    #[tokio::test]
    async fn test_two_way_never_compares_bob_and_eve() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("bravo", "charlie")]);

        let run = run(&models, &judge, "2-way").await;

        assert!(run.winner.is_none());
        assert_eq!(judge.calls(), 2);
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    #[tokio::test]
    async fn test_three_way_returns_bob_when_only_bob_and_eve_agree() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("bravo", "charlie")]);

        let run = run(&models, &judge, "3-way").await;

        assert_eq!(run.winner.as_deref(), Some("bravo"));
        assert_eq!(judge.calls(), 3);
        assert!(has_line(&run, "comparison judge succeeds, can use m2"));
    }

    #[tokio::test]
    async fn test_three_way_stops_at_first_agreement() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("alpha", "bravo")]);

        let run = run(&models, &judge, "3-way").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_fixed_steps_use_judges_by_position() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let first = RuleJudge::new("j1", &[]);
        let second = RuleJudge::new("j2", &[]);
        let (use_case, _) = use_case(all_shared(&models), vec![shared(&first), shared(&second)]);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::ThreeWay)
            .await
            .unwrap();

        assert!(run.winner.is_none());
        // third step wraps around to the first judge
        assert_eq!(first.calls(), 2);
        assert_eq!(second.calls(), 1);
        assert!(has_line(&run, "Compare using j2"));
    }

    // ==================== 3-all ====================

    #[tokio::test]
    async fn test_three_all_consensus() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new(
            "judge",
            &[("alpha", "bravo"), ("alpha", "charlie"), ("bravo", "charlie")],
        );

        let run = run(&models, &judge, "3-all").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert!(has_line(&run, CONSENSUS));
        assert!(has_line(&run, "Bob and Eve agree"));
        assert_eq!(judge.calls(), 3);
    }

    #[tokio::test]
    async fn test_three_all_priority() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);

        let judge = RuleJudge::new("judge", &[("alpha", "charlie")]);
        let run_ac = run(&models, &judge, "3-all").await;
        assert_eq!(run_ac.winner.as_deref(), Some("alpha"));
        assert!(!has_line(&run_ac, CONSENSUS));
        assert!(has_line(&run_ac, "Alice and Bob disagree"));

        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("bravo", "charlie")]);
        let run_bc = run(&models, &judge, "3-all").await;
        assert_eq!(run_bc.winner.as_deref(), Some("bravo"));

        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[]);
        let run_none = run(&models, &judge, "3-all").await;
        assert!(run_none.winner.is_none());
        assert_eq!(judge.calls(), 3);
    }

    // ==================== 2-1 ====================

    #[tokio::test]
    async fn test_two_then_third_skips_third_on_agreement() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("alpha", "bravo")]);

        let run = run(&models, &judge, "2-1").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert!(has_line(&run, "first two models agree, can use m1"));
        assert_eq!(models[2].calls(), 0);
    }

    #[tokio::test]
    async fn test_two_then_third_queries_third_model() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("bravo", "charlie")]);

        let run = run(&models, &judge, "2-1").await;

        assert_eq!(run.winner.as_deref(), Some("bravo"));
        assert_eq!(models[2].calls(), 1);
        assert_eq!(run.candidates.len(), 3);
        assert!(has_line(&run, "Query next model m3"));
        assert!(has_line(&run, "second and third agree, can use m2"));
        assert_eq!(judge.calls(), 3);
    }

    #[tokio::test]
    async fn test_two_then_third_none_agree() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[]);

        let run = run(&models, &judge, "2-1").await;

        assert!(run.winner.is_none());
        assert!(has_line(&run, "none agree"));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    #[tokio::test]
    async fn test_two_then_third_without_third_model() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo")]);
        let judge = RuleJudge::new("judge", &[]);

        let run = run(&models, &judge, "2-1").await;

        assert!(run.winner.is_none());
        assert!(has_line(&run, "3rd model failed to answer!"));
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_two_then_third_with_blank_third_answer() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "  ")]);
        let judge = RuleJudge::new("judge", &[]);

        let run = run(&models, &judge, "2-1").await;

        assert!(run.winner.is_none());
        assert!(has_line(&run, "Query next model m3"));
        assert!(has_line(&run, "3rd model failed to answer!"));
        assert_eq!(judge.calls(), 1);
        assert_eq!(run.candidates.len(), 3);
        assert_eq!(models[2].calls(), 1);
    }

    // ==================== n-way ====================

    #[tokio::test]
    async fn test_n_way_majority() {
        let models = answering(&[
            ("m1", "alpha"),
            ("m2", "bravo"),
            ("m3", "charlie"),
            ("m4", "delta"),
        ]);
        let judge = RuleJudge::new("judge", &[("alpha", "bravo"), ("alpha", "charlie")]);

        let run = run(&models, &judge, "n-way").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert!(has_line(&run, "quorum m1 of 3"));
        assert!(has_line(&run, "**quorum majority achieved**"));
        assert!(has_line(&run, "comparison m1 <--> m2 result true"));
        assert!(has_line(&run, "comparison m3 <--> m4 result false"));
        assert_eq!(judge.calls(), 6);
    }

    #[tokio::test]
    async fn test_n_way_consensus_returns_first_leader() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new(
            "judge",
            &[("alpha", "bravo"), ("alpha", "charlie"), ("bravo", "charlie")],
        );

        let run = run(&models, &judge, "n-way").await;

        assert_eq!(run.winner.as_deref(), Some("alpha"));
        assert!(has_line(&run, CONSENSUS));
        assert!(has_line(&run, "quorum m1 of 3"));
    }

    #[tokio::test]
    async fn test_n_way_two_of_four_is_no_decision() {
        let models = answering(&[
            ("m1", "alpha"),
            ("m2", "bravo"),
            ("m3", "charlie"),
            ("m4", "delta"),
        ]);
        let judge = RuleJudge::new("judge", &[("bravo", "delta")]);

        let run = run(&models, &judge, "n-way").await;

        assert!(run.winner.is_none());
        assert!(has_line(&run, "two agree"));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    #[tokio::test]
    async fn test_n_way_all_disagree() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[]);

        let run = run(&models, &judge, "n-way").await;

        assert!(run.winner.is_none());
        assert!(has_line(&run, "No quorum found. All disagree."));
    }

    #[tokio::test]
    async fn test_n_way_ignores_blank_answers() {
        let models = answering(&[("m1", "alpha"), ("m2", ""), ("m3", "  ")]);
        let judge = RuleJudge::new("judge", &[("", "")]);

        let run = run(&models, &judge, "n-way").await;

        assert!(run.winner.is_none());
        assert_eq!(judge.calls(), 0);
        assert!(has_line(&run, NOT_ENOUGH_RESPONSES));
        assert!(!has_line(&run, "PASS compared response"));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
        assert_eq!(run.candidates.len(), 3);
    }

    #[tokio::test]
    async fn test_n_way_pairs_only_answered_models() {
        let models = answering(&[("m1", "alpha"), ("m2", ""), ("m3", "alpha too")]);
        let judge = RuleJudge::new("judge", &[("alpha", "alpha too")]);

        let run = run(&models, &judge, "n-way").await;

        assert_eq!(judge.calls(), 1);
        assert!(judge.saw("John (using m1)") && judge.saw("Jane (using m3)"));
        assert!(!judge.saw("using m2"));
        assert!(has_line(&run, CONSENSUS));
        assert_eq!(run.winner.as_deref(), Some("alpha"));
    }

    #[tokio::test]
    async fn test_n_way_never_judges_own_pair() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judges = vec![
            RuleJudge::new("m1", &[]),
            RuleJudge::new("m2", &[]),
            RuleJudge::new("m3", &[]),
        ];
        let (use_case, _) = use_case(
            all_shared(&models),
            judges.iter().map(shared).collect(),
        );

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::NWay)
            .await
            .unwrap();

        assert!(judges.iter().all(|j| j.calls() == 1));
        assert!(judges[2].saw("John (using m1)") && judges[2].saw("Jane (using m2)"));
        assert!(judges[1].saw("John (using m1)") && judges[1].saw("Jane (using m3)"));
        assert!(judges[0].saw("John (using m2)") && judges[0].saw("Jane (using m3)"));
        assert!(has_line(&run, "comparison model selected: m3"));
    }

    #[tokio::test]
    async fn test_n_way_without_eligible_judge() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo")]);
        let judge = RuleJudge::new("m1", &[]);
        let (use_case, sessions) = use_case(all_shared(&models), vec![shared(&judge)]);

        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::NWay)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CompareError::NoEligibleJudge { ref first, ref second } if first == "m1" && second == "m2"
        ));
        assert_eq!(judge.calls(), 0);
        assert_eq!(sessions.live.load(Ordering::SeqCst), 0);
    }

    // ==================== Recoverable outcomes ====================

    #[tokio::test]
    async fn test_too_few_answers_skip_adjudication() {
        let models = answering(&[("m1", "alpha"), ("m2", ""), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("alpha", "charlie")]);

        let run = run(&models, &judge, "2-way").await;

        assert!(run.winner.is_none());
        assert_eq!(judge.calls(), 0);
        assert!(has_line(&run, NOT_ENOUGH_RESPONSES));
        assert_eq!(run.last_line(), Some("FAIL comparison"));
    }

    #[tokio::test]
    async fn test_unknown_protocol_is_logged_without_decision() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo")]);
        let (use_case, _) = use_case(all_shared(&models), vec![]);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::from("5-way"))
            .await
            .unwrap();

        assert_eq!(run.last_line(), Some("unknown compare action 5-way"));
        assert!(!has_line(&run, "FAIL comparison"));
        assert_eq!(models[0].calls(), 1);
    }

    #[tokio::test]
    async fn test_quiet_run_keeps_decision_lines_only() {
        let models = answering(&[("m1", "foo"), ("m2", "bar")]);
        let judge = RuleJudge::new("judge", &[("foo", "bar")]);
        let sessions = Arc::new(CountingSessions::default());
        let config = CompareConfig::new(all_shared(&models), vec![shared(&judge)]);
        let use_case = RunComparisonUseCase::new(config, sessions);

        let run = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::OneWay)
            .await
            .unwrap();

        assert_eq!(run.trail, vec!["PASS compared response", "foo"]);
    }

    // ==================== Fatal configuration errors ====================

    #[tokio::test]
    async fn test_no_models() {
        let (use_case, _) = use_case(vec![], vec![]);
        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::None)
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::NoModels));
    }

    #[tokio::test]
    async fn test_no_judges() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo")]);
        let (use_case, _) = use_case(all_shared(&models), vec![]);
        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::OneWay)
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::NoJudges));
        assert_eq!(models[0].calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let slow: SharedModelClient = Arc::new(SlowModel { field: text_field() });
        let sessions = Arc::new(CountingSessions::default());
        let config = CompareConfig::new(vec![slow], vec![])
            .with_behavior(BehaviorConfig::with_timeout_seconds(1));
        let use_case = RunComparisonUseCase::new(config, sessions.clone());

        let err = use_case
            .run(&Prompt::try_new(PROMPT).unwrap(), &Protocol::None)
            .await
            .unwrap_err();

        assert!(matches!(err, CompareError::Timeout(d) if d == Duration::from_secs(1)));
        assert_eq!(sessions.live.load(Ordering::SeqCst), 0);
    }

    // ==================== Progress ====================

    #[tokio::test]
    async fn test_progress_sees_every_trail_line() {
        let models = answering(&[("m1", "alpha"), ("m2", "bravo"), ("m3", "charlie")]);
        let judge = RuleJudge::new("judge", &[("alpha", "bravo")]);
        let (use_case, _) = use_case(all_shared(&models), vec![shared(&judge)]);
        let progress = RecordingProgress::default();

        let run = use_case
            .run_with_progress(
                &Prompt::try_new(PROMPT).unwrap(),
                &Protocol::ThreeAll,
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(*progress.lines.lock().unwrap(), run.trail);
        assert_eq!(
            *progress.stages.lock().unwrap(),
            vec![(Stage::Query, 3), (Stage::Adjudicate, 3)]
        );
    }
}
