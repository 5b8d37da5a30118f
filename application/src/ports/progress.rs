//! Progress notification port
//!
//! Defines the interface for reporting progress during a comparison run.

/// Batch of concurrent calls within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fan-out of the prompt to the answering models
    Query,
    /// A lazily issued query to one additional model
    FollowUp,
    /// Judge calls
    Adjudicate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Query => "query",
            Stage::FollowUp => "follow-up",
            Stage::Adjudicate => "adjudicate",
        }
    }
}

/// Callback for progress updates during a comparison run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a batch of calls starts
    fn on_stage_start(&self, stage: &Stage, total_calls: usize);

    /// Called when one call of the batch returns
    fn on_call_complete(&self, stage: &Stage, model: &str, success: bool);

    /// Called when every call of the batch has returned
    fn on_stage_complete(&self, stage: &Stage);

    /// Called for every line appended to the run's audit trail
    fn on_trail_line(&self, _line: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_calls: usize) {}
    fn on_call_complete(&self, _stage: &Stage, _model: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
