//! Query dispatcher: fan a prompt out to several models at once

use super::RunContext;
use super::error::CompareError;
use crate::ports::model_client::{ModelSession, SharedModelClient};
use crate::ports::progress::Stage;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

/// Ask every model in `models` concurrently and return the raw bodies in
/// request order.
///
/// The first failure aborts the batch; calls still in flight are dropped.
pub(crate) async fn dispatch(
    ctx: &RunContext<'_>,
    session: &dyn ModelSession,
    models: &[SharedModelClient],
    stage: Stage,
) -> Result<Vec<String>, CompareError> {
    info!("Querying {} model(s)", models.len());
    ctx.progress.on_stage_start(&stage, models.len());

    let calls = models.iter().map(|model| {
        let query = model.make_query(ctx.prompt);
        async move {
            debug!("Asking {}", model.name());
            let result = model.ask(session, &query).await;
            ctx.progress
                .on_call_complete(&stage, model.name(), result.is_ok());
            result.map_err(|source| {
                warn!("Model {} failed: {}", model.name(), source);
                CompareError::Transport {
                    model: model.name().to_string(),
                    source,
                }
            })
        }
    });

    let responses = try_join_all(calls).await?;
    ctx.progress.on_stage_complete(&stage);
    Ok(responses)
}
