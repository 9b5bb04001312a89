//! Command handler for compressing a folder.

use tokio::task;
use tracing::debug;
use crate::core::{BatchSummary, CancelFlag, CompressionJob, ProgressSink};
use crate::processing::{Orchestrator, codec_for};
use crate::utils::CompressorResult;

/// Runs `job` on tokio's blocking pool and waits for the summary.
///
/// The batch itself is synchronous; running it via `spawn_blocking` keeps the
/// async runtime free to watch for Ctrl-C and flip `cancel`.
///
/// # Returns
/// The batch summary, or a fatal job error (`NotFound` / `InvalidConfig`).
pub async fn compress_images(
    job: CompressionJob,
    mut sink: Box<dyn ProgressSink + Send>,
    cancel: CancelFlag,
) -> anyhow::Result<BatchSummary> {
    debug!("Received compress command for {}", job.folder().display());

    let summary = task::spawn_blocking(move || -> CompressorResult<BatchSummary> {
        let orchestrator = Orchestrator::new(codec_for(job.format())).with_cancel_flag(cancel);
        orchestrator.run(&job, sink.as_mut())
    })
    .await
    .map_err(|e| anyhow::anyhow!("Compression task panicked: {e}"))??;

    Ok(summary)
}
