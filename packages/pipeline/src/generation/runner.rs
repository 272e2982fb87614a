//! Run controller: drives one row to completion per invocation, then
//! triggers the next invocation.
//!
//! One invocation is one walk of the state machine:
//!
//! ```text
//! START → FETCH_ROW → (no row: Drained)
//!       → FETCH_BATCH → (empty batch: advance row, FETCH_ROW)
//!       → PROCESS_EACH_KEYWORD → MARK_ROW_COMPLETE → TRIGGER_NEXT → DONE
//! ```
//!
//! The unbounded drain is a chain of these finite invocations, each
//! re-deriving its state from the ledger, which gives a natural restart
//! point after a crash and bounds per-invocation resource use.

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::RunError;
use crate::kernel::PipelineDeps;
use crate::queue::{KeywordBatchFetcher, RowCursor, StatusRecord};

use super::classifier::{classify, Verdict};
use super::pipeline::{GenerationPipeline, StepRetry};

/// Event fired to schedule the next invocation.
pub const GENERATION_EVENT: &str = "ai/image-generation.start";

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The work queue is exhausted; no follow-up invocation was scheduled.
    Drained,
    /// One row was driven to completion and the continuation event fired.
    RowCompleted { row: u32, succeeded: u32, failed: u32 },
}

/// Totals across a local [`RunController::drain`] loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub rows: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// Drives rows through the generation pipeline, one row per invocation.
pub struct RunController {
    deps: PipelineDeps,
    cursor: RowCursor,
    fetcher: KeywordBatchFetcher,
    pipeline: GenerationPipeline,
    worker_id: String,
}

impl RunController {
    pub fn new(deps: PipelineDeps, config: Config) -> Self {
        let cursor = RowCursor::new(
            deps.work_queue.clone(),
            deps.ledger.clone(),
            config.layout.clone(),
        );
        let fetcher = KeywordBatchFetcher::new(
            deps.work_queue.clone(),
            deps.ledger.clone(),
            config.layout,
        );
        let retry = StepRetry {
            attempts: config.runner.step_retries,
            base_delay: config.runner.retry_base_delay,
        };
        let pipeline = GenerationPipeline::new(deps.clone(), retry);
        Self {
            deps,
            cursor,
            fetcher,
            pipeline,
            worker_id: config.runner.worker_id,
        }
    }

    /// One bounded invocation: drive the next unfinished row to completion.
    ///
    /// A fatal classification aborts before the completion marker, leaving
    /// the unattempted keywords for a later invocation; infrastructure
    /// errors propagate without writing anything.
    pub async fn run_once(&self) -> Result<RunOutcome, RunError> {
        let mut after = None;

        let (row, batch) = loop {
            let Some(row) = self.cursor.next_candidate_row(after).await? else {
                info!(worker_id = %self.worker_id, "work queue drained");
                return Ok(RunOutcome::Drained);
            };
            let batch = self.fetcher.fetch_batch(row).await?;
            if batch.is_empty() {
                // Already fully attempted, e.g. under a duplicate trigger.
                // Not a completion of this invocation; keep scanning.
                debug!(row, "row has no unprocessed keywords, advancing");
                after = Some(row);
                continue;
            }
            break (row, batch);
        };

        info!(
            worker_id = %self.worker_id,
            row,
            keywords = batch.len(),
            "starting row"
        );

        let mut succeeded = 0u32;
        let mut failed = 0u32;
        for item in &batch {
            match self.pipeline.process(item).await {
                Ok(_) => succeeded += 1,
                Err(cause) => match classify(&cause) {
                    Verdict::AbortRun => {
                        error!(
                            row,
                            column = %item.column_letter,
                            keyword = %item.keyword,
                            error = %cause,
                            "fatal error, aborting run"
                        );
                        return Err(RunError::Fatal {
                            row,
                            column: item.column_letter.clone(),
                            source: cause,
                        });
                    }
                    Verdict::ContinueAsFailed => {
                        warn!(
                            row,
                            column = %item.column_letter,
                            keyword = %item.keyword,
                            error = %cause,
                            "keyword failed, continuing"
                        );
                        self.deps
                            .ledger
                            .append(StatusRecord::failed(row, &item.column_letter, &item.keyword))
                            .await?;
                        failed += 1;
                    }
                },
            }
        }

        self.deps.ledger.append(StatusRecord::row_completed(row)).await?;
        self.deps.scheduler.trigger(GENERATION_EVENT).await?;
        info!(row, succeeded, failed, "row completed, next run triggered");

        Ok(RunOutcome::RowCompleted {
            row,
            succeeded,
            failed,
        })
    }

    /// Drain the queue locally by chaining invocations until exhaustion.
    /// Long-running deployments re-enter through the scheduler event
    /// instead of this loop.
    pub async fn drain(&self) -> Result<DrainSummary, RunError> {
        let mut summary = DrainSummary::default();
        loop {
            match self.run_once().await? {
                RunOutcome::Drained => return Ok(summary),
                RunOutcome::RowCompleted {
                    succeeded, failed, ..
                } => {
                    summary.rows += 1;
                    summary.succeeded += succeeded;
                    summary.failed += failed;
                }
            }
        }
    }
}
