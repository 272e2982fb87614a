//! Resume cursor: finds the lowest row not yet fully completed.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::config::SheetLayout;
use crate::kernel::{BaseStatusLedger, BaseWorkQueue};

use super::ledger::{StatusFilter, ROW_COMPLETE_COLUMN};

/// Tracks where draining should resume after a restart.
///
/// The ledger's highest `completed` marker is the only durable cursor state;
/// everything else is re-derived per invocation, which is what makes the
/// loop restartable.
pub struct RowCursor {
    work_queue: Arc<dyn BaseWorkQueue>,
    ledger: Arc<dyn BaseStatusLedger>,
    layout: SheetLayout,
}

impl RowCursor {
    pub fn new(
        work_queue: Arc<dyn BaseWorkQueue>,
        ledger: Arc<dyn BaseStatusLedger>,
        layout: SheetLayout,
    ) -> Self {
        Self {
            work_queue,
            ledger,
            layout,
        }
    }

    /// Next row worth attempting: the first row at or past the resume point
    /// containing at least one non-empty cell. `after` advances past rows
    /// already handled within the current invocation. Returns `None` once
    /// the work queue is exhausted - a sentinel, not an error.
    pub async fn next_candidate_row(&self, after: Option<u32>) -> Result<Option<u32>> {
        let resume = match self.highest_completed_row().await? {
            Some(done) => done.saturating_add(1).max(self.layout.start_row),
            None => self.layout.start_row,
        };
        let mut candidate = match after {
            Some(row) => resume.max(row.saturating_add(1)),
            None => resume,
        };

        // Probe in windows to bound round-trips against the backing store
        // while keeping memory flat regardless of store size.
        loop {
            let window = self
                .work_queue
                .read_window(candidate, self.layout.scan_window)
                .await?;
            if window.is_empty() {
                return Ok(None);
            }

            for (offset, cells) in window.iter().enumerate() {
                if cells.iter().flatten().any(|cell| !cell.trim().is_empty()) {
                    let row = candidate + offset as u32;
                    debug!(row, "next candidate row");
                    return Ok(Some(row));
                }
            }

            if (window.len() as u32) < self.layout.scan_window {
                return Ok(None);
            }
            candidate += self.layout.scan_window;
        }
    }

    /// Highest row carrying a row-level completion marker, if any.
    async fn highest_completed_row(&self) -> Result<Option<u32>> {
        let records = self.ledger.query(&StatusFilter::completed()).await?;
        Ok(records
            .iter()
            .filter(|record| record.column == ROW_COMPLETE_COLUMN)
            .map(|record| record.row)
            .max())
    }
}
