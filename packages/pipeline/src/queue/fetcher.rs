//! Batch fetcher: the unprocessed complement of one row.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::config::SheetLayout;
use crate::kernel::{BaseStatusLedger, BaseWorkQueue};

use super::ledger::StatusFilter;
use super::row::KeywordItem;

/// Produces the next batch of unprocessed keywords for a single row by
/// joining the work queue's cells with the ledger's terminal records.
pub struct KeywordBatchFetcher {
    work_queue: Arc<dyn BaseWorkQueue>,
    ledger: Arc<dyn BaseStatusLedger>,
    layout: SheetLayout,
}

impl KeywordBatchFetcher {
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

    /// Keyword items of `row` with no terminal status yet, in column order.
    /// An empty result means the row was already fully attempted; the caller
    /// advances to the next row rather than treating it as fresh completion.
    pub async fn fetch_batch(&self, row: u32) -> Result<Vec<KeywordItem>> {
        let cells = self.work_queue.read_row(row).await?;
        let items = KeywordItem::from_cells(row, &cells, &self.layout.categories);
        let total = items.len();

        // First terminal record wins; later duplicates change nothing.
        let records = self.ledger.query(&StatusFilter::row(row)).await?;
        let batch: Vec<KeywordItem> = items
            .into_iter()
            .filter(|item| {
                !records
                    .iter()
                    .any(|record| record.is_terminal_for(row, &item.column_letter))
            })
            .collect();

        debug!(row, total, unprocessed = batch.len(), "fetched keyword batch");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{MemoryStatusLedger, MemoryWorkQueue, StatusRecord};

    fn fetcher(queue: Arc<MemoryWorkQueue>, ledger: Arc<MemoryStatusLedger>) -> KeywordBatchFetcher {
        KeywordBatchFetcher::new(queue, ledger, SheetLayout::default())
    }

    fn seeded_queue() -> Arc<MemoryWorkQueue> {
        let queue = Arc::new(MemoryWorkQueue::new());
        queue.insert_row(5, &["sunset beach", "", "city skyline"]);
        queue
    }

    #[tokio::test]
    async fn returns_all_items_when_ledger_is_empty() {
        let fetcher = fetcher(seeded_queue(), Arc::new(MemoryStatusLedger::new()));

        let batch = fetcher.fetch_batch(5).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].column_letter, "A");
        assert_eq!(batch[1].column_letter, "C");
    }

    #[tokio::test]
    async fn filters_cells_with_terminal_records() {
        let ledger = Arc::new(MemoryStatusLedger::new());
        ledger
            .append(StatusRecord::success(5, "A", "sunset beach"))
            .await
            .unwrap();

        let fetcher = fetcher(seeded_queue(), ledger);
        let batch = fetcher.fetch_batch(5).await.unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].column_letter, "C");
        assert_eq!(batch[0].keyword, "city skyline");
    }

    #[tokio::test]
    async fn failed_counts_as_terminal_too() {
        let ledger = Arc::new(MemoryStatusLedger::new());
        ledger
            .append(StatusRecord::failed(5, "C", "city skyline"))
            .await
            .unwrap();

        let fetcher = fetcher(seeded_queue(), ledger);
        let batch = fetcher.fetch_batch(5).await.unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].column_letter, "A");
    }

    #[tokio::test]
    async fn refetch_without_new_writes_is_identical() {
        let ledger = Arc::new(MemoryStatusLedger::new());
        ledger
            .append(StatusRecord::success(5, "A", "sunset beach"))
            .await
            .unwrap();

        let fetcher = fetcher(seeded_queue(), ledger);
        let first = fetcher.fetch_batch(5).await.unwrap();
        let second = fetcher.fetch_batch(5).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fully_attempted_row_yields_empty_batch() {
        let ledger = Arc::new(MemoryStatusLedger::new());
        ledger
            .append(StatusRecord::success(5, "A", "sunset beach"))
            .await
            .unwrap();
        ledger
            .append(StatusRecord::failed(5, "C", "city skyline"))
            .await
            .unwrap();

        let fetcher = fetcher(seeded_queue(), ledger);
        assert!(fetcher.fetch_batch(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_marker_does_not_filter_keywords() {
        // A row-level marker is not a per-cell terminal status; only
        // success/failed records hide cells from the batch.
        let ledger = Arc::new(MemoryStatusLedger::new());
        ledger.append(StatusRecord::row_completed(5)).await.unwrap();

        let fetcher = fetcher(seeded_queue(), ledger);
        assert_eq!(fetcher.fetch_batch(5).await.unwrap().len(), 2);
    }
}
