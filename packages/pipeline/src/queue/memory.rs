//! In-memory work queue and status ledger.
//!
//! Reference implementations of the storage collaborators, used by the test
//! suite and the local `drain` binary. Production deployments substitute the
//! spreadsheet-backed implementations.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::kernel::{BaseStatusLedger, BaseWorkQueue};

use super::ledger::{StatusFilter, StatusRecord};
use super::row::RowCells;

/// Work queue backed by a map of row index to cells.
#[derive(Default)]
pub struct MemoryWorkQueue {
    rows: RwLock<BTreeMap<u32, RowCells>>,
}

impl MemoryWorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row of cells; empty or whitespace-only strings become empty
    /// cells.
    pub fn insert_row(&self, row: u32, cells: &[&str]) {
        let cells = cells
            .iter()
            .map(|cell| {
                let trimmed = cell.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        self.rows.write().unwrap().insert(row, cells);
    }
}

#[async_trait]
impl BaseWorkQueue for MemoryWorkQueue {
    async fn read_window(&self, start_row: u32, len: u32) -> Result<Vec<RowCells>> {
        let rows = self.rows.read().unwrap();
        let Some(last) = rows.keys().next_back().copied() else {
            return Ok(Vec::new());
        };
        if len == 0 || start_row > last {
            return Ok(Vec::new());
        }

        let end = last.min(start_row.saturating_add(len - 1));
        Ok((start_row..=end)
            .map(|row| rows.get(&row).cloned().unwrap_or_default())
            .collect())
    }
}

/// Append-only ledger backed by a vector of records.
#[derive(Default)]
pub struct MemoryStatusLedger {
    records: RwLock<Vec<StatusRecord>>,
}

impl MemoryStatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in append order.
    pub fn records(&self) -> Vec<StatusRecord> {
        self.records.read().unwrap().clone()
    }
}

#[async_trait]
impl BaseStatusLedger for MemoryStatusLedger {
    async fn append(&self, record: StatusRecord) -> Result<()> {
        self.records.write().unwrap().push(record);
        Ok(())
    }

    async fn query(&self, filter: &StatusFilter) -> Result<Vec<StatusRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::CellStatus;

    #[tokio::test]
    async fn window_stops_at_the_last_authored_row() {
        let queue = MemoryWorkQueue::new();
        queue.insert_row(5, &["a"]);
        queue.insert_row(7, &["b"]);

        let window = queue.read_window(5, 50).await.unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0], vec![Some("a".to_string())]);
        assert!(window[1].is_empty());
        assert_eq!(window[2], vec![Some("b".to_string())]);
    }

    #[tokio::test]
    async fn window_past_the_end_is_empty() {
        let queue = MemoryWorkQueue::new();
        queue.insert_row(5, &["a"]);

        assert!(queue.read_window(6, 50).await.unwrap().is_empty());
        assert!(MemoryWorkQueue::new().read_window(1, 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_strings_become_empty_cells() {
        let queue = MemoryWorkQueue::new();
        queue.insert_row(5, &["keyword", "", "   "]);

        let row = queue.read_row(5).await.unwrap();
        assert_eq!(row, vec![Some("keyword".to_string()), None, None]);
    }

    #[tokio::test]
    async fn ledger_keeps_duplicates_and_append_order() {
        let ledger = MemoryStatusLedger::new();
        ledger.append(StatusRecord::success(5, "A", "kw")).await.unwrap();
        ledger.append(StatusRecord::success(5, "A", "kw")).await.unwrap();
        ledger.append(StatusRecord::row_completed(5)).await.unwrap();

        let all = ledger.query(&StatusFilter::row(5)).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].status, CellStatus::Success);
        assert_eq!(all[2].status, CellStatus::Completed);

        let completed = ledger.query(&StatusFilter::completed()).await.unwrap();
        assert_eq!(completed.len(), 1);
    }
}
