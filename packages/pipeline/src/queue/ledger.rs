//! Append-only status ledger records.
//!
//! The ledger is the single source of truth for "has this unit of work been
//! attempted"; the work queue is the single source of truth for "what work
//! exists". They are never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column value stored on row-level completion markers.
pub const ROW_COMPLETE_COLUMN: &str = "ALL";

/// Keyword placeholder stored on row-level completion markers.
pub const ROW_COMPLETE_KEYWORD: &str = "ROW_COMPLETED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Success,
    Failed,
    Completed,
}

impl CellStatus {
    /// Terminal per-keyword outcome. `Completed` is the row-level marker and
    /// never applies to a single cell.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CellStatus::Success | CellStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Success => "success",
            CellStatus::Failed => "failed",
            CellStatus::Completed => "completed",
        }
    }
}

/// One append-only fact about a keyword's (or row's) processing outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub row: u32,
    pub column: String,
    pub keyword: String,
    pub status: CellStatus,
    pub timestamp: DateTime<Utc>,
}

impl StatusRecord {
    fn new(row: u32, column: &str, keyword: &str, status: CellStatus) -> Self {
        Self {
            row,
            column: column.to_string(),
            keyword: keyword.to_string(),
            status,
            timestamp: Utc::now(),
        }
    }

    pub fn success(row: u32, column: &str, keyword: &str) -> Self {
        Self::new(row, column, keyword, CellStatus::Success)
    }

    pub fn failed(row: u32, column: &str, keyword: &str) -> Self {
        Self::new(row, column, keyword, CellStatus::Failed)
    }

    /// Row-level completion marker, distinct from per-keyword success.
    pub fn row_completed(row: u32) -> Self {
        Self::new(row, ROW_COMPLETE_COLUMN, ROW_COMPLETE_KEYWORD, CellStatus::Completed)
    }

    /// Whether this record marks the given cell as terminally attempted.
    pub fn is_terminal_for(&self, row: u32, column: &str) -> bool {
        self.row == row && self.column == column && self.status.is_terminal()
    }
}

/// Filter for ledger queries; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    pub row: Option<u32>,
    pub column: Option<String>,
    pub status: Option<CellStatus>,
}

impl StatusFilter {
    /// All records for one row.
    pub fn row(row: u32) -> Self {
        Self {
            row: Some(row),
            ..Default::default()
        }
    }

    /// All row-completion and other `completed` records.
    pub fn completed() -> Self {
        Self {
            status: Some(CellStatus::Completed),
            ..Default::default()
        }
    }

    pub fn matches(&self, record: &StatusRecord) -> bool {
        self.row.map_or(true, |row| record.row == row)
            && self.column.as_deref().map_or(true, |col| record.column == col)
            && self.status.map_or(true, |status| record.status == status)
    }
}
