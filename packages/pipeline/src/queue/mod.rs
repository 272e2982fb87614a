//! Work-queue side of the pipeline: rows and keyword items, status ledger
//! records, the resume cursor, and the batch fetcher.

mod cursor;
mod fetcher;
mod ledger;
mod memory;
mod row;

pub use cursor::RowCursor;
pub use fetcher::KeywordBatchFetcher;
pub use ledger::{
    CellStatus, StatusFilter, StatusRecord, ROW_COMPLETE_COLUMN, ROW_COMPLETE_KEYWORD,
};
pub use memory::{MemoryStatusLedger, MemoryWorkQueue};
pub use row::{column_letter, KeywordItem, RowCells};
