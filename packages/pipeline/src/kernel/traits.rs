// Trait definitions for the pipeline's external collaborators.
//
// These are INFRASTRUCTURE traits only - no orchestration logic. The drain
// loop composes them; concrete backends (the spreadsheet service, the
// generative APIs, the document store) live outside this crate.

use anyhow::Result;
use async_trait::async_trait;

use crate::generation::{GeneratedAsset, GeneratedContent};
use crate::queue::{RowCells, StatusFilter, StatusRecord};

// =============================================================================
// Generation capabilities
// =============================================================================

#[async_trait]
pub trait BaseContentSynthesizer: Send + Sync {
    /// Produce structured page content for one keyword.
    async fn generate(&self, keyword: &str) -> Result<GeneratedContent>;
}

#[async_trait]
pub trait BaseImageSynthesizer: Send + Sync {
    /// Generate, transcode, and upload one image for the prompt; returns the
    /// public URL of the stored artifact. The three operations always happen
    /// together for one output, so they share a single step boundary.
    async fn generate(&self, prompt: &str, keyword: &str) -> Result<String>;
}

#[async_trait]
pub trait BaseAssetRepository: Send + Sync {
    /// Persist a generated asset, returning the stored record id.
    async fn create(&self, asset: GeneratedAsset) -> Result<String>;
}

// =============================================================================
// Work queue and status ledger
// =============================================================================

#[async_trait]
pub trait BaseWorkQueue: Send + Sync {
    /// Read up to `len` rows of cells starting at 1-based `start_row`. Rows
    /// past the last authored row are not returned; an empty window means
    /// the store is exhausted at `start_row`.
    async fn read_window(&self, start_row: u32, len: u32) -> Result<Vec<RowCells>>;

    /// Read a single row's cells.
    async fn read_row(&self, row: u32) -> Result<RowCells> {
        Ok(self
            .read_window(row, 1)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default())
    }
}

#[async_trait]
pub trait BaseStatusLedger: Send + Sync {
    /// Append one status record. Appends are idempotent-tolerant: duplicate
    /// records are acceptable and the ledger never deduplicates them - the
    /// batch fetcher's filter provides the effective dedup.
    async fn append(&self, record: StatusRecord) -> Result<()>;

    /// Query records matching the filter, in append order.
    async fn query(&self, filter: &StatusFilter) -> Result<Vec<StatusRecord>>;
}

// =============================================================================
// Continuation
// =============================================================================

#[async_trait]
pub trait BaseScheduler: Send + Sync {
    /// Fire-and-continue signal that causes a new run invocation. Delivery
    /// is at-least-once; a duplicate trigger is rendered harmless by the
    /// empty-batch path of the controller.
    async fn trigger(&self, event: &str) -> Result<()>;
}
