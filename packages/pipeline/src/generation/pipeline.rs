//! The four-step generation pipeline for one keyword.
//!
//! ```text
//! GenerationPipeline::process(item)
//!     │
//!     ├─► 1. content synthesis   (BaseContentSynthesizer)
//!     ├─► 2. image synthesis     (BaseImageSynthesizer)
//!     ├─► 3. persist asset       (BaseAssetRepository)
//!     └─► 4. success marker      (BaseStatusLedger)
//! ```
//!
//! Steps run strictly in order. Each step is retried a bounded number of
//! times for transient failures; whatever error survives the retries
//! abandons the remaining steps and is returned for classification. The
//! success marker is only ever written after persistence, so a `success`
//! record always implies a stored asset.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::kernel::PipelineDeps;
use crate::queue::{KeywordItem, StatusRecord};

use super::asset::GeneratedAsset;
use super::content::{page_slug, page_title};

/// Bounded transient-retry policy applied below the classification layer.
#[derive(Debug, Clone)]
pub struct StepRetry {
    /// Additional attempts after the first failure.
    pub attempts: u32,
    /// Base delay between attempts, doubled per attempt.
    pub base_delay: Duration,
}

impl Default for StepRetry {
    fn default() -> Self {
        Self {
            attempts: 2,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl StepRetry {
    /// No retries; every step error surfaces immediately.
    pub fn none() -> Self {
        Self {
            attempts: 0,
            base_delay: Duration::ZERO,
        }
    }
}

/// Outcome of one successfully processed keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedKeyword {
    pub asset_id: String,
    pub slug: String,
}

/// Runs the checkpointed step sequence for single keywords.
pub struct GenerationPipeline {
    deps: PipelineDeps,
    retry: StepRetry,
}

impl GenerationPipeline {
    pub fn new(deps: PipelineDeps, retry: StepRetry) -> Self {
        Self { deps, retry }
    }

    /// Run the step sequence for one keyword. On error the remaining steps
    /// are abandoned; no status record is written beyond what already
    /// succeeded, and the error is returned for classification.
    pub async fn process(&self, item: &KeywordItem) -> Result<ProcessedKeyword> {
        debug!(
            row = item.row,
            column = %item.column_letter,
            keyword = %item.keyword,
            "processing keyword"
        );

        let content = self
            .run_step("content-synthesis", item, || {
                self.deps.content.generate(&item.keyword)
            })
            .await?;

        let image_url = self
            .run_step("image-synthesis", item, || {
                self.deps.images.generate(&content.prompt, &item.keyword)
            })
            .await?;

        let slug = page_slug(&item.keyword);
        let asset = GeneratedAsset::builder()
            .image_url(image_url)
            .alt(content.alt)
            .caption(content.caption)
            .title(content.img_title)
            .category(item.category.clone())
            .slug(slug.clone())
            .page_title(page_title(&item.keyword))
            .page_description(content.page_description)
            .prompt(content.prompt)
            .build();

        // If this write fails the uploaded image is orphaned; the context
        // carries its URL so an operator can reconcile by hand.
        let asset_id = self
            .run_step("persist-asset", item, || self.deps.assets.create(asset.clone()))
            .await
            .with_context(|| format!("asset not recorded for image {}", asset.image_url))?;

        let record = StatusRecord::success(item.row, &item.column_letter, &item.keyword);
        self.run_step("mark-success", item, || self.deps.ledger.append(record.clone()))
            .await?;

        info!(
            row = item.row,
            column = %item.column_letter,
            keyword = %item.keyword,
            asset_id = %asset_id,
            "keyword processed"
        );

        Ok(ProcessedKeyword { asset_id, slug })
    }

    /// Run one step, retrying transient failures a bounded number of times.
    async fn run_step<T, Fut>(
        &self,
        step: &str,
        item: &KeywordItem,
        mut op: impl FnMut() -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.retry.attempts => {
                    attempt += 1;
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        step,
                        row = item.row,
                        column = %item.column_letter,
                        attempt,
                        error = %error,
                        "step failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => {
                    return Err(error.context(format!(
                        "step {step} failed for {}{}",
                        item.column_letter, item.row
                    )))
                }
            }
        }
    }
}
