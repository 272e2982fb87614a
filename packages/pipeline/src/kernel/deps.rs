//! Collaborator container for the drain loop (traits for testability).

use std::sync::Arc;

use typed_builder::TypedBuilder;

use super::traits::{
    BaseAssetRepository, BaseContentSynthesizer, BaseImageSynthesizer, BaseScheduler,
    BaseStatusLedger, BaseWorkQueue,
};

/// Everything the run controller needs, behind trait objects so tests and
/// the local drain binary can substitute in-memory doubles.
#[derive(Clone, TypedBuilder)]
pub struct PipelineDeps {
    pub work_queue: Arc<dyn BaseWorkQueue>,
    pub ledger: Arc<dyn BaseStatusLedger>,
    pub content: Arc<dyn BaseContentSynthesizer>,
    pub images: Arc<dyn BaseImageSynthesizer>,
    pub assets: Arc<dyn BaseAssetRepository>,
    pub scheduler: Arc<dyn BaseScheduler>,
}
