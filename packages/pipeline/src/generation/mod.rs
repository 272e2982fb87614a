//! Generation side of the pipeline: the per-keyword step chain, failure
//! classification, and the run controller.

mod asset;
mod classifier;
mod content;
mod pipeline;
mod runner;

pub use asset::GeneratedAsset;
pub use classifier::{classify, Verdict};
pub use content::{page_slug, page_title, slugify, GeneratedContent};
pub use pipeline::{GenerationPipeline, ProcessedKeyword, StepRetry};
pub use runner::{DrainSummary, RunController, RunOutcome, GENERATION_EVENT};
