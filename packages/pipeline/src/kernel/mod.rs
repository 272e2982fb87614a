//! Kernel-level infrastructure: collaborator traits and the dependency
//! container consumed by the drain loop.

mod deps;
mod traits;

pub use deps::PipelineDeps;
pub use traits::{
    BaseAssetRepository, BaseContentSynthesizer, BaseImageSynthesizer, BaseScheduler,
    BaseStatusLedger, BaseWorkQueue,
};
