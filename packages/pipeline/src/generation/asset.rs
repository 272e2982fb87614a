//! The stored record produced for each successfully generated keyword.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Final asset handed to the repository collaborator.
///
/// Created once per successfully completed keyword; the pipeline constructs
/// it and hands it over, and does not manage its lifecycle past
/// `BaseAssetRepository::create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct GeneratedAsset {
    pub image_url: String,
    pub alt: String,
    pub caption: String,
    pub title: String,
    pub category: String,
    pub slug: String,
    pub page_title: String,
    pub page_description: String,
    pub prompt: String,
    #[builder(default = "GeminiAPI".to_string())]
    pub source: String,
}
