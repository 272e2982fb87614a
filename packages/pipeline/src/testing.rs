//! Hand-written collaborator doubles for tests and the local drain binary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ApiError;
use crate::generation::{slugify, GeneratedAsset, GeneratedContent};
use crate::kernel::{
    BaseAssetRepository, BaseContentSynthesizer, BaseImageSynthesizer, BaseScheduler,
    BaseStatusLedger,
};
use crate::queue::{MemoryStatusLedger, StatusFilter, StatusRecord};

/// Shared, ordered log of collaborator calls, for asserting side-effect
/// ordering (e.g. success markers only ever after persistence).
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Deterministic content for a keyword, shared by the stubs and assertions.
pub fn content_for(keyword: &str) -> GeneratedContent {
    GeneratedContent {
        prompt: format!("ultra realistic photo of {keyword}"),
        page_description: format!("Free AI generated images of {keyword}."),
        img_title: format!("{keyword} image"),
        alt: format!("AI generated {keyword}"),
        caption: format!("{keyword}, AI generated"),
    }
}

struct InjectedFailure {
    error: ApiError,
    /// `None` fails forever; `Some(n)` fails the next n calls.
    remaining: Option<u32>,
}

#[derive(Default)]
struct FailureMap(Mutex<HashMap<String, InjectedFailure>>);

impl FailureMap {
    fn fail_for(&self, keyword: &str, error: ApiError) {
        self.0.lock().unwrap().insert(
            keyword.to_string(),
            InjectedFailure {
                error,
                remaining: None,
            },
        );
    }

    fn fail_times(&self, keyword: &str, error: ApiError, times: u32) {
        self.0.lock().unwrap().insert(
            keyword.to_string(),
            InjectedFailure {
                error,
                remaining: Some(times),
            },
        );
    }

    fn recover(&self, keyword: &str) {
        self.0.lock().unwrap().remove(keyword);
    }

    /// Pop the failure for this keyword, if one is armed.
    fn take(&self, keyword: &str) -> Option<ApiError> {
        let mut map = self.0.lock().unwrap();
        let failure = map.get_mut(keyword)?;
        let error = failure.error.clone();
        match &mut failure.remaining {
            None => {}
            Some(0) => {
                map.remove(keyword);
                return None;
            }
            Some(n) => {
                *n -= 1;
                if *n == 0 {
                    map.remove(keyword);
                }
            }
        }
        Some(error)
    }
}

/// Content synthesizer stub with per-keyword injectable failures.
#[derive(Default)]
pub struct StubContentSynthesizer {
    failures: FailureMap,
    trace: Option<Trace>,
}

impl StubContentSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(trace: Trace) -> Self {
        Self {
            failures: FailureMap::default(),
            trace: Some(trace),
        }
    }

    /// Make `generate` fail for this keyword from now on.
    pub fn fail_for(&self, keyword: &str, error: ApiError) {
        self.failures.fail_for(keyword, error);
    }

    /// Make `generate` fail for this keyword for the next `times` calls.
    pub fn fail_times(&self, keyword: &str, error: ApiError, times: u32) {
        self.failures.fail_times(keyword, error, times);
    }

    /// Clear an injected failure, simulating recovery between runs.
    pub fn recover(&self, keyword: &str) {
        self.failures.recover(keyword);
    }
}

#[async_trait]
impl BaseContentSynthesizer for StubContentSynthesizer {
    async fn generate(&self, keyword: &str) -> Result<GeneratedContent> {
        if let Some(error) = self.failures.take(keyword) {
            return Err(error.into());
        }
        if let Some(trace) = &self.trace {
            trace.push(format!("content:{keyword}"));
        }
        Ok(content_for(keyword))
    }
}

/// Image synthesizer stub returning a deterministic CDN-style URL.
#[derive(Default)]
pub struct StubImageSynthesizer {
    failures: FailureMap,
    trace: Option<Trace>,
}

impl StubImageSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(trace: Trace) -> Self {
        Self {
            failures: FailureMap::default(),
            trace: Some(trace),
        }
    }

    pub fn fail_for(&self, keyword: &str, error: ApiError) {
        self.failures.fail_for(keyword, error);
    }

    pub fn recover(&self, keyword: &str) {
        self.failures.recover(keyword);
    }
}

#[async_trait]
impl BaseImageSynthesizer for StubImageSynthesizer {
    async fn generate(&self, _prompt: &str, keyword: &str) -> Result<String> {
        if let Some(error) = self.failures.take(keyword) {
            return Err(error.into());
        }
        if let Some(trace) = &self.trace {
            trace.push(format!("image:{keyword}"));
        }
        Ok(format!("https://cdn.test/{}.avif", slugify(keyword)))
    }
}

/// Asset repository double that records created assets.
#[derive(Default)]
pub struct RecordingAssetRepository {
    created: Mutex<Vec<GeneratedAsset>>,
    fail_writes: AtomicBool,
    trace: Option<Trace>,
}

impl RecordingAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(trace: Trace) -> Self {
        Self {
            trace: Some(trace),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<GeneratedAsset> {
        self.created.lock().unwrap().clone()
    }

    /// Make subsequent writes fail with a plain storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseAssetRepository for RecordingAssetRepository {
    async fn create(&self, asset: GeneratedAsset) -> Result<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("document store write failed");
        }
        if let Some(trace) = &self.trace {
            trace.push(format!("persist:{}", asset.slug));
        }
        let mut created = self.created.lock().unwrap();
        created.push(asset);
        Ok(format!("asset-{}", created.len()))
    }
}

/// Scheduler double that records triggered events.
#[derive(Default)]
pub struct RecordingScheduler {
    events: Mutex<Vec<String>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseScheduler for RecordingScheduler {
    async fn trigger(&self, event: &str) -> Result<()> {
        self.events.lock().unwrap().push(event.to_string());
        Ok(())
    }
}

/// Scheduler that drops triggers; the local drain loop re-enters directly.
#[derive(Default)]
pub struct NoopScheduler;

#[async_trait]
impl BaseScheduler for NoopScheduler {
    async fn trigger(&self, _event: &str) -> Result<()> {
        Ok(())
    }
}

/// Ledger that mirrors every append into a [`Trace`].
pub struct TracingLedger {
    inner: Arc<MemoryStatusLedger>,
    trace: Trace,
}

impl TracingLedger {
    pub fn new(inner: Arc<MemoryStatusLedger>, trace: Trace) -> Self {
        Self { inner, trace }
    }
}

#[async_trait]
impl BaseStatusLedger for TracingLedger {
    async fn append(&self, record: StatusRecord) -> Result<()> {
        self.trace.push(format!(
            "status:{}:{}{}",
            record.status.as_str(),
            record.column,
            record.row
        ));
        self.inner.append(record).await
    }

    async fn query(&self, filter: &StatusFilter) -> Result<Vec<StatusRecord>> {
        self.inner.query(filter).await
    }
}
