//! Error types shared across the pipeline.

use thiserror::Error;

/// Error surfaced by a generation collaborator, carrying the upstream HTTP
/// status code when the provider exposed one.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Terminal error of one run invocation.
#[derive(Debug, Error)]
pub enum RunError {
    /// A quota/permission/server error classified as abort-the-run. The row
    /// is left partially processed for a later invocation to resume.
    #[error("fatal error at {column}{row}: {source}")]
    Fatal {
        row: u32,
        column: String,
        #[source]
        source: anyhow::Error,
    },

    /// Queue or ledger infrastructure failure. Nothing was written for the
    /// current keyword, so the invocation is safe to retry from scratch.
    #[error(transparent)]
    Infra(#[from] anyhow::Error),
}

impl RunError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunError::Fatal { .. })
    }
}
