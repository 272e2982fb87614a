//! Fatal-vs-continue classification of pipeline errors.
//!
//! The upstream generation API exposes no structured retryable/fatal
//! distinction, so the best-known mapping lives here as data and nowhere
//! else.

use crate::error::ApiError;

/// Status codes that recur immediately on retry (quota, permission,
/// provider outage) and must abort the whole run.
const FATAL_STATUS_CODES: [u16; 7] = [400, 403, 404, 429, 500, 503, 504];

/// Message substrings equivalent to the fatal status codes.
const FATAL_MESSAGE_MARKERS: [&str; 5] = [
    "RESOURCE_EXHAUSTED",
    "PERMISSION_DENIED",
    "INTERNAL",
    "UNAVAILABLE",
    "DEADLINE_EXCEEDED",
];

/// Decision for an error that escaped a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Stop the invocation without writing a `failed` record for the current
    /// keyword, so the external scheduler backs off the whole run instead of
    /// hot-looping.
    AbortRun,
    /// Record `failed` for this keyword only and move on to the next; a
    /// single bad keyword must not block the row.
    ContinueAsFailed,
}

/// Classify a step error. Either signal alone is sufficient to abort: an
/// attached fatal status code, or a known message marker anywhere in the
/// error chain.
pub fn classify(error: &anyhow::Error) -> Verdict {
    for cause in error.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            if api.status.is_some_and(|code| FATAL_STATUS_CODES.contains(&code)) {
                return Verdict::AbortRun;
            }
        }
        let message = cause.to_string();
        if FATAL_MESSAGE_MARKERS.iter().any(|marker| message.contains(marker)) {
            return Verdict::AbortRun;
        }
    }
    Verdict::ContinueAsFailed
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn fatal_status_codes_abort() {
        for code in FATAL_STATUS_CODES {
            let error = anyhow::Error::new(ApiError::with_status(code, "upstream error"));
            assert_eq!(classify(&error), Verdict::AbortRun, "code {code}");
        }
    }

    #[test]
    fn other_status_codes_continue() {
        let error = anyhow::Error::new(ApiError::with_status(422, "bad content"));
        assert_eq!(classify(&error), Verdict::ContinueAsFailed);
    }

    #[test]
    fn fatal_message_markers_abort() {
        for marker in FATAL_MESSAGE_MARKERS {
            let error = anyhow::anyhow!("generateContent failed: {marker}: try later");
            assert_eq!(classify(&error), Verdict::AbortRun, "marker {marker}");
        }
    }

    #[test]
    fn status_survives_context_wrapping() {
        let error = anyhow::Error::new(ApiError::with_status(429, "quota exhausted"))
            .context("step image-synthesis failed for C5");
        assert_eq!(classify(&error), Verdict::AbortRun);
    }

    #[test]
    fn marker_deep_in_the_chain_aborts() {
        let error: anyhow::Error = Err::<(), _>(anyhow::anyhow!("RESOURCE_EXHAUSTED"))
            .context("content synthesis")
            .context("processing keyword")
            .unwrap_err();
        assert_eq!(classify(&error), Verdict::AbortRun);
    }

    #[test]
    fn plain_errors_continue() {
        let error = anyhow::anyhow!("model returned malformed JSON");
        assert_eq!(classify(&error), Verdict::ContinueAsFailed);

        let error = anyhow::Error::new(ApiError::new("empty candidate list"));
        assert_eq!(classify(&error), Verdict::ContinueAsFailed);
    }
}
