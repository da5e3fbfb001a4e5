//! Failure taxonomy for runnable execution.
//!
//! Two primary kinds exist: a synthetic timeout raised when a runnable's
//! declared budget elapses before its body settles, and pass-through
//! failures from the body itself. Enrichment failures (screenshot capture,
//! interactive-session switches) are deliberately not represented here:
//! they are logged and swallowed at the call site and never mask the
//! primary error.

use crate::screenshot::PageScreenshot;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionErrorKind {
    /// The runnable's declared timeout elapsed before its body settled.
    Timeout,
    /// The runnable body failed on its own.
    Runnable,
}

/// Primary failure of a single runnable execution.
///
/// Cloneable so the same failure can be recorded on the owning test record
/// and propagated to the caller. The originating error is kept behind an
/// `Arc` instead of being flattened into the message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub message: String,
    /// Diagnostic screenshot attached after the failure, if capture worked.
    pub screenshot: Option<PageScreenshot>,
    cause: Option<Arc<anyhow::Error>>,
}

impl ExecutionError {
    /// Timeout failure. The message format is relied upon by reporters:
    /// `'<full title>' timed out after <ms> ms`.
    pub fn timeout(full_title: &str, limit: Duration) -> Self {
        Self {
            kind: ExecutionErrorKind::Timeout,
            message: format!(
                "'{}' timed out after {} ms",
                full_title,
                limit.as_millis()
            ),
            screenshot: None,
            cause: None,
        }
    }

    /// Pass-through failure from the runnable body.
    pub fn runnable(err: anyhow::Error) -> Self {
        Self {
            kind: ExecutionErrorKind::Runnable,
            message: err.to_string(),
            screenshot: None,
            cause: Some(Arc::new(err)),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ExecutionErrorKind::Timeout
    }

    /// Original error raised by the body, when this failure wraps one.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_deref()
    }
}
