//! Scripted screenshooter double for engine tests.

use super::{PageScreenshot, Screenshooter};
use crate::errors::ExecutionError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts collaborator calls; can be scripted to fail to exercise the
/// best-effort paths.
#[derive(Default)]
pub struct RecordingScreenshooter {
    fail: bool,
    error_attaches: AtomicUsize,
    assert_view_captures: AtomicUsize,
}

impl RecordingScreenshooter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn error_attaches(&self) -> usize {
        self.error_attaches.load(Ordering::SeqCst)
    }

    pub fn assert_view_captures(&self) -> usize {
        self.assert_view_captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Screenshooter for RecordingScreenshooter {
    async fn attach_to_error(&self, err: &mut ExecutionError) -> anyhow::Result<()> {
        self.error_attaches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("screenshot capture failed");
        }
        err.screenshot = Some(PageScreenshot::new("ZmFrZQ=="));
        Ok(())
    }

    async fn capture_on_assert_view_fail(&self) -> anyhow::Result<()> {
        self.assert_view_captures.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("screenshot capture failed");
        }
        Ok(())
    }
}
