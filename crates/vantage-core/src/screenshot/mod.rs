//! Screenshot capture around runnable failures.
//!
//! Both operations are best-effort: the engine logs and continues when
//! either one errors, so a broken screenshot pipeline can never mask the
//! failure it was meant to illustrate.

use crate::browser::Browser;
use crate::errors::ExecutionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

pub mod fake;

/// A captured page screenshot, base64-encoded by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageScreenshot {
    pub base64: String,
    pub taken_at: DateTime<Utc>,
}

impl PageScreenshot {
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
            taken_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait Screenshooter: Send + Sync {
    /// Attach a screenshot of the current page state to a failure.
    async fn attach_to_error(&self, err: &mut ExecutionError) -> anyhow::Result<()>;

    /// Capture a screenshot for a recorded assert-view failure. Runs even
    /// when the runnable body itself succeeded.
    async fn capture_on_assert_view_fail(&self) -> anyhow::Result<()>;
}

/// Captures through the browser's public command API.
pub struct BrowserScreenshooter {
    browser: Arc<dyn Browser>,
    assert_view_screenshot: Mutex<Option<PageScreenshot>>,
}

impl BrowserScreenshooter {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self {
            browser,
            assert_view_screenshot: Mutex::new(None),
        }
    }

    /// Latest assert-view screenshot, consumed by result assembly.
    pub fn take_assert_view_screenshot(&self) -> Option<PageScreenshot> {
        self.assert_view_screenshot.lock().unwrap().take()
    }
}

#[async_trait]
impl Screenshooter for BrowserScreenshooter {
    async fn attach_to_error(&self, err: &mut ExecutionError) -> anyhow::Result<()> {
        if err.screenshot.is_some() {
            return Ok(());
        }
        let base64 = self.browser.take_screenshot().await?;
        err.screenshot = Some(PageScreenshot::new(base64));
        Ok(())
    }

    async fn capture_on_assert_view_fail(&self) -> anyhow::Result<()> {
        let base64 = self.browser.take_screenshot().await?;
        *self.assert_view_screenshot.lock().unwrap() = Some(PageScreenshot::new(base64));
        Ok(())
    }
}

/// Screenshooter for sessions with screenshots disabled.
pub struct NoopScreenshooter;

#[async_trait]
impl Screenshooter for NoopScreenshooter {
    async fn attach_to_error(&self, _err: &mut ExecutionError) -> anyhow::Result<()> {
        Ok(())
    }

    async fn capture_on_assert_view_fail(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
