//! Scripted browser double for engine and screenshooter tests.

use super::Browser;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct FakeBrowser {
    session_id: String,
    fail_repl: bool,
    fail_screenshots: bool,
    repl_entries: AtomicUsize,
    screenshots_taken: AtomicUsize,
}

impl FakeBrowser {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            fail_repl: false,
            fail_screenshots: false,
            repl_entries: AtomicUsize::new(0),
            screenshots_taken: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_repl(mut self) -> Self {
        self.fail_repl = true;
        self
    }

    pub fn with_failing_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    /// How many times an interactive session was entered.
    pub fn repl_entries(&self) -> usize {
        self.repl_entries.load(Ordering::SeqCst)
    }

    pub fn screenshots_taken(&self) -> usize {
        self.screenshots_taken.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn switch_to_repl(&self) -> anyhow::Result<()> {
        self.repl_entries.fetch_add(1, Ordering::SeqCst);
        if self.fail_repl {
            anyhow::bail!("interactive session unavailable");
        }
        Ok(())
    }

    async fn take_screenshot(&self) -> anyhow::Result<String> {
        self.screenshots_taken.fetch_add(1, Ordering::SeqCst);
        if self.fail_screenshots {
            anyhow::bail!("screenshot command failed");
        }
        Ok("iVBORw0KGgo=".to_string())
    }
}
