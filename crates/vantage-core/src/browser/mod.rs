//! Browser session collaborator.
//!
//! The engine only ever sees the public command surface of a driver
//! session: enough to hand control to an interactive session and to capture
//! screenshots. Session pooling and lifecycle are owned by orchestration.

use async_trait::async_trait;

pub mod fake;

#[async_trait]
pub trait Browser: Send + Sync {
    /// Stable identity of the underlying driver session. Registry key.
    fn session_id(&self) -> &str;

    /// Hand control to a live interactive session against this browser.
    /// Re-entering an already open session is harmless.
    async fn switch_to_repl(&self) -> anyhow::Result<()>;

    /// Capture a screenshot of the current page, base64-encoded.
    async fn take_screenshot(&self) -> anyhow::Result<String>;
}
