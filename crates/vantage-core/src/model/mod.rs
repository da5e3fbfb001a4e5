//! Test records, runnables and the state shared across one test session.

use crate::engine::ExecutionContext;
use crate::errors::ExecutionError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Boxed future resolved by a runnable body.
pub type RunnableFuture = Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send>>;

type RunnableBody = Arc<dyn Fn(ExecutionContext) -> RunnableFuture + Send + Sync>;

/// Owning test record. Shared between the engine, the execution context and
/// the surrounding orchestration as `Arc<Mutex<Test>>`.
#[derive(Debug, Clone)]
pub struct Test {
    full_title: String,
    err: Option<ExecutionError>,
}

impl Test {
    pub fn new(full_title: impl Into<String>) -> Self {
        Self {
            full_title: full_title.into(),
            err: None,
        }
    }

    pub fn shared(full_title: impl Into<String>) -> Arc<Mutex<Test>> {
        Arc::new(Mutex::new(Self::new(full_title)))
    }

    pub fn full_title(&self) -> &str {
        &self.full_title
    }

    pub fn err(&self) -> Option<&ExecutionError> {
        self.err.as_ref()
    }

    /// First-error-wins: records `err` only when no error is present yet.
    /// An error recorded by an earlier phase is never overwritten.
    pub fn set_err_if_unset(&mut self, err: ExecutionError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnableKind {
    Test,
    Hook,
}

/// A test body or hook plus its metadata, handed over by test-tree
/// construction. The engine decorates it in place with back-references to
/// the session state and execution context before the body runs, so the
/// body and downstream failure handlers can introspect both.
pub struct Runnable {
    kind: RunnableKind,
    full_title: String,
    timeout: Option<Duration>,
    body: RunnableBody,
    shared_ctx: Option<Arc<SharedRunContext>>,
    exec_ctx: Option<ExecutionContext>,
}

impl Runnable {
    /// A test body.
    pub fn test<F, Fut>(full_title: impl Into<String>, body: F) -> Self
    where
        F: Fn(ExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::with_body(RunnableKind::Test, full_title, body)
    }

    /// A hook body (before/after each, etc).
    pub fn hook<F, Fut>(full_title: impl Into<String>, body: F) -> Self
    where
        F: Fn(ExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::with_body(RunnableKind::Hook, full_title, body)
    }

    fn with_body<F, Fut>(kind: RunnableKind, full_title: impl Into<String>, body: F) -> Self
    where
        F: Fn(ExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self {
            kind,
            full_title: full_title.into(),
            timeout: None,
            body: Arc::new(move |ctx| -> RunnableFuture { Box::pin(body(ctx)) }),
            shared_ctx: None,
            exec_ctx: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn kind(&self) -> RunnableKind {
        self.kind
    }

    pub fn full_title(&self) -> &str {
        &self.full_title
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Session state attached by the engine, once `run` has started.
    pub fn shared_ctx(&self) -> Option<&Arc<SharedRunContext>> {
        self.shared_ctx.as_ref()
    }

    /// Execution context attached by the engine, once `run` has started.
    pub fn exec_ctx(&self) -> Option<&ExecutionContext> {
        self.exec_ctx.as_ref()
    }

    pub(crate) fn bind(&mut self, shared_ctx: Arc<SharedRunContext>, exec_ctx: ExecutionContext) {
        self.shared_ctx = Some(shared_ctx);
        self.exec_ctx = Some(exec_ctx);
    }

    pub(crate) fn invoke(&self, ctx: ExecutionContext) -> RunnableFuture {
        (self.body)(ctx)
    }
}

impl fmt::Debug for Runnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runnable")
            .field("kind", &self.kind)
            .field("full_title", &self.full_title)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// State shared by every runnable of one (test, browser-session) pairing.
/// Owned by orchestration; the engine attaches it to runnables and reads
/// the assert-view results on the way out of each run.
#[derive(Debug, Default)]
pub struct SharedRunContext {
    assert_view_results: Option<Arc<AssertViewResults>>,
}

impl SharedRunContext {
    /// Session state without assert-view tracking.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assert_view_results() -> Self {
        Self {
            assert_view_results: Some(Arc::new(AssertViewResults::default())),
        }
    }

    pub fn assert_view_results(&self) -> Option<&Arc<AssertViewResults>> {
        self.assert_view_results.as_ref()
    }
}

/// Soft visual-assertion outcomes recorded while a body runs, tracked
/// independently of thrown errors. A failed assert view does not by itself
/// fail the runnable.
#[derive(Debug, Default)]
pub struct AssertViewResults {
    outcomes: Mutex<Vec<AssertViewOutcome>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssertViewOutcome {
    Ok { state_name: String },
    Fail { state_name: String, message: String },
}

impl AssertViewResults {
    pub fn add(&self, outcome: AssertViewOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }

    pub fn has_fails(&self) -> bool {
        self.outcomes
            .lock()
            .unwrap()
            .iter()
            .any(|o| matches!(o, AssertViewOutcome::Fail { .. }))
    }

    pub fn fails(&self) -> Vec<AssertViewOutcome> {
        self.outcomes
            .lock()
            .unwrap()
            .iter()
            .filter(|o| matches!(o, AssertViewOutcome::Fail { .. }))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
