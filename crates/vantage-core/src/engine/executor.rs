use crate::browser::Browser;
use crate::config::{ReplMode, RuntimeConfig};
use crate::engine::ExecutionContext;
use crate::errors::ExecutionError;
use crate::model::{Runnable, SharedRunContext, Test};
use crate::registry::{self, ExecutionContextRegistry};
use crate::screenshot::Screenshooter;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::task::JoinError;
use tokio::time::timeout;

/// Executes test and hook bodies for one (test, browser-session) pairing.
///
/// Orchestration constructs one engine per pairing and calls [`run`] for
/// each hook and test body belonging to it, sequentially. The engine owns
/// timeout racing, the interactive-session drop-in points, screenshot
/// enrichment of failures, and the currently-executing registry slot for
/// its session.
///
/// [`run`]: ExecutionEngine::run
pub struct ExecutionEngine {
    shared_ctx: Arc<SharedRunContext>,
    screenshooter: Arc<dyn Screenshooter>,
    ctx: ExecutionContext,
    registry: Arc<ExecutionContextRegistry>,
    // Snapshotted at construction; runtime-config changes never apply to an
    // in-flight engine.
    repl_mode: ReplMode,
    repl_before_test_opened: bool,
}

impl ExecutionEngine {
    pub fn new(
        test: Arc<Mutex<Test>>,
        browser: Arc<dyn Browser>,
        shared_ctx: Arc<SharedRunContext>,
        screenshooter: Arc<dyn Screenshooter>,
    ) -> Self {
        Self::with_options(
            test,
            browser,
            shared_ctx,
            screenshooter,
            RuntimeConfig::current().repl_mode,
            registry::global(),
        )
    }

    /// Construction with an explicit REPL snapshot and registry handle, for
    /// instrumentation that owns its own registry.
    pub fn with_options(
        test: Arc<Mutex<Test>>,
        browser: Arc<dyn Browser>,
        shared_ctx: Arc<SharedRunContext>,
        screenshooter: Arc<dyn Screenshooter>,
        repl_mode: ReplMode,
        registry: Arc<ExecutionContextRegistry>,
    ) -> Self {
        Self {
            shared_ctx,
            screenshooter,
            ctx: ExecutionContext::new(browser, test),
            registry,
            repl_mode,
            repl_before_test_opened: false,
        }
    }

    /// Run one test or hook body to settlement.
    ///
    /// Decorates `runnable` in place with back-references to the session
    /// state and execution context, keeps the registry slot for this
    /// session filled for the duration, and records the first failure on
    /// the owning test record before re-raising it.
    pub async fn run(&mut self, runnable: &mut Runnable) -> Result<Value, ExecutionError> {
        runnable.bind(Arc::clone(&self.shared_ctx), self.ctx.clone());

        let session_id = self.ctx.session_id();
        let _slot = Arc::clone(&self.registry).scoped(&session_id, self.ctx.clone());

        match self.call(runnable).await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.ctx
                    .current_test()
                    .lock()
                    .unwrap()
                    .set_err_if_unset(err.clone());
                Err(err)
            }
        }
    }

    async fn call(&mut self, runnable: &Runnable) -> Result<Value, ExecutionError> {
        if self.repl_mode.before_test && !self.repl_before_test_opened {
            // Once per engine, whether or not the switch itself worked.
            self.repl_before_test_opened = true;
            self.switch_to_repl().await;
        }

        let mut outcome = self.invoke(runnable).await;

        if let Err(err) = &mut outcome {
            if self.repl_mode.on_fail {
                tracing::warn!("caught error: {}", err);
                self.switch_to_repl().await;
            }

            if let Err(e) = self.screenshooter.attach_to_error(err).await {
                tracing::warn!("failed to attach screenshot to error: {:#}", e);
            }
        }

        if let Some(results) = self.shared_ctx.assert_view_results() {
            if results.has_fails() {
                if let Err(e) = self.screenshooter.capture_on_assert_view_fail().await {
                    tracing::warn!("failed to capture assert view screenshot: {:#}", e);
                }
            }
        }

        outcome
    }

    /// Race the body against its declared timeout. The body runs as its own
    /// task: an elapsed timeout stops waiting for it, it does not kill it.
    async fn invoke(&self, runnable: &Runnable) -> Result<Value, ExecutionError> {
        let mut handle = tokio::spawn(runnable.invoke(self.ctx.clone()));

        match runnable.timeout() {
            Some(limit) => match timeout(limit, &mut handle).await {
                Ok(settled) => Self::settle(settled),
                Err(_) => Err(ExecutionError::timeout(runnable.full_title(), limit)),
            },
            None => Self::settle(handle.await),
        }
    }

    fn settle(joined: Result<anyhow::Result<Value>, JoinError>) -> Result<Value, ExecutionError> {
        match joined {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(ExecutionError::runnable(err)),
            Err(err) => Err(ExecutionError::runnable(anyhow::anyhow!(
                "runnable body task failed: {err}"
            ))),
        }
    }

    async fn switch_to_repl(&self) {
        if let Err(e) = self.ctx.browser().switch_to_repl().await {
            tracing::warn!("failed to switch to interactive session: {:#}", e);
        }
    }
}
