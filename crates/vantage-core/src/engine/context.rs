use crate::browser::Browser;
use crate::model::Test;
use std::fmt;
use std::sync::{Arc, Mutex};

/// What a runnable body executes against: the browser's public command
/// handle plus the owning test record. Built once per engine, reused and
/// mutated in place across every `run` call on that engine; callers must
/// not rely on it staying unchanged across a run.
#[derive(Clone)]
pub struct ExecutionContext {
    browser: Arc<dyn Browser>,
    current_test: Arc<Mutex<Test>>,
}

impl ExecutionContext {
    pub fn new(browser: Arc<dyn Browser>, current_test: Arc<Mutex<Test>>) -> Self {
        Self {
            browser,
            current_test,
        }
    }

    pub fn browser(&self) -> &Arc<dyn Browser> {
        &self.browser
    }

    pub fn current_test(&self) -> &Arc<Mutex<Test>> {
        &self.current_test
    }

    /// Session identity of the underlying driver. Registry key.
    pub fn session_id(&self) -> String {
        self.browser.session_id().to_string()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("session_id", &self.browser.session_id())
            .finish_non_exhaustive()
    }
}
