//! Process-wide "currently executing" registry.
//!
//! Maps a browser session's identity to the context currently executing on
//! it, so cross-cutting instrumentation (command-step tagging) can
//! attribute in-flight driver activity to a test. The engine sets the slot
//! on entry to `run` and clears it through a drop-guard on every exit path,
//! so a slot is never left pointing at a finished test. The map does no
//! locking beyond its own mutex; correctness relies on the one-run-at-a-time
//! per-session discipline upheld by orchestration.

use crate::engine::ExecutionContext;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref GLOBAL: Arc<ExecutionContextRegistry> = Arc::new(ExecutionContextRegistry::new());
}

/// Process-wide registry instance consulted by instrumentation.
pub fn global() -> Arc<ExecutionContextRegistry> {
    Arc::clone(&GLOBAL)
}

#[derive(Default)]
pub struct ExecutionContextRegistry {
    slots: Mutex<HashMap<String, ExecutionContext>>,
}

impl ExecutionContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `ctx` as currently executing on `session_id`.
    pub fn set(&self, session_id: &str, ctx: ExecutionContext) {
        self.slots
            .lock()
            .unwrap()
            .insert(session_id.to_string(), ctx);
    }

    /// Empty the slot for `session_id`.
    pub fn clear(&self, session_id: &str) {
        self.slots.lock().unwrap().remove(session_id);
    }

    /// Context currently executing on `session_id`, if any.
    pub fn get(&self, session_id: &str) -> Option<ExecutionContext> {
        self.slots.lock().unwrap().get(session_id).cloned()
    }

    /// Fill the slot and return a guard that empties it again on drop.
    pub fn scoped(self: Arc<Self>, session_id: &str, ctx: ExecutionContext) -> ContextGuard {
        self.set(session_id, ctx);
        ContextGuard {
            registry: self,
            session_id: session_id.to_string(),
        }
    }
}

/// Empties a registry slot when dropped, whichever way the run settled.
pub struct ContextGuard {
    registry: Arc<ExecutionContextRegistry>,
    session_id: String,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Ok(mut slots) = self.registry.slots.lock() {
            slots.remove(&self.session_id);
        }
    }
}
