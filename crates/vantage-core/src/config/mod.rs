//! Process-wide runtime configuration.
//!
//! The CLI seeds per-process runtime flags into each worker before any
//! engine is constructed. Engines snapshot the configuration exactly once,
//! at construction, so mid-run changes never apply to an in-flight engine.

use lazy_static::lazy_static;
use std::sync::RwLock;

/// Interactive-session (REPL) entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplMode {
    /// Enter an interactive session before the first runnable on a worker.
    pub before_test: bool,
    /// Enter an interactive session whenever a runnable fails.
    pub on_fail: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub repl_mode: ReplMode,
}

lazy_static! {
    static ref INSTANCE: RwLock<RuntimeConfig> = RwLock::new(RuntimeConfig::default());
}

impl RuntimeConfig {
    /// Snapshot of the process-wide configuration.
    pub fn current() -> RuntimeConfig {
        INSTANCE
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the process-wide configuration.
    pub fn replace(config: RuntimeConfig) {
        *INSTANCE
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
    }

    /// Update the process-wide configuration in place.
    pub fn update(apply: impl FnOnce(&mut RuntimeConfig)) {
        let mut guard = INSTANCE
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut *guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_to_no_repl_entry_points() {
        RuntimeConfig::replace(RuntimeConfig::default());

        let cfg = RuntimeConfig::current();
        assert!(!cfg.repl_mode.before_test);
        assert!(!cfg.repl_mode.on_fail);
    }

    #[test]
    #[serial]
    fn replace_and_update_are_visible_to_later_snapshots() {
        RuntimeConfig::replace(RuntimeConfig {
            repl_mode: ReplMode {
                before_test: true,
                on_fail: false,
            },
        });
        assert!(RuntimeConfig::current().repl_mode.before_test);

        RuntimeConfig::update(|cfg| cfg.repl_mode.on_fail = true);
        let cfg = RuntimeConfig::current();
        assert!(cfg.repl_mode.before_test);
        assert!(cfg.repl_mode.on_fail);

        RuntimeConfig::replace(RuntimeConfig::default());
    }
}
