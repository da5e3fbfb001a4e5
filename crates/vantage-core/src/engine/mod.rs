//! Runnable execution: one engine per (test, browser-session) pairing.

mod context;
mod executor;

pub use context::ExecutionContext;
pub use executor::ExecutionEngine;
